//! Whole-tree binding index.
//!
//! Maps a binding name to every site that binds or rebinds it, in document
//! order. There is no lexical scope model: every key lives in
//! [`ScopeId::FLAT`], so two unrelated bindings that share a name in
//! different functions land in the same entry. Keys already carry a scope so a
//! scope-aware collector can be added without changing the entry shape.

use indexmap::IndexMap;
use tidy_ast::{DeclarationKind, NodeArena, NodeIndex, NodeKind, NodePath, RewriteError, TreeQuery};
use tracing::trace;

/// Identifies a namespace that bindings are grouped under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The single namespace spanning the whole tree.
    pub const FLAT: ScopeId = ScopeId(0);
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub scope: ScopeId,
    pub name: String,
}

impl BindingKey {
    pub fn flat(name: impl Into<String>) -> BindingKey {
        BindingKey {
            scope: ScopeId::FLAT,
            name: name.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteKind {
    Declaration,
    Assignment,
}

/// One place in the tree that binds a name.
#[derive(Debug, PartialEq, Eq)]
pub struct BindingSite {
    pub kind: SiteKind,
    pub path: NodePath,
}

impl BindingSite {
    #[inline]
    pub fn is_declaration(&self) -> bool {
        self.kind == SiteKind::Declaration
    }
}

/// Name to ordered binding sites, built fresh for each pass invocation.
#[derive(Debug, Default)]
pub struct BindingIndex {
    entries: IndexMap<BindingKey, Vec<BindingSite>>,
}

impl BindingIndex {
    /// Index the declarations accepted by `include` and every assignment to a
    /// plain identifier, in one pre-order walk from `root`.
    ///
    /// Declarations whose name is a pattern rather than an identifier are
    /// skipped. A declaration with no name at all is a `StructuralMismatch`.
    pub fn build<F>(arena: &NodeArena, root: NodeIndex, include: F) -> Result<BindingIndex, RewriteError>
    where
        F: Fn(DeclarationKind) -> bool,
    {
        let paths = TreeQuery::new(arena, root).find_any(
            &[NodeKind::VariableDeclaration, NodeKind::Assignment],
            |_, _| true,
        );

        let mut index = BindingIndex::default();
        for path in paths {
            if let Some(decl) = arena.get_declaration(path.node) {
                if !include(decl.kind) {
                    continue;
                }
                if decl.name.is_none() {
                    return Err(arena.mismatch(path.node, "declaration has no name"));
                }
                let Some(name) = arena.identifier_text(decl.name) else {
                    trace!(node = path.node.0, "skipping pattern declaration");
                    continue;
                };
                index.push(name, SiteKind::Declaration, path);
            } else if let Some(name) = arena
                .get_assignment(path.node)
                .and_then(|assign| arena.identifier_text(assign.target))
            {
                index.push(name, SiteKind::Assignment, path);
            }
        }
        Ok(index)
    }

    fn push(&mut self, name: &str, kind: SiteKind, path: NodePath) {
        self.entries
            .entry(BindingKey::flat(name))
            .or_default()
            .push(BindingSite { kind, path });
    }

    /// Sites bound to `name` in the flat namespace.
    pub fn sites(&self, name: &str) -> &[BindingSite] {
        self.entries
            .get(&BindingKey::flat(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&BindingKey, &[BindingSite])> {
        self.entries.iter().map(|(key, sites)| (key, sites.as_slice()))
    }

    /// Consume the index, yielding owned entries in order of first appearance.
    pub fn into_entries(self) -> impl Iterator<Item = (BindingKey, Vec<BindingSite>)> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
