//! Line-based liveness of declared names.
//!
//! A declared name counts as used when some identifier with that text sits on
//! a different source line than the declaration. Only the last declaration of
//! each name is tracked. This is a syntactic heuristic over the flat
//! namespace, not scope-aware dead-code elimination.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tidy_ast::{NodeArena, NodeIndex, NodeKind, NodePath, RewriteError, TreeQuery};

/// The declaration currently tracked for a name.
#[derive(Debug)]
struct Pending {
    path: NodePath,
    /// `None` when the declaration has no location; such a declaration is
    /// never reported unused.
    line: Option<u32>,
}

pub struct UsageAnalyzer<'a> {
    arena: &'a NodeArena,
    root: NodeIndex,
}

impl<'a> UsageAnalyzer<'a> {
    pub fn new(arena: &'a NodeArena, root: NodeIndex) -> Self {
        UsageAnalyzer { arena, root }
    }

    pub fn analyze(&self) -> Result<UsageReport, RewriteError> {
        let query = TreeQuery::new(self.arena, self.root);

        let mut pending: IndexMap<String, Pending> = IndexMap::new();
        for path in query.find(NodeKind::VariableDeclaration) {
            let Some(decl) = self.arena.get_declaration(path.node) else {
                continue;
            };
            if decl.name.is_none() {
                return Err(self.arena.mismatch(path.node, "declaration has no name"));
            }
            let Some(name) = self.arena.identifier_text(decl.name) else {
                continue;
            };
            let line = self.arena.line(path.node);
            // Later declarations replace earlier ones under the same name.
            pending.insert(name.to_string(), Pending { path, line });
        }

        let mut used = FxHashSet::default();
        for reference in query.find(NodeKind::Identifier) {
            let Some(text) = self.arena.identifier_text(reference.node) else {
                continue;
            };
            let Some(entry) = pending.get(text) else {
                continue;
            };
            let is_use = match (entry.line, self.arena.line(reference.node)) {
                (Some(decl_line), Some(ref_line)) => decl_line != ref_line,
                _ => true,
            };
            if is_use {
                pending.shift_remove(text);
                used.insert(text.to_string());
            }
        }

        let unused = pending
            .into_values()
            .filter(|entry| entry.line.is_some())
            .map(|entry| entry.path)
            .collect();
        Ok(UsageReport { unused, used })
    }
}

/// Outcome of one [`UsageAnalyzer::analyze`] run.
#[derive(Debug, Default)]
pub struct UsageReport {
    unused: Vec<NodePath>,
    used: FxHashSet<String>,
}

impl UsageReport {
    /// Declarations with no reference on another line, ordered by where
    /// their name was first declared.
    pub fn unused(&self) -> &[NodePath] {
        &self.unused
    }

    pub fn into_unused(self) -> Vec<NodePath> {
        self.unused
    }

    /// Whether some reference to `name` was found off the declaration line.
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}
