//! Consolidate re-declared `const` bindings into one mutable binding.
//!
//! ```text
//! const a = 1;        let a = 1;
//! a = 2;         =>   a = 2;
//! const a = 3;        a = 3;
//! ```
//!
//! The first `const` declaration of a name is the one kept, even when an
//! assignment to the name appears before it.
//!
//! Sites are matched by name only, so same-named bindings in unrelated
//! functions are merged as well.

use super::RewritePass;
use crate::binding::{BindingIndex, BindingSite};
use tidy_ast::{DeclarationKind, NodeIndex, NodePath, RewriteError, SyntaxTree};
use tracing::{debug, trace};

pub struct ConstToLet;

/// A later declaration that becomes `name = initializer;`.
struct Redeclaration {
    path: NodePath,
    name: String,
    initializer: NodeIndex,
}

impl RewritePass for ConstToLet {
    fn name(&self) -> &'static str {
        "constToLet"
    }

    fn run(&self, tree: &mut SyntaxTree) -> Result<usize, RewriteError> {
        let arena = &tree.arena;
        let index = BindingIndex::build(arena, tree.root, |kind| kind == DeclarationKind::Const)?;

        let mut retag = Vec::new();
        let mut redeclarations = Vec::new();
        for (key, sites) in index.into_entries() {
            if sites.len() < 2 {
                continue;
            }
            // Assignments that precede the first declaration stay as they are.
            let mut declarations = sites.into_iter().filter(BindingSite::is_declaration);
            let Some(first) = declarations.next() else {
                continue;
            };
            retag.push(first.path.node);
            for site in declarations {
                let initializer = arena
                    .get_declaration(site.path.node)
                    .map_or(NodeIndex::NONE, |decl| decl.initializer);
                if initializer.is_none() {
                    return Err(arena.mismatch(site.path.node, "re-declared const has no initializer"));
                }
                redeclarations.push(Redeclaration {
                    path: site.path,
                    name: key.name.clone(),
                    initializer,
                });
            }
        }

        let arena = &mut tree.arena;
        for &decl in &retag {
            arena.set_declaration_kind(decl, DeclarationKind::Let)?;
        }
        let rewritten = redeclarations.len();
        for redecl in redeclarations {
            let node = redecl.path.node;
            let name_loc = arena
                .get_declaration(redecl.path.node)
                .and_then(|decl| arena.loc(decl.name));
            let target = arena.add_identifier(redecl.name.as_str(), name_loc);
            let loc = arena.loc(redecl.path.node);
            let assignment = arena.add_assignment(target, redecl.initializer, loc);
            redecl.path.replace(arena, assignment)?;
            trace!(name = %redecl.name, node = node.0, "declaration became assignment");
        }

        debug!(
            retagged = retag.len(),
            rewritten,
            "consolidated const bindings"
        );
        Ok(retag.len() + rewritten)
    }
}
