//! Delete declarations whose name is never referenced on another line.
//!
//! The initializer goes with the declaration, side effects included:
//! `const unused = compute();` disappears entirely.

use super::RewritePass;
use crate::usage::UsageAnalyzer;
use tidy_ast::{RewriteError, SyntaxTree};
use tracing::{debug, trace};

pub struct StripUnused;

impl RewritePass for StripUnused {
    fn name(&self) -> &'static str {
        "stripUnused"
    }

    fn run(&self, tree: &mut SyntaxTree) -> Result<usize, RewriteError> {
        let unused = UsageAnalyzer::new(&tree.arena, tree.root)
            .analyze()?
            .into_unused();

        let mut removed = 0;
        for path in unused {
            // Nested inside a declaration removed earlier in this loop.
            if !tree.arena.is_descendant(path.node, tree.root) {
                continue;
            }
            trace!(
                node = path.node.0,
                name = tree.arena.declared_name(path.node).unwrap_or_default(),
                "removing unused declaration"
            );
            path.remove(&mut tree.arena)?;
            removed += 1;
        }

        debug!(removed, "stripped unused declarations");
        Ok(removed)
    }
}
