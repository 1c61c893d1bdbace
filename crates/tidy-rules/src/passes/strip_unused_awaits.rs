//! Drop `await` markers that cannot be waiting on anything.
//!
//! - `await 42;` is removed. Nested inside a larger expression the await is
//!   replaced by its literal, which is the value it would have produced.
//! - `await obj.value` becomes `obj.value` when the rightmost term is a plain
//!   property read.
//! - Every other operand is left alone.

use super::RewritePass;
use crate::terminal::TerminalReference;
use tidy_ast::{NodeArena, NodeIndex, NodeKind, NodePath, RewriteError, SyntaxTree, TreeQuery};
use tracing::{debug, trace};

pub struct StripUnusedAwaits;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AwaitAction {
    /// Remove the enclosing expression statement.
    Drop,
    /// Replace the await with its operand.
    Unwrap(NodeIndex),
    Keep,
}

fn classify(arena: &NodeArena, path: &NodePath) -> Result<AwaitAction, RewriteError> {
    let Some(operand) = arena.await_operand(path.node) else {
        return Err(arena.mismatch(path.node, "await has no operand"));
    };
    let action = match arena.kind(operand) {
        Some(NodeKind::Literal) if arena.kind(path.parent) == Some(NodeKind::ExpressionStatement) => {
            AwaitAction::Drop
        }
        Some(NodeKind::Literal) => AwaitAction::Unwrap(operand),
        Some(NodeKind::MemberAccess) if TerminalReference::of(arena, operand).is_value() => {
            AwaitAction::Unwrap(operand)
        }
        _ => AwaitAction::Keep,
    };
    Ok(action)
}

impl RewritePass for StripUnusedAwaits {
    fn name(&self) -> &'static str {
        "stripUnusedAwaits"
    }

    fn run(&self, tree: &mut SyntaxTree) -> Result<usize, RewriteError> {
        let awaits = TreeQuery::new(&tree.arena, tree.root).find(NodeKind::Await);

        // Innermost first. An edit only changes the operand of an enclosing
        // await, and that await is classified after it.
        let mut applied = 0;
        for path in awaits.into_iter().rev() {
            let arena = &mut tree.arena;
            let node = path.node;
            match classify(arena, &path)? {
                AwaitAction::Drop => {
                    path.remove(arena)?;
                    trace!(node = node.0, "dropped literal await");
                }
                AwaitAction::Unwrap(operand) => {
                    path.replace(arena, operand)?;
                    trace!(node = node.0, "unwrapped await");
                }
                AwaitAction::Keep => continue,
            }
            applied += 1;
        }

        debug!(applied, "stripped awaits");
        Ok(applied)
    }
}
