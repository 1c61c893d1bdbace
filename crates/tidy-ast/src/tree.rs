//! The unit of work handed to the rule engine.

use crate::arena::NodeArena;
use crate::base::NodeIndex;
use crate::error::RewriteError;
use serde::{Deserialize, Serialize};

/// An arena plus the index of its root node.
///
/// The tree is created by an external parser, mutated in place by the
/// passes, and handed back to an external serializer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub arena: NodeArena,
    pub root: NodeIndex,
}

impl SyntaxTree {
    pub fn new(arena: NodeArena, root: NodeIndex) -> SyntaxTree {
        SyntaxTree { arena, root }
    }

    /// Recompute every parent pointer from the root down.
    ///
    /// Required after deserialization. Fails if a child index points outside
    /// the arena or if a node is reachable through two parents, since the
    /// rewrite primitives rely on each live node having exactly one slot.
    pub fn relink(&mut self) -> Result<(), RewriteError> {
        for node in &mut self.arena.nodes {
            node.parent = NodeIndex::NONE;
        }
        if self.arena.get(self.root).is_none() {
            return Err(RewriteError::MissingNode { node: self.root });
        }

        let mut seen = vec![false; self.arena.len()];
        seen[self.root.0 as usize] = true;
        let mut stack = vec![self.root];
        while let Some(parent) = stack.pop() {
            for child in self.arena.get_children(parent) {
                let Some(slot) = seen.get_mut(child.0 as usize) else {
                    return Err(RewriteError::MissingNode { node: child });
                };
                if *slot {
                    return Err(self.arena.mismatch(child, "node is reachable from two parents"));
                }
                *slot = true;
                self.arena.set_parent(child, parent);
                stack.push(child);
            }
        }
        Ok(())
    }

    /// Number of nodes reachable from the root.
    pub fn live_node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            if self.arena.get(idx).is_none() {
                continue;
            }
            count += 1;
            stack.extend(self.arena.get_children(idx));
        }
        count
    }
}
