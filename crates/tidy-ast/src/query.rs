//! Node selection over a syntax tree.
//!
//! `TreeQuery` walks the live tree in pre-order and hands back owned
//! [`NodePath`] handles. Collecting the full result before touching the arena
//! is what lets a pass scan first and mutate afterwards.

use crate::arena::NodeArena;
use crate::base::NodeIndex;
use crate::error::RewriteError;
use crate::node::NodeKind;

/// Read-only selector over the nodes reachable from `root`.
pub struct TreeQuery<'a> {
    arena: &'a NodeArena,
    root: NodeIndex,
}

impl<'a> TreeQuery<'a> {
    pub fn new(arena: &'a NodeArena, root: NodeIndex) -> Self {
        TreeQuery { arena, root }
    }

    /// All nodes of `kind`, in document order.
    pub fn find(&self, kind: NodeKind) -> Vec<NodePath> {
        self.find_any(&[kind], |_, _| true)
    }

    /// Nodes of `kind` accepted by `predicate`, in document order.
    pub fn find_where<P>(&self, kind: NodeKind, predicate: P) -> Vec<NodePath>
    where
        P: Fn(&NodeArena, NodeIndex) -> bool,
    {
        self.find_any(&[kind], predicate)
    }

    /// Nodes whose kind is any of `kinds`, interleaved in document order.
    pub fn find_any<P>(&self, kinds: &[NodeKind], predicate: P) -> Vec<NodePath>
    where
        P: Fn(&NodeArena, NodeIndex) -> bool,
    {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            if kinds.contains(&node.kind()) && predicate(self.arena, idx) {
                found.push(NodePath {
                    node: idx,
                    parent: node.parent,
                });
            }
            // Reverse so the leftmost child is popped first.
            stack.extend(self.arena.get_children(idx).into_iter().rev());
        }
        found
    }
}

/// A located node: the node plus the parent it was found under.
///
/// `replace` and `remove` consume the path, so each handle can mutate the
/// tree at most once. Handles are not `Copy`; a second handle to the same
/// node only comes from a second query, and it fails its attachment check
/// once the first one has been used.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub node: NodeIndex,
    pub parent: NodeIndex,
}

impl NodePath {
    pub fn kind(&self, arena: &NodeArena) -> Option<NodeKind> {
        arena.kind(self.node)
    }

    /// Whether the node still sits under the parent it was found under.
    pub fn is_attached(&self, arena: &NodeArena) -> bool {
        self.parent.is_some()
            && arena.parent(self.node) == self.parent
            && arena.child_slot(self.parent, self.node).is_some()
    }

    /// Swap this node for `replacement` in its slot.
    pub fn replace(self, arena: &mut NodeArena, replacement: NodeIndex) -> Result<(), RewriteError> {
        self.ensure_attached(arena)?;
        arena.replace_node(self.node, replacement)
    }

    /// Take this node out of the tree without leaving a hole.
    pub fn remove(self, arena: &mut NodeArena) -> Result<(), RewriteError> {
        self.ensure_attached(arena)?;
        arena.remove_node(self.node)
    }

    fn ensure_attached(&self, arena: &NodeArena) -> Result<(), RewriteError> {
        if self.is_attached(arena) {
            Ok(())
        } else {
            Err(arena.mismatch(self.node, "location is stale: node moved or was removed"))
        }
    }
}
