//! Errors raised while querying or rewriting a tree.

use crate::base::NodeIndex;
use crate::node::NodeKind;
use crate::position::SourceSpan;
use std::fmt;

/// A rewrite could not be applied without corrupting the tree.
///
/// Passes surface these immediately and the engine aborts the run; nothing is
/// guessed or patched around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// A node lacks a child the rule relies on, or sits in a slot that cannot
    /// take the requested edit.
    StructuralMismatch {
        node: NodeIndex,
        kind: NodeKind,
        loc: Option<SourceSpan>,
        reason: &'static str,
    },
    /// An index that does not name any node in the arena.
    MissingNode { node: NodeIndex },
}

impl RewriteError {
    /// Kind of the offending node, when it exists.
    pub fn node_kind(&self) -> Option<NodeKind> {
        match self {
            RewriteError::StructuralMismatch { kind, .. } => Some(*kind),
            RewriteError::MissingNode { .. } => None,
        }
    }

    pub fn loc(&self) -> Option<SourceSpan> {
        match self {
            RewriteError::StructuralMismatch { loc, .. } => *loc,
            RewriteError::MissingNode { .. } => None,
        }
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::StructuralMismatch {
                node,
                kind,
                loc: Some(loc),
                reason,
            } => write!(f, "structural mismatch at {kind} #{} ({loc}): {reason}", node.0),
            RewriteError::StructuralMismatch {
                node,
                kind,
                loc: None,
                reason,
            } => write!(f, "structural mismatch at {kind} #{} (no location): {reason}", node.0),
            RewriteError::MissingNode { node } => {
                write!(f, "node #{} does not exist in the arena", node.0)
            }
        }
    }
}

impl std::error::Error for RewriteError {}
