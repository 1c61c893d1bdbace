//! Syntactic classification of what an expression finally refers to.

use tidy_ast::{NodeArena, NodeIndex, NodeKind};

/// What the rightmost term of an expression looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalReference {
    /// A property read such as `obj.value`.
    Value,
    /// An invocation, e.g. `obj.load()`.
    Call,
    /// Anything else: bare identifiers, literals, computed keys, opaque nodes.
    Unknown,
}

impl TerminalReference {
    /// Classify `expr` without resolving any names.
    ///
    /// Only a member access whose property is a plain identifier is a
    /// `Value`. A bare identifier may name a callable and stays `Unknown`.
    pub fn of(arena: &NodeArena, expr: NodeIndex) -> TerminalReference {
        match arena.kind(expr) {
            Some(NodeKind::Call) => TerminalReference::Call,
            Some(NodeKind::MemberAccess) => {
                let property = arena
                    .get_member_access(expr)
                    .map_or(NodeIndex::NONE, |access| access.property);
                match arena.kind(property) {
                    Some(NodeKind::Identifier) => TerminalReference::Value,
                    Some(NodeKind::Call) => TerminalReference::Call,
                    _ => TerminalReference::Unknown,
                }
            }
            _ => TerminalReference::Unknown,
        }
    }

    #[inline]
    pub fn is_value(self) -> bool {
        self == TerminalReference::Value
    }
}
