//! The cleanup passes.
//!
//! Each pass scans the whole tree first and only then applies its rewrites,
//! so no query in a pass ever observes a half-applied edit.

mod asyncify;
mod const_to_let;
mod return_last_declaration;
mod strip_unused;
mod strip_unused_awaits;

pub use asyncify::Asyncify;
pub use const_to_let::ConstToLet;
pub use return_last_declaration::ReturnLastDeclaration;
pub use strip_unused::StripUnused;
pub use strip_unused_awaits::StripUnusedAwaits;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tidy_ast::{RewriteError, SyntaxTree};

/// A self-contained tree-to-tree rewrite rule.
pub trait RewritePass {
    /// Identifier used in pass lists and logs.
    fn name(&self) -> &'static str;

    /// Rewrite `tree` in place and return the number of edits applied.
    fn run(&self, tree: &mut SyntaxTree) -> Result<usize, RewriteError>;
}

/// Names accepted in a pass list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassId {
    ConstToLet,
    StripUnusedAwaits,
    StripUnused,
    ReturnLastDeclaration,
    /// Placeholder, performs no mutation.
    Asyncify,
}

impl PassId {
    pub const ALL: [PassId; 5] = [
        PassId::ConstToLet,
        PassId::StripUnusedAwaits,
        PassId::StripUnused,
        PassId::ReturnLastDeclaration,
        PassId::Asyncify,
    ];

    /// Pass list used when the caller names none.
    pub const DEFAULT: [PassId; 4] = [
        PassId::ConstToLet,
        PassId::StripUnusedAwaits,
        PassId::StripUnused,
        PassId::ReturnLastDeclaration,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PassId::ConstToLet => "constToLet",
            PassId::StripUnusedAwaits => "stripUnusedAwaits",
            PassId::StripUnused => "stripUnused",
            PassId::ReturnLastDeclaration => "returnLastDeclaration",
            PassId::Asyncify => "asyncify",
        }
    }

    /// Instantiate the pass this identifier names.
    pub fn pass(self) -> Box<dyn RewritePass> {
        match self {
            PassId::ConstToLet => Box::new(ConstToLet),
            PassId::StripUnusedAwaits => Box::new(StripUnusedAwaits),
            PassId::StripUnused => Box::new(StripUnused),
            PassId::ReturnLastDeclaration => Box::new(ReturnLastDeclaration),
            PassId::Asyncify => Box::new(Asyncify),
        }
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassId {
    type Err = ParsePassIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PassId::ALL
            .into_iter()
            .find(|id| id.as_str() == value)
            .ok_or_else(|| ParsePassIdError {
                name: value.to_string(),
            })
    }
}

/// A pass name that matches no known pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePassIdError {
    pub name: String,
}

impl fmt::Display for ParsePassIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pass `{}` (expected one of: ", self.name)?;
        for (i, id) in PassId::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(id.as_str())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ParsePassIdError {}
