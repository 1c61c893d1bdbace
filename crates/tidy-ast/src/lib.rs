//! Syntax tree model for the tidy cleanup passes.
//!
//! This crate provides the pieces every rewrite rule is built from:
//! - Node storage (`NodeArena`, `NodeIndex`, `SyntaxTree`)
//! - The node vocabulary (`Node`, `NodeData`, `NodeKind`)
//! - Document-order selection (`TreeQuery`, `NodePath`)
//! - In-place rewrite primitives (`replace_node`, `remove_statement`,
//!   `insert_after`, `set_declaration_kind`)
//! - Line/column locations (`Position`, `SourceSpan`)

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod position;
pub use position::{Position, SourceSpan};

pub mod node;
pub use node::{
    DeclarationKind, FunctionKind, LiteralValue, Node, NodeData, NodeKind,
};

pub mod arena;
pub use arena::{ChildSlot, Field, NodeArena};

mod builder;

pub mod error;
pub use error::RewriteError;

pub mod query;
pub use query::{NodePath, TreeQuery};

mod rewrite;

pub mod tree;
pub use tree::SyntaxTree;

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;
#[cfg(test)]
#[path = "../tests/query_tests.rs"]
mod query_tests;
#[cfg(test)]
#[path = "../tests/rewrite_tests.rs"]
mod rewrite_tests;
