//! Node definitions for the cleanup syntax tree.
//!
//! The vocabulary is deliberately small: declarations, assignments,
//! identifier references, calls, member access, literals, blocks, functions
//! and await expressions. Anything else a parser produces is carried as
//! [`NodeData::Opaque`] so traversal still reaches its children, but no rule
//! ever matches it.

use crate::base::{NodeIndex, NodeList};
use crate::position::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One node stored in the arena: the kind-specific payload plus header fields
/// every node carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub data: NodeData,
    #[serde(default)]
    pub loc: Option<SourceSpan>,
    /// Recomputed by [`SyntaxTree::relink`](crate::SyntaxTree::relink), so it
    /// is never trusted from serialized input.
    #[serde(default, skip_serializing)]
    pub parent: NodeIndex,
}

impl Node {
    pub fn new(data: NodeData, loc: Option<SourceSpan>) -> Node {
        Node {
            data,
            loc,
            parent: NodeIndex::NONE,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Start line of the node, when the parser recorded one.
    #[inline]
    pub fn line(&self) -> Option<u32> {
        self.loc.map(|span| span.start_line())
    }
}

/// Mutability tag of a variable declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    /// Immutable once bound.
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Var => "var",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

// =============================================================================
// Kind-specific payloads
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

/// `const name = initializer` (a single declarator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub kind: DeclarationKind,
    /// Usually an `Identifier`; destructuring patterns arrive as `Opaque`.
    pub name: NodeIndex,
    #[serde(default)]
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnData {
    #[serde(default)]
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IfData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    #[serde(default)]
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionData {
    pub kind: FunctionKind,
    #[serde(default)]
    pub name: NodeIndex,
    #[serde(default)]
    pub parameters: NodeList,
    /// A `Block`, or any expression for concise arrow bodies.
    pub body: NodeIndex,
    #[serde(default)]
    pub is_async: bool,
}

/// `target = value`. Does not introduce a binding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentData {
    pub target: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiteralData {
    pub value: LiteralValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentifierData {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallData {
    pub callee: NodeIndex,
    #[serde(default)]
    pub arguments: NodeList,
}

/// `object.property` or `object[property]` when `computed`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberAccessData {
    pub object: NodeIndex,
    pub property: NodeIndex,
    #[serde(default)]
    pub computed: bool,
}

/// `await operand`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AwaitData {
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryData {
    pub left: NodeIndex,
    pub operator: String,
    pub right: NodeIndex,
}

/// A construct outside the rule vocabulary, kept verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpaqueData {
    pub label: String,
    #[serde(default)]
    pub children: NodeList,
}

/// Tagged union over every supported node kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeData {
    SourceFile(BlockData),
    Block(BlockData),
    ExpressionStatement(ExpressionStatementData),
    VariableDeclaration(VariableDeclarationData),
    Return(ReturnData),
    If(IfData),
    Function(FunctionData),
    Assignment(AssignmentData),
    Identifier(IdentifierData),
    Literal(LiteralData),
    Call(CallData),
    MemberAccess(MemberAccessData),
    Await(AwaitData),
    Binary(BinaryData),
    Opaque(OpaqueData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::SourceFile(_) => NodeKind::SourceFile,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeData::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeData::Return(_) => NodeKind::Return,
            NodeData::If(_) => NodeKind::If,
            NodeData::Function(_) => NodeKind::Function,
            NodeData::Assignment(_) => NodeKind::Assignment,
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::Literal(_) => NodeKind::Literal,
            NodeData::Call(_) => NodeKind::Call,
            NodeData::MemberAccess(_) => NodeKind::MemberAccess,
            NodeData::Await(_) => NodeKind::Await,
            NodeData::Binary(_) => NodeKind::Binary,
            NodeData::Opaque(_) => NodeKind::Opaque,
        }
    }
}

/// Fieldless tag of [`NodeData`], used to select nodes in queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    SourceFile,
    Block,
    ExpressionStatement,
    VariableDeclaration,
    Return,
    If,
    Function,
    Assignment,
    Identifier,
    Literal,
    Call,
    MemberAccess,
    Await,
    Binary,
    Opaque,
}

impl NodeKind {
    /// Kinds that may sit directly in a statement list.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::ExpressionStatement
                | NodeKind::VariableDeclaration
                | NodeKind::Return
                | NodeKind::If
                | NodeKind::Function
                | NodeKind::Opaque
        )
    }

    /// Kinds that produce a value.
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::Assignment
                | NodeKind::Identifier
                | NodeKind::Literal
                | NodeKind::Call
                | NodeKind::MemberAccess
                | NodeKind::Await
                | NodeKind::Binary
                | NodeKind::Function
                | NodeKind::Opaque
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::SourceFile => "SourceFile",
            NodeKind::Block => "Block",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::Return => "Return",
            NodeKind::If => "If",
            NodeKind::Function => "Function",
            NodeKind::Assignment => "Assignment",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::Call => "Call",
            NodeKind::MemberAccess => "MemberAccess",
            NodeKind::Await => "Await",
            NodeKind::Binary => "Binary",
            NodeKind::Opaque => "Opaque",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
