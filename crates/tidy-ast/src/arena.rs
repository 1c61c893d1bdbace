//! Node arena for syntax tree storage.
//!
//! Nodes are stored contiguously and referenced by [`NodeIndex`]. Parent
//! pointers live in the node header and are maintained by the builder and the
//! rewrite primitives; `SyntaxTree::relink` rebuilds them from scratch.

use crate::base::{NodeIndex, NodeList};
use crate::error::RewriteError;
use crate::node::{
    AssignmentData, BlockData, FunctionData, MemberAccessData, Node, NodeData, NodeKind,
    VariableDeclarationData,
};
use crate::position::SourceSpan;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Children of a single node, in source order.
pub type Children = SmallVec<[NodeIndex; 4]>;

/// Arena-based storage for syntax tree nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

/// Named single-node slot of a parent node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Expression,
    Name,
    Initializer,
    Condition,
    ThenStatement,
    ElseStatement,
    Body,
    Target,
    Value,
    Callee,
    Object,
    Property,
    Operand,
    Left,
    Right,
}

/// Where a child sits inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildSlot {
    /// Entry of a statement list (source file or block body).
    Statement(usize),
    /// Entry of any other list (call arguments, parameters, opaque children).
    Entry(usize),
    Field(Field),
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeIndex(index)
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    pub fn loc(&self, index: NodeIndex) -> Option<SourceSpan> {
        self.get(index).and_then(|n| n.loc)
    }

    /// Start line of a node, when it carries a location.
    pub fn line(&self, index: NodeIndex) -> Option<u32> {
        self.get(index).and_then(Node::line)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.data {
            NodeData::Identifier(ident) => Some(&ident.text),
            _ => None,
        }
    }

    pub fn get_declaration(&self, index: NodeIndex) -> Option<&VariableDeclarationData> {
        match &self.get(index)?.data {
            NodeData::VariableDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match &self.get(index)?.data {
            NodeData::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn get_assignment(&self, index: NodeIndex) -> Option<&AssignmentData> {
        match &self.get(index)?.data {
            NodeData::Assignment(assign) => Some(assign),
            _ => None,
        }
    }

    pub fn get_member_access(&self, index: NodeIndex) -> Option<&MemberAccessData> {
        match &self.get(index)?.data {
            NodeData::MemberAccess(access) => Some(access),
            _ => None,
        }
    }

    /// Operand of an `Await`; `None` for other kinds or a missing operand.
    pub fn await_operand(&self, index: NodeIndex) -> Option<NodeIndex> {
        match &self.get(index)?.data {
            NodeData::Await(expr) => expr.operand.into_option(),
            _ => None,
        }
    }

    /// Statement list of a `Block` or `SourceFile`.
    pub fn get_statements(&self, index: NodeIndex) -> Option<&NodeList> {
        match &self.get(index)?.data {
            NodeData::Block(BlockData { statements })
            | NodeData::SourceFile(BlockData { statements }) => Some(statements),
            _ => None,
        }
    }

    /// Inner expression of an `ExpressionStatement`.
    pub fn statement_expression(&self, index: NodeIndex) -> Option<NodeIndex> {
        match &self.get(index)?.data {
            NodeData::ExpressionStatement(stmt) => stmt.expression.into_option(),
            _ => None,
        }
    }

    /// Name bound by a declaration, if it is a plain identifier.
    pub fn declared_name(&self, decl: NodeIndex) -> Option<&str> {
        self.identifier_text(self.get_declaration(decl)?.name)
    }

    // =========================================================================
    // Child enumeration
    // =========================================================================

    /// Children of `index` in source order. Absent optional children are skipped.
    pub fn get_children(&self, index: NodeIndex) -> Children {
        let mut children = Children::new();
        let Some(node) = self.get(index) else {
            return children;
        };

        let add_opt = |children: &mut Children, idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };
        let add_list = |children: &mut Children, list: &NodeList| {
            children.extend(list.nodes.iter().copied());
        };

        match &node.data {
            NodeData::SourceFile(block) | NodeData::Block(block) => {
                add_list(&mut children, &block.statements);
            }
            NodeData::ExpressionStatement(stmt) => add_opt(&mut children, stmt.expression),
            NodeData::VariableDeclaration(decl) => {
                add_opt(&mut children, decl.name);
                add_opt(&mut children, decl.initializer);
            }
            NodeData::Return(ret) => add_opt(&mut children, ret.expression),
            NodeData::If(stmt) => {
                add_opt(&mut children, stmt.condition);
                add_opt(&mut children, stmt.then_statement);
                add_opt(&mut children, stmt.else_statement);
            }
            NodeData::Function(func) => {
                add_opt(&mut children, func.name);
                add_list(&mut children, &func.parameters);
                add_opt(&mut children, func.body);
            }
            NodeData::Assignment(assign) => {
                add_opt(&mut children, assign.target);
                add_opt(&mut children, assign.value);
            }
            NodeData::Call(call) => {
                add_opt(&mut children, call.callee);
                add_list(&mut children, &call.arguments);
            }
            NodeData::MemberAccess(access) => {
                add_opt(&mut children, access.object);
                add_opt(&mut children, access.property);
            }
            NodeData::Await(expr) => add_opt(&mut children, expr.operand),
            NodeData::Binary(expr) => {
                add_opt(&mut children, expr.left);
                add_opt(&mut children, expr.right);
            }
            NodeData::Opaque(opaque) => add_list(&mut children, &opaque.children),
            NodeData::Identifier(_) | NodeData::Literal(_) => {}
        }

        children
    }

    /// Locate `child` among the slots of `parent`.
    pub fn child_slot(&self, parent: NodeIndex, child: NodeIndex) -> Option<ChildSlot> {
        if child.is_none() {
            return None;
        }
        let node = self.get(parent)?;
        let at = |idx: NodeIndex, field: Field| (idx == child).then_some(ChildSlot::Field(field));

        match &node.data {
            NodeData::SourceFile(block) | NodeData::Block(block) => {
                block.statements.position(child).map(ChildSlot::Statement)
            }
            NodeData::ExpressionStatement(stmt) => at(stmt.expression, Field::Expression),
            NodeData::VariableDeclaration(decl) => at(decl.name, Field::Name)
                .or_else(|| at(decl.initializer, Field::Initializer)),
            NodeData::Return(ret) => at(ret.expression, Field::Expression),
            NodeData::If(stmt) => at(stmt.condition, Field::Condition)
                .or_else(|| at(stmt.then_statement, Field::ThenStatement))
                .or_else(|| at(stmt.else_statement, Field::ElseStatement)),
            NodeData::Function(func) => at(func.name, Field::Name)
                .or_else(|| at(func.body, Field::Body))
                .or_else(|| func.parameters.position(child).map(ChildSlot::Entry)),
            NodeData::Assignment(assign) => at(assign.target, Field::Target)
                .or_else(|| at(assign.value, Field::Value)),
            NodeData::Call(call) => at(call.callee, Field::Callee)
                .or_else(|| call.arguments.position(child).map(ChildSlot::Entry)),
            NodeData::MemberAccess(access) => at(access.object, Field::Object)
                .or_else(|| at(access.property, Field::Property)),
            NodeData::Await(expr) => at(expr.operand, Field::Operand),
            NodeData::Binary(expr) => {
                at(expr.left, Field::Left).or_else(|| at(expr.right, Field::Right))
            }
            NodeData::Opaque(opaque) => opaque.children.position(child).map(ChildSlot::Entry),
            NodeData::Identifier(_) | NodeData::Literal(_) => None,
        }
    }

    /// Mutable access to a single-node field of `parent`.
    pub(crate) fn field_mut(&mut self, parent: NodeIndex, field: Field) -> Option<&mut NodeIndex> {
        let node = self.get_mut(parent)?;
        let slot = match (&mut node.data, field) {
            (NodeData::ExpressionStatement(stmt), Field::Expression) => &mut stmt.expression,
            (NodeData::VariableDeclaration(decl), Field::Name) => &mut decl.name,
            (NodeData::VariableDeclaration(decl), Field::Initializer) => &mut decl.initializer,
            (NodeData::Return(ret), Field::Expression) => &mut ret.expression,
            (NodeData::If(stmt), Field::Condition) => &mut stmt.condition,
            (NodeData::If(stmt), Field::ThenStatement) => &mut stmt.then_statement,
            (NodeData::If(stmt), Field::ElseStatement) => &mut stmt.else_statement,
            (NodeData::Function(func), Field::Name) => &mut func.name,
            (NodeData::Function(func), Field::Body) => &mut func.body,
            (NodeData::Assignment(assign), Field::Target) => &mut assign.target,
            (NodeData::Assignment(assign), Field::Value) => &mut assign.value,
            (NodeData::Call(call), Field::Callee) => &mut call.callee,
            (NodeData::MemberAccess(access), Field::Object) => &mut access.object,
            (NodeData::MemberAccess(access), Field::Property) => &mut access.property,
            (NodeData::Await(expr), Field::Operand) => &mut expr.operand,
            (NodeData::Binary(expr), Field::Left) => &mut expr.left,
            (NodeData::Binary(expr), Field::Right) => &mut expr.right,
            _ => return None,
        };
        Some(slot)
    }

    /// Mutable access to the one child list `parent` owns, if any.
    pub(crate) fn list_mut(&mut self, parent: NodeIndex) -> Option<&mut NodeList> {
        match &mut self.get_mut(parent)?.data {
            NodeData::SourceFile(block) | NodeData::Block(block) => Some(&mut block.statements),
            NodeData::Function(func) => Some(&mut func.parameters),
            NodeData::Call(call) => Some(&mut call.arguments),
            NodeData::Opaque(opaque) => Some(&mut opaque.children),
            _ => None,
        }
    }

    // =========================================================================
    // Error construction
    // =========================================================================

    /// Build a `StructuralMismatch` carrying the node's kind and location.
    pub fn mismatch(&self, index: NodeIndex, reason: &'static str) -> RewriteError {
        match self.get(index) {
            Some(node) => RewriteError::StructuralMismatch {
                node: index,
                kind: node.kind(),
                loc: node.loc,
                reason,
            },
            None => RewriteError::MissingNode { node: index },
        }
    }
}
