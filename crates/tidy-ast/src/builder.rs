//! NodeArena creation methods (add_* methods).
//!
//! Trees are built bottom-up: children are created before their parent, and
//! each `add_*` method links the children it receives to the new node.

use crate::arena::NodeArena;
use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::position::SourceSpan;

impl NodeArena {
    // =========================================================================
    // Parent Mapping Helpers
    // =========================================================================

    #[inline]
    pub(crate) fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &[NodeIndex], parent: NodeIndex) {
        for &child in list {
            self.set_parent(child, parent);
        }
    }

    /// Add a node and point every child it references back at it.
    pub fn add_linked(&mut self, data: NodeData, loc: Option<SourceSpan>) -> NodeIndex {
        let index = self.add(Node::new(data, loc));
        let children = self.get_children(index);
        self.set_parent_list(&children, index);
        index
    }

    // =========================================================================
    // Node Creation Methods
    // =========================================================================

    pub fn add_source_file(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        let data = NodeData::SourceFile(BlockData {
            statements: NodeList::from(statements),
        });
        self.add_linked(data, None)
    }

    pub fn add_block(&mut self, statements: Vec<NodeIndex>, loc: Option<SourceSpan>) -> NodeIndex {
        let data = NodeData::Block(BlockData {
            statements: NodeList::from(statements),
        });
        self.add_linked(data, loc)
    }

    pub fn add_expression_statement(
        &mut self,
        expression: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::ExpressionStatement(ExpressionStatementData { expression });
        self.add_linked(data, loc)
    }

    /// `kind name = initializer`. Pass `NodeIndex::NONE` for no initializer.
    pub fn add_declaration(
        &mut self,
        kind: DeclarationKind,
        name: NodeIndex,
        initializer: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::VariableDeclaration(VariableDeclarationData {
            kind,
            name,
            initializer,
        });
        self.add_linked(data, loc)
    }

    pub fn add_return(&mut self, expression: NodeIndex, loc: Option<SourceSpan>) -> NodeIndex {
        self.add_linked(NodeData::Return(ReturnData { expression }), loc)
    }

    pub fn add_if(
        &mut self,
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::If(IfData {
            condition,
            then_statement,
            else_statement,
        });
        self.add_linked(data, loc)
    }

    pub fn add_function(
        &mut self,
        kind: FunctionKind,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::Function(FunctionData {
            kind,
            name,
            parameters: NodeList::from(parameters),
            body,
            is_async: false,
        });
        self.add_linked(data, loc)
    }

    pub fn add_assignment(
        &mut self,
        target: NodeIndex,
        value: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        self.add_linked(NodeData::Assignment(AssignmentData { target, value }), loc)
    }

    pub fn add_identifier(&mut self, text: impl Into<String>, loc: Option<SourceSpan>) -> NodeIndex {
        let data = NodeData::Identifier(IdentifierData { text: text.into() });
        self.add(Node::new(data, loc))
    }

    pub fn add_literal(&mut self, value: LiteralValue, loc: Option<SourceSpan>) -> NodeIndex {
        self.add(Node::new(NodeData::Literal(LiteralData { value }), loc))
    }

    pub fn add_call(
        &mut self,
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::Call(CallData {
            callee,
            arguments: NodeList::from(arguments),
        });
        self.add_linked(data, loc)
    }

    /// `object.property`
    pub fn add_member_access(
        &mut self,
        object: NodeIndex,
        property: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::MemberAccess(MemberAccessData {
            object,
            property,
            computed: false,
        });
        self.add_linked(data, loc)
    }

    /// `object[property]`
    pub fn add_element_access(
        &mut self,
        object: NodeIndex,
        property: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::MemberAccess(MemberAccessData {
            object,
            property,
            computed: true,
        });
        self.add_linked(data, loc)
    }

    pub fn add_await(&mut self, operand: NodeIndex, loc: Option<SourceSpan>) -> NodeIndex {
        self.add_linked(NodeData::Await(AwaitData { operand }), loc)
    }

    pub fn add_binary(
        &mut self,
        left: NodeIndex,
        operator: impl Into<String>,
        right: NodeIndex,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::Binary(BinaryData {
            left,
            operator: operator.into(),
            right,
        });
        self.add_linked(data, loc)
    }

    pub fn add_opaque(
        &mut self,
        label: impl Into<String>,
        children: Vec<NodeIndex>,
        loc: Option<SourceSpan>,
    ) -> NodeIndex {
        let data = NodeData::Opaque(OpaqueData {
            label: label.into(),
            children: NodeList::from(children),
        });
        self.add_linked(data, loc)
    }
}
