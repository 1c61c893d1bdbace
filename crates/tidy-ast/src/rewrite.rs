//! In-place mutation primitives used by the cleanup passes.
//!
//! Every primitive either commits fully or returns an error before touching
//! the arena, and every one keeps parent pointers consistent. Nodes taken out
//! of the tree are detached (parent `NONE`) but keep their arena slot.

use crate::arena::{ChildSlot, Field, NodeArena};
use crate::base::NodeIndex;
use crate::error::RewriteError;
use crate::node::{DeclarationKind, NodeData, NodeKind};
use tracing::trace;

/// What a slot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotRole {
    /// A statement; bare expressions get wrapped in an `ExpressionStatement`.
    Statement,
    Expression,
    /// The expression of an `ExpressionStatement`. Generated trees sometimes
    /// put a declaration here, so that is accepted too.
    StatementExpression,
    /// A binding name (identifier or pattern).
    Binding,
    /// Function body: a block or a concise expression.
    Body,
    Any,
}

fn slot_role(parent_kind: NodeKind, slot: ChildSlot) -> SlotRole {
    match slot {
        ChildSlot::Statement(_) => SlotRole::Statement,
        ChildSlot::Entry(_) => match parent_kind {
            NodeKind::Call => SlotRole::Expression,
            NodeKind::Function => SlotRole::Binding,
            _ => SlotRole::Any,
        },
        ChildSlot::Field(field) => match (parent_kind, field) {
            (NodeKind::ExpressionStatement, Field::Expression) => SlotRole::StatementExpression,
            (NodeKind::If, Field::ThenStatement | Field::ElseStatement) => SlotRole::Statement,
            (_, Field::Name) => SlotRole::Binding,
            (NodeKind::Function, Field::Body) => SlotRole::Body,
            _ => SlotRole::Expression,
        },
    }
}

/// Slots that may be left empty.
fn slot_is_optional(parent_kind: NodeKind, field: Field) -> bool {
    matches!(
        (parent_kind, field),
        (NodeKind::Return, Field::Expression)
            | (NodeKind::VariableDeclaration, Field::Initializer)
            | (NodeKind::If, Field::ElseStatement)
            | (NodeKind::Function, Field::Name)
    )
}

impl NodeArena {
    /// Swap `target` for `replacement` in whatever slot `target` occupies.
    ///
    /// `replacement` must be fresh (no parent) or a descendant of `target`.
    pub fn replace_node(
        &mut self,
        target: NodeIndex,
        replacement: NodeIndex,
    ) -> Result<(), RewriteError> {
        if target == replacement {
            return Ok(());
        }
        let (parent, slot) = self.attached_slot(target)?;
        let replacement_kind = self
            .kind(replacement)
            .ok_or(RewriteError::MissingNode { node: replacement })?;
        let current_parent = self.parent(replacement);
        if current_parent.is_some() && !self.is_descendant(replacement, target) {
            return Err(self.mismatch(replacement, "replacement is already attached elsewhere"));
        }

        let parent_kind = self.kind(parent).ok_or(RewriteError::MissingNode { node: parent })?;
        let fitted = self.fit_to_role(slot_role(parent_kind, slot), replacement, replacement_kind)?;
        self.write_slot(parent, slot, fitted)?;
        self.set_parent(fitted, parent);
        self.detach(target);
        trace!(
            target = target.0,
            replacement = fitted.0,
            kind = %replacement_kind,
            "replaced node"
        );
        Ok(())
    }

    /// Remove a node from its slot without leaving a hole.
    ///
    /// List entries are dropped from the list. The expression of an
    /// `ExpressionStatement` takes the whole statement with it. Optional slots
    /// are cleared, and a required single-statement slot gets an empty block.
    /// Any other required slot is a `StructuralMismatch`.
    pub fn remove_node(&mut self, node: NodeIndex) -> Result<(), RewriteError> {
        let (parent, slot) = self.attached_slot(node)?;
        let parent_kind = self.kind(parent).ok_or(RewriteError::MissingNode { node: parent })?;

        match slot {
            ChildSlot::Statement(index) | ChildSlot::Entry(index) => {
                let list = self
                    .list_mut(parent)
                    .ok_or(RewriteError::MissingNode { node: parent })?;
                list.nodes.remove(index);
            }
            ChildSlot::Field(Field::Expression) if parent_kind == NodeKind::ExpressionStatement => {
                self.remove_node(parent)?;
                self.detach(node);
                return Ok(());
            }
            ChildSlot::Field(field) if slot_is_optional(parent_kind, field) => {
                self.write_slot(parent, slot, NodeIndex::NONE)?;
            }
            ChildSlot::Field(Field::ThenStatement) => {
                let empty = self.add_block(Vec::new(), None);
                self.write_slot(parent, slot, empty)?;
                self.set_parent(empty, parent);
            }
            ChildSlot::Field(_) => {
                return Err(self.mismatch(node, "cannot remove a node from a required slot"));
            }
        }

        self.detach(node);
        trace!(node = node.0, parent = parent.0, "removed node");
        Ok(())
    }

    /// Delete a statement from its containing statement list.
    pub fn remove_statement(&mut self, stmt: NodeIndex) -> Result<(), RewriteError> {
        let kind = self.kind(stmt).ok_or(RewriteError::MissingNode { node: stmt })?;
        if !kind.is_statement() {
            return Err(self.mismatch(stmt, "expected a statement"));
        }
        self.remove_node(stmt)
    }

    /// Insert `stmt` right after `anchor` in `anchor`'s statement list.
    pub fn insert_after(&mut self, anchor: NodeIndex, stmt: NodeIndex) -> Result<(), RewriteError> {
        let (parent, slot) = self.attached_slot(anchor)?;
        let ChildSlot::Statement(index) = slot else {
            return Err(self.mismatch(anchor, "anchor is not in a statement list"));
        };
        if self.parent(stmt).is_some() {
            return Err(self.mismatch(stmt, "inserted statement is already attached"));
        }
        let kind = self.kind(stmt).ok_or(RewriteError::MissingNode { node: stmt })?;
        let fitted = self.fit_to_role(SlotRole::Statement, stmt, kind)?;

        let list = self
            .list_mut(parent)
            .ok_or(RewriteError::MissingNode { node: parent })?;
        list.nodes.insert(index + 1, fitted);
        self.set_parent(fitted, parent);
        trace!(anchor = anchor.0, inserted = fitted.0, "inserted statement");
        Ok(())
    }

    /// Change the mutability tag of a declaration.
    pub fn set_declaration_kind(
        &mut self,
        decl: NodeIndex,
        kind: DeclarationKind,
    ) -> Result<(), RewriteError> {
        let Some(node) = self.get_mut(decl) else {
            return Err(RewriteError::MissingNode { node: decl });
        };
        if let NodeData::VariableDeclaration(data) = &mut node.data {
            data.kind = kind;
            trace!(node = decl.0, kind = kind.keyword(), "changed declaration kind");
            return Ok(());
        }
        Err(self.mismatch(decl, "expected a variable declaration"))
    }

    /// Mark a node as no longer part of the tree.
    pub fn detach(&mut self, node: NodeIndex) {
        self.set_parent(node, NodeIndex::NONE);
    }

    /// Whether `ancestor` is on the parent chain of `node`.
    pub fn is_descendant(&self, node: NodeIndex, ancestor: NodeIndex) -> bool {
        let mut current = self.parent(node);
        // Parent chains are acyclic, but bound the walk by the arena size anyway.
        for _ in 0..self.len() {
            if current.is_none() {
                return false;
            }
            if current == ancestor {
                return true;
            }
            current = self.parent(current);
        }
        false
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn attached_slot(&self, node: NodeIndex) -> Result<(NodeIndex, ChildSlot), RewriteError> {
        let parent = self
            .get(node)
            .ok_or(RewriteError::MissingNode { node })?
            .parent;
        if parent.is_none() {
            return Err(self.mismatch(node, "node is not attached to the tree"));
        }
        self.child_slot(parent, node)
            .map(|slot| (parent, slot))
            .ok_or_else(|| self.mismatch(node, "parent does not hold this node"))
    }

    fn write_slot(
        &mut self,
        parent: NodeIndex,
        slot: ChildSlot,
        value: NodeIndex,
    ) -> Result<(), RewriteError> {
        match slot {
            ChildSlot::Statement(index) | ChildSlot::Entry(index) => {
                let entry = self
                    .list_mut(parent)
                    .and_then(|list| list.nodes.get_mut(index));
                match entry {
                    Some(entry) => *entry = value,
                    None => return Err(self.mismatch(parent, "list slot out of range")),
                }
            }
            ChildSlot::Field(field) => match self.field_mut(parent, field) {
                Some(entry) => *entry = value,
                None => return Err(self.mismatch(parent, "node has no such field")),
            },
        }
        Ok(())
    }

    /// Check `node` can fill a slot of `role`, wrapping expressions placed in
    /// statement position.
    fn fit_to_role(
        &mut self,
        role: SlotRole,
        node: NodeIndex,
        kind: NodeKind,
    ) -> Result<NodeIndex, RewriteError> {
        let accepted = match role {
            SlotRole::Statement => {
                if kind.is_statement() {
                    true
                } else if kind.is_expression() {
                    let loc = self.loc(node);
                    return Ok(self.add_expression_statement(node, loc));
                } else {
                    false
                }
            }
            SlotRole::Expression => kind.is_expression(),
            SlotRole::StatementExpression => {
                kind.is_expression() || kind == NodeKind::VariableDeclaration
            }
            SlotRole::Binding => matches!(kind, NodeKind::Identifier | NodeKind::Opaque),
            SlotRole::Body => kind == NodeKind::Block || kind.is_expression(),
            SlotRole::Any => kind != NodeKind::SourceFile,
        };
        if accepted {
            Ok(node)
        } else {
            Err(self.mismatch(node, "node does not fit the syntactic role of the slot"))
        }
    }
}
