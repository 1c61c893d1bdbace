//! Give function bodies an explicit result.
//!
//! Only the top-level block of a function expression or arrow function is
//! inspected, and only its final statement:
//!
//! ```text
//! () => { let x = f(); }    =>   () => { let x = f(); return x; }
//! () => { g(); }            =>   () => { return g(); }
//! ```

use super::RewritePass;
use tidy_ast::{FunctionKind, NodeArena, NodeIndex, NodeKind, RewriteError, SyntaxTree, TreeQuery};
use tracing::{debug, trace};

pub struct ReturnLastDeclaration;

enum Completion {
    /// Append `return <name>;` after the statement.
    ReturnName { anchor: NodeIndex, name: String },
    /// Turn `call();` into `return call();`.
    ReturnCall { statement: NodeIndex, call: NodeIndex },
}

fn is_completable_body(arena: &NodeArena, block: NodeIndex) -> bool {
    let func = arena.parent(block);
    arena.get_function(func).is_some_and(|data| {
        data.body == block && matches!(data.kind, FunctionKind::Expression | FunctionKind::Arrow)
    })
}

/// Plan the edit for a function body, if its last statement has a known shape.
fn plan(arena: &NodeArena, block: NodeIndex) -> Option<Completion> {
    let last = arena.get_statements(block)?.last()?;

    // A declaration counts whether it sits bare in the list or wrapped in an
    // expression statement.
    let wrapped = arena.statement_expression(last);
    let inner = wrapped.unwrap_or(last);
    match arena.kind(inner)? {
        NodeKind::VariableDeclaration => {
            let name = arena.declared_name(inner)?;
            Some(Completion::ReturnName {
                anchor: last,
                name: name.to_string(),
            })
        }
        NodeKind::Call if wrapped.is_some() => Some(Completion::ReturnCall {
            statement: last,
            call: inner,
        }),
        _ => None,
    }
}

impl RewritePass for ReturnLastDeclaration {
    fn name(&self) -> &'static str {
        "returnLastDeclaration"
    }

    fn run(&self, tree: &mut SyntaxTree) -> Result<usize, RewriteError> {
        let arena = &tree.arena;
        let plans: Vec<Completion> = TreeQuery::new(arena, tree.root)
            .find_where(NodeKind::Block, is_completable_body)
            .into_iter()
            .filter_map(|path| plan(arena, path.node))
            .collect();

        let arena = &mut tree.arena;
        for completion in &plans {
            match completion {
                Completion::ReturnName { anchor, name } => {
                    let value = arena.add_identifier(name.as_str(), None);
                    let ret = arena.add_return(value, None);
                    arena.insert_after(*anchor, ret)?;
                    trace!(anchor = anchor.0, name = %name, "appended return of declared name");
                }
                Completion::ReturnCall { statement, call } => {
                    let loc = arena.loc(*statement);
                    let ret = arena.add_return(*call, loc);
                    arena.replace_node(*statement, ret)?;
                    trace!(statement = statement.0, "returned trailing call");
                }
            }
        }

        debug!(completed = plans.len(), "completed function bodies");
        Ok(plans.len())
    }
}
