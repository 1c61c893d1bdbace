//! Tests for document-order selection and location handles.

use super::*;

struct Fixture {
    tree: SyntaxTree,
    outer_decl: NodeIndex,
    inner_decl: NodeIndex,
    last_decl: NodeIndex,
}

/// ```text
/// const a = () => { let b = 1; };
/// var c = a;
/// ```
fn nested_fixture() -> Fixture {
    let mut arena = NodeArena::new();
    let b = arena.add_identifier("b", None);
    let one = arena.add_literal(LiteralValue::Number(1.0), None);
    let inner_decl = arena.add_declaration(DeclarationKind::Let, b, one, None);
    let body = arena.add_block(vec![inner_decl], None);
    let arrow = arena.add_function(FunctionKind::Arrow, NodeIndex::NONE, vec![], body, None);
    let a = arena.add_identifier("a", None);
    let outer_decl = arena.add_declaration(DeclarationKind::Const, a, arrow, None);
    let c = arena.add_identifier("c", None);
    let a_ref = arena.add_identifier("a", None);
    let last_decl = arena.add_declaration(DeclarationKind::Var, c, a_ref, None);
    let root = arena.add_source_file(vec![outer_decl, last_decl]);
    Fixture {
        tree: SyntaxTree::new(arena, root),
        outer_decl,
        inner_decl,
        last_decl,
    }
}

#[test]
fn test_find_returns_document_order() {
    let fx = nested_fixture();
    let query = TreeQuery::new(&fx.tree.arena, fx.tree.root);
    let found: Vec<NodeIndex> = query
        .find(NodeKind::VariableDeclaration)
        .iter()
        .map(|path| path.node)
        .collect();
    // Outer declaration precedes the one nested in its initializer.
    assert_eq!(found, vec![fx.outer_decl, fx.inner_decl, fx.last_decl]);
}

#[test]
fn test_find_identifiers_in_order() {
    let fx = nested_fixture();
    let arena = &fx.tree.arena;
    let names: Vec<&str> = TreeQuery::new(arena, fx.tree.root)
        .find(NodeKind::Identifier)
        .iter()
        .filter_map(|path| arena.identifier_text(path.node))
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "a"]);
}

#[test]
fn test_find_where_filters() {
    let fx = nested_fixture();
    let query = TreeQuery::new(&fx.tree.arena, fx.tree.root);
    let consts = query.find_where(NodeKind::VariableDeclaration, |arena, idx| {
        arena
            .get_declaration(idx)
            .is_some_and(|decl| decl.kind == DeclarationKind::Const)
    });
    assert_eq!(consts.len(), 1);
    assert_eq!(consts[0].node, fx.outer_decl);
    assert_eq!(consts[0].parent, fx.tree.root);
}

#[test]
fn test_find_any_interleaves_kinds() {
    let fx = nested_fixture();
    let arena = &fx.tree.arena;
    let kinds: Vec<NodeKind> = TreeQuery::new(arena, fx.tree.root)
        .find_any(&[NodeKind::Function, NodeKind::VariableDeclaration], |_, _| true)
        .iter()
        .filter_map(|path| path.kind(arena))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::VariableDeclaration,
            NodeKind::Function,
            NodeKind::VariableDeclaration,
            NodeKind::VariableDeclaration,
        ]
    );
}

#[test]
fn test_find_skips_detached_nodes() {
    let mut fx = nested_fixture();
    fx.tree.arena.remove_statement(fx.outer_decl).expect("remove outer");

    let found = TreeQuery::new(&fx.tree.arena, fx.tree.root).find(NodeKind::VariableDeclaration);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].node, fx.last_decl);
}

#[test]
fn test_path_remove_then_stale_handle_fails() {
    let mut fx = nested_fixture();
    let query = TreeQuery::new(&fx.tree.arena, fx.tree.root);
    let last = query.find(NodeKind::VariableDeclaration).pop().expect("last declaration");
    let stale = query.find(NodeKind::VariableDeclaration).pop().expect("last declaration");
    assert_eq!(last, stale);

    assert!(last.is_attached(&fx.tree.arena));
    last.remove(&mut fx.tree.arena).expect("first removal");
    assert!(!stale.is_attached(&fx.tree.arena));

    let err = stale.remove(&mut fx.tree.arena).expect_err("stale handle");
    assert_eq!(err.node_kind(), Some(NodeKind::VariableDeclaration));
}

#[test]
fn test_handles_survive_sibling_removal() {
    let mut fx = nested_fixture();
    let mut paths = TreeQuery::new(&fx.tree.arena, fx.tree.root)
        .find(NodeKind::VariableDeclaration)
        .into_iter();
    let first = paths.next().expect("first declaration");
    let last = paths.nth(1).expect("last declaration");

    // Removing the first statement shifts the second one's list position;
    // the handle still resolves because it is keyed by node, not offset.
    first.remove(&mut fx.tree.arena).expect("remove first");
    last.remove(&mut fx.tree.arena).expect("remove last");

    let statements = fx.tree.arena.get_statements(fx.tree.root).expect("statements");
    assert!(statements.is_empty());
}

#[test]
fn test_path_replace() {
    let mut fx = nested_fixture();
    let a_ref = TreeQuery::new(&fx.tree.arena, fx.tree.root)
        .find(NodeKind::Identifier)
        .into_iter()
        .nth(3)
        .expect("fourth identifier");
    let replaced = a_ref.node;

    let replacement = fx.tree.arena.add_identifier("z", None);
    a_ref.replace(&mut fx.tree.arena, replacement).expect("replace");

    let decl = fx.tree.arena.get_declaration(fx.last_decl).expect("declaration");
    assert_eq!(decl.initializer, replacement);
    assert_eq!(fx.tree.arena.parent(replacement), fx.last_decl);
    assert!(fx.tree.arena.parent(replaced).is_none());
}
