use super::*;
use crate::passes::StripUnusedAwaits;
use crate::test_fixtures::{TestTree, render};
use tidy_ast::{DeclarationKind, NodeIndex, NodeKind, SyntaxTree};

fn run_twice(mut tree: SyntaxTree) -> (SyntaxTree, SyntaxTree) {
    StripUnusedAwaits.run(&mut tree).expect("first run");
    let once = tree.clone();
    StripUnusedAwaits.run(&mut tree).expect("second run");
    (once, tree)
}

#[test]
fn test_literal_await_statement_removed() {
    // await 42;
    let mut t = TestTree::new();
    let lit = t.num(42.0);
    let awaited = t.await_(lit);
    let stmt = t.stmt(awaited);
    let mut tree = t.finish(vec![stmt]);

    assert_eq!(StripUnusedAwaits.run(&mut tree).expect("run"), 1);
    assert_eq!(render(&tree), "");
    assert!(tree.arena.get_statements(tree.root).expect("statements").is_empty());
}

#[test]
fn test_plain_member_await_unwrapped() {
    // await obj.value;
    let mut t = TestTree::new();
    let obj = t.ident("obj");
    let access = t.member(obj, "value");
    let awaited = t.await_(access);
    let stmt = t.stmt(awaited);
    let mut tree = t.finish(vec![stmt]);

    assert_eq!(StripUnusedAwaits.run(&mut tree).expect("run"), 1);
    assert_eq!(render(&tree), "obj.value;");
    assert_eq!(tree.arena.statement_expression(stmt), Some(access));
}

#[test]
fn test_call_and_identifier_awaits_kept() {
    // await load(); await pending; await obj.method();
    let mut t = TestTree::new();
    let call = t.call("load", vec![]);
    let a1 = t.await_(call);
    let s1 = t.stmt(a1);
    let pending = t.ident("pending");
    let a2 = t.await_(pending);
    let s2 = t.stmt(a2);
    let obj = t.ident("obj");
    let method = t.member(obj, "method");
    let method_call = t.arena.add_call(method, vec![], None);
    let a3 = t.await_(method_call);
    let s3 = t.stmt(a3);
    let mut tree = t.finish(vec![s1, s2, s3]);

    assert_eq!(StripUnusedAwaits.run(&mut tree).expect("run"), 0);
    assert_eq!(render(&tree), "await load(); await pending; await obj.method();");
}

#[test]
fn test_computed_member_with_literal_key_kept() {
    // await items[0];
    let mut t = TestTree::new();
    let items = t.ident("items");
    let zero = t.num(0.0);
    let access = t.arena.add_element_access(items, zero, None);
    let awaited = t.await_(access);
    let stmt = t.stmt(awaited);
    let mut tree = t.finish(vec![stmt]);

    assert_eq!(StripUnusedAwaits.run(&mut tree).expect("run"), 0);
    assert_eq!(render(&tree), "await items[0];");
}

#[test]
fn test_nested_literal_await_replaced_by_literal() {
    // const x = await "ready";
    let mut t = TestTree::new();
    let lit = t.string("ready");
    let awaited = t.await_(lit);
    let decl = t.decl(DeclarationKind::Const, "x", awaited);
    let mut tree = t.finish(vec![decl]);

    StripUnusedAwaits.run(&mut tree).expect("run");
    assert_eq!(render(&tree), "const x = \"ready\";");
    assert_eq!(tree.arena.parent(lit), decl);
}

#[test]
fn test_nested_awaits_reach_fixed_point() {
    // await (await 1); await (await obj.value);
    let mut t = TestTree::new();
    let one = t.num(1.0);
    let inner = t.await_(one);
    let outer = t.await_(inner);
    let s1 = t.stmt(outer);
    let obj = t.ident("obj");
    let access = t.member(obj, "value");
    let inner2 = t.await_(access);
    let outer2 = t.await_(inner2);
    let s2 = t.stmt(outer2);
    let tree = t.finish(vec![s1, s2]);

    let (once, twice) = run_twice(tree);
    assert_eq!(render(&once), "obj.value;");
    assert_eq!(once, twice);
}

#[test]
fn test_idempotent_on_mixed_input() {
    // await 1; x = await obj.a.b; await fetch(); f(await 2);
    let mut t = TestTree::new();
    let one = t.num(1.0);
    let a1 = t.await_(one);
    let s1 = t.stmt(a1);
    let obj = t.ident("obj");
    let a = t.member(obj, "a");
    let b = t.member(a, "b");
    let a2 = t.await_(b);
    let assign = t.assign("x", a2);
    let s2 = t.stmt(assign);
    let fetch = t.call("fetch", vec![]);
    let a3 = t.await_(fetch);
    let s3 = t.stmt(a3);
    let two = t.num(2.0);
    let a4 = t.await_(two);
    let call = t.call("f", vec![a4]);
    let s4 = t.stmt(call);
    let tree = t.finish(vec![s1, s2, s3, s4]);

    let (once, twice) = run_twice(tree);
    assert_eq!(render(&once), "x = obj.a.b; await fetch(); f(2);");
    assert_eq!(once, twice);
}

#[test]
fn test_await_inside_opaque_unwrapped_in_place() {
    let mut t = TestTree::new();
    let obj = t.ident("obj");
    let access = t.member(obj, "value");
    let awaited = t.await_(access);
    let opaque = t.arena.add_opaque("TemplateLiteral", vec![awaited], None);
    let stmt = t.stmt(opaque);
    let mut tree = t.finish(vec![stmt]);

    StripUnusedAwaits.run(&mut tree).expect("run");
    assert_eq!(tree.arena.get_children(opaque).as_slice(), &[access]);
    assert_eq!(tree.arena.kind(stmt), Some(NodeKind::ExpressionStatement));
}

#[test]
fn test_await_without_operand_is_mismatch() {
    let mut t = TestTree::new();
    let awaited = t.await_(NodeIndex::NONE);
    let stmt = t.stmt(awaited);
    let mut tree = t.finish(vec![stmt]);

    let err = StripUnusedAwaits.run(&mut tree).expect_err("no operand");
    assert_eq!(err.node_kind(), Some(NodeKind::Await));
}
