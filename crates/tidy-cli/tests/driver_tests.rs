use crate::args::CliArgs;
use crate::driver::*;
use clap::Parser;
use tempfile::TempDir;
use tidy_ast::{DeclarationKind, LiteralValue, NodeArena, NodeKind, SourceSpan, SyntaxTree};
use tidy_rules::PassId;

/// ```text
/// 1: const a = 1;
/// 2: a = 2;
/// ```
fn const_then_assign() -> SyntaxTree {
    let mut arena = NodeArena::new();
    let line1 = Some(SourceSpan::on_line(1, 0, 12));
    let line2 = Some(SourceSpan::on_line(2, 0, 6));
    let name = arena.add_identifier("a", line1);
    let one = arena.add_literal(LiteralValue::Number(1.0), line1);
    let decl = arena.add_declaration(DeclarationKind::Const, name, one, line1);
    let target = arena.add_identifier("a", line2);
    let two = arena.add_literal(LiteralValue::Number(2.0), line2);
    let assign = arena.add_assignment(target, two, line2);
    let stmt = arena.add_expression_statement(assign, line2);
    let root = arena.add_source_file(vec![decl, stmt]);
    SyntaxTree::new(arena, root)
}

fn first_declaration_kind(tree: &SyntaxTree) -> Option<DeclarationKind> {
    let first = tree.arena.get_statements(tree.root)?.first()?;
    tree.arena.get_declaration(first).map(|decl| decl.kind)
}

#[test]
fn test_process_rewrites_serialized_tree() {
    let source = serde_json::to_string(&const_then_assign()).expect("serialize");

    let output = process(&source, &[PassId::ConstToLet], false).expect("process");
    assert!(output.ends_with('\n'));
    let tree = parse_tree(&output).expect("reparse");
    assert_eq!(first_declaration_kind(&tree), Some(DeclarationKind::Let));
}

#[test]
fn test_process_with_empty_pass_list_keeps_tree() {
    let original = const_then_assign();
    let source = serde_json::to_string(&original).expect("serialize");

    let output = process(&source, &[], true).expect("process");
    assert!(output.contains("\n  "), "pretty output is indented");
    assert_eq!(parse_tree(&output).expect("reparse"), original);
}

#[test]
fn test_parse_tree_rejects_dangling_index() {
    let source = r#"{
        "arena": [
            { "data": { "type": "expressionStatement", "expression": 7 } },
            { "data": { "type": "sourceFile", "statements": [0] } }
        ],
        "root": 1
    }"#;
    let err = parse_tree(source).expect_err("dangling child");
    assert!(format!("{err:#}").contains("does not exist"), "{err:#}");
}

#[test]
fn test_parse_tree_accepts_minimal_json() {
    let source = r#"{
        "arena": [
            { "data": { "type": "identifier", "text": "x" }, "loc": { "start": { "line": 3, "column": 0 }, "end": { "line": 3, "column": 1 } } },
            { "data": { "type": "await", "operand": 0 } },
            { "data": { "type": "expressionStatement", "expression": 1 } },
            { "data": { "type": "sourceFile", "statements": [2] } }
        ],
        "root": 3
    }"#;
    let tree = parse_tree(source).expect("parse");
    assert_eq!(tree.arena.kind(tree.root), Some(NodeKind::SourceFile));
    assert_eq!(tree.arena.line(tidy_ast::NodeIndex(0)), Some(3));
    assert_eq!(tree.arena.parent(tidy_ast::NodeIndex(1)), tidy_ast::NodeIndex(2));
}

#[test]
fn test_pipeline_failure_surfaces_pass_name() {
    let mut tree = const_then_assign();
    // Second const `a` without initializer.
    let name = tree.arena.add_identifier("a", None);
    let redecl = tree
        .arena
        .add_declaration(DeclarationKind::Const, name, tidy_ast::NodeIndex::NONE, None);
    let mut statements = tree.arena.get_statements(tree.root).expect("statements").nodes.clone();
    statements.push(redecl);
    tree.root = tree.arena.add_source_file(statements);
    let source = serde_json::to_string(&tree).expect("serialize");

    let err = process(&source, &PassId::DEFAULT, false).expect_err("mismatch");
    let message = format!("{err:#}");
    assert!(message.contains("constToLet"), "{message}");
    assert!(message.contains("VariableDeclaration"), "{message}");
}

#[test]
fn test_run_writes_output_file() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("tree.json");
    let output = dir.path().join("out.json");
    let source = serde_json::to_string(&const_then_assign()).expect("serialize");
    std::fs::write(&input, source).expect("write input");

    let input_arg = input.display().to_string();
    let output_arg = output.display().to_string();
    let args = CliArgs::try_parse_from([
        "tidy",
        input_arg.as_str(),
        "--output",
        output_arg.as_str(),
        "--pass",
        "constToLet",
    ])
    .expect("parse args");
    run(&args, dir.path()).expect("run");

    let written = std::fs::read_to_string(&output).expect("read output");
    let tree = parse_tree(&written).expect("reparse");
    assert_eq!(first_declaration_kind(&tree), Some(DeclarationKind::Let));
}

#[test]
fn test_run_uses_config_from_working_directory() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("tidy.json"), r#"{ "passes": ["asyncify"] }"#)
        .expect("write config");
    let input = dir.path().join("tree.json");
    let output = dir.path().join("out.json");
    let original = const_then_assign();
    std::fs::write(&input, serde_json::to_string(&original).expect("serialize"))
        .expect("write input");

    let input_arg = input.display().to_string();
    let output_arg = output.display().to_string();
    let args = CliArgs::try_parse_from(["tidy", input_arg.as_str(), "-o", output_arg.as_str()])
        .expect("parse args");
    run(&args, dir.path()).expect("run");

    let written = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(parse_tree(&written).expect("reparse"), original);
}

#[test]
fn test_list_passes_prints_resolved_list_without_reading_input() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("tidy.json"),
        r#"{ "passes": ["stripUnused", "asyncify"] }"#,
    )
    .expect("write config");
    // The input does not exist; listing must not try to read it.
    let missing = dir.path().join("missing.json").display().to_string();

    let args = CliArgs::try_parse_from(["tidy", missing.as_str(), "--listPasses"])
        .expect("parse args");
    let mut stdout = Vec::new();
    run_with_stdout(&args, dir.path(), &mut stdout).expect("run");

    assert_eq!(String::from_utf8(stdout).expect("utf8"), "stripUnused\nasyncify\n");
}

#[test]
fn test_list_passes_honours_pass_flags_and_kebab_alias() {
    let dir = TempDir::new().expect("temp dir");
    let args = CliArgs::try_parse_from([
        "tidy",
        "--list-passes",
        "-p",
        "returnLastDeclaration",
        "-p",
        "constToLet",
    ])
    .expect("parse args");
    let mut stdout = Vec::new();
    run_with_stdout(&args, dir.path(), &mut stdout).expect("run");

    assert_eq!(
        String::from_utf8(stdout).expect("utf8"),
        "returnLastDeclaration\nconstToLet\n"
    );
}

#[test]
fn test_pass_listing_of_default_pipeline() {
    assert_eq!(
        pass_listing(&PassId::DEFAULT),
        "constToLet\nstripUnusedAwaits\nstripUnused\nreturnLastDeclaration\n"
    );
}
