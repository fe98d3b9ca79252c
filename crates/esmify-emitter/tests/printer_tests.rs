//! Integration tests for the printer.

use esmify_ast::{NodeArena, build};
use esmify_emitter::{PrintOptions, print};
use esmify_parser::parse;

fn roundtrip(source: &str) -> String {
    let module = parse(source).unwrap();
    print(&module.arena, module.root, &PrintOptions::default())
}

#[test]
fn prints_variable_declarations() {
    assert_eq!(roundtrip("var a = 1, b;"), "var a = 1, b;\n");
}

#[test]
fn prints_functions_and_blocks() {
    let output = roundtrip("define(['a'], function (a) { return a; });");
    assert_eq!(
        output,
        "define(['a'], function (a) {\n    return a;\n});\n"
    );
}

#[test]
fn preserves_string_quoting() {
    assert_eq!(roundtrip("f(\"x\", 'y');"), "f(\"x\", 'y');\n");
}

#[test]
fn preserves_parentheses() {
    assert_eq!(roundtrip("x = (a + b) * c;"), "x = (a + b) * c;\n");
}

#[test]
fn prints_object_literals_multiline() {
    let output = roundtrip("x = { a: 1, b: 2 };");
    assert_eq!(output, "x = {\n    a: 1,\n    b: 2\n};\n");
}

#[test]
fn prints_if_else_chains() {
    let output = roundtrip("if (a) { f(); } else if (b) { g(); } else { h(); }");
    assert_eq!(
        output,
        "if (a) {\n    f();\n} else if (b) {\n    g();\n} else {\n    h();\n}\n"
    );
}

#[test]
fn prints_member_and_call_chains() {
    assert_eq!(roundtrip("a.b['c'](d, e);"), "a.b['c'](d, e);\n");
}

#[test]
fn prints_synthesized_imports_and_exports() {
    let mut arena = NodeArena::new();
    let import = build::import_declaration(&mut arena, Some("dep"), "path/dep");
    let bare = build::import_declaration(&mut arena, None, "side-effect");
    let value = build::identifier(&mut arena, "dep");
    let export = build::export_default(&mut arena, value);
    let root = arena.add(
        esmify_ast::NodeKind::Program {
            body: vec![import, bare, export],
        },
        esmify_ast::Span::SYNTHETIC,
    );
    let output = print(&arena, root, &PrintOptions::default());
    assert_eq!(
        output,
        "import dep from 'path/dep';\nimport 'side-effect';\nexport default dep;\n"
    );
}

#[test]
fn separates_sections_when_asked() {
    let mut arena = NodeArena::new();
    let import = build::import_declaration(&mut arena, Some("a"), "a");
    let callee = build::identifier(&mut arena, "run");
    let call = arena.add(
        esmify_ast::NodeKind::CallExpression {
            callee,
            arguments: vec![],
        },
        esmify_ast::Span::SYNTHETIC,
    );
    let statement = build::expression_statement(&mut arena, call);
    let value = build::identifier(&mut arena, "a");
    let export = build::export_default(&mut arena, value);
    let root = arena.add(
        esmify_ast::NodeKind::Program {
            body: vec![import, statement, export],
        },
        esmify_ast::Span::SYNTHETIC,
    );
    let output = print(
        &arena,
        root,
        &PrintOptions {
            separate_sections: true,
        },
    );
    assert_eq!(
        output,
        "import a from 'a';\n\nrun();\n\nexport default a;\n"
    );
}

#[test]
fn prints_arrow_functions() {
    assert_eq!(roundtrip("f(x => x + 1);"), "f(x => x + 1);\n");
    assert_eq!(
        roundtrip("f((a, b) => { return a; });"),
        "f((a, b) => {\n    return a;\n});\n"
    );
}

#[test]
fn keeps_unary_signs_apart() {
    assert_eq!(roundtrip("x = - -y;"), "x = - -y;\n");
    assert_eq!(roundtrip("x = typeof y;"), "x = typeof y;\n");
}
