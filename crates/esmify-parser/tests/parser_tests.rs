//! Integration tests for the parser.

use esmify_ast::{NodeKind, VarKind, find_first};
use esmify_parser::parse;

#[test]
fn parses_define_call_with_dependencies() {
    let module = parse("define(['a', 'b'], function (a, b) { return a + b; });").unwrap();
    let call = find_first(&module.arena, module.root, |arena, index| {
        matches!(arena.kind(index), Some(NodeKind::CallExpression { callee, .. })
            if arena.identifier_text(*callee) == Some("define"))
    });
    let call = call.expect("define call");
    let Some(NodeKind::CallExpression { arguments, .. }) = module.arena.kind(call) else {
        panic!("not a call");
    };
    assert_eq!(arguments.len(), 2);
    assert!(matches!(
        module.arena.kind(arguments[0]),
        Some(NodeKind::ArrayExpression { elements }) if elements.len() == 2
    ));
    assert!(matches!(
        module.arena.kind(arguments[1]),
        Some(NodeKind::FunctionExpression { params, .. }) if params.len() == 2
    ));
}

#[test]
fn parses_variable_declarations() {
    let module = parse("var a = require('a'), b = 2;").unwrap();
    let body = module.arena.program_body(module.root);
    assert_eq!(body.len(), 1);
    let Some(NodeKind::VariableDeclaration { kind, declarations }) = module.arena.kind(body[0])
    else {
        panic!("expected a variable declaration");
    };
    assert_eq!(*kind, VarKind::Var);
    assert_eq!(declarations.len(), 2);
}

#[test]
fn records_directives() {
    let module = parse("'use strict';\nfoo();").unwrap();
    let body = module.arena.program_body(module.root);
    assert!(matches!(
        module.arena.kind(body[0]),
        Some(NodeKind::ExpressionStatement { directive: Some(d), .. }) if d == "use strict"
    ));
    assert!(matches!(
        module.arena.kind(body[1]),
        Some(NodeKind::ExpressionStatement {
            directive: None,
            ..
        })
    ));
}

#[test]
fn asi_allows_missing_semicolons_between_lines() {
    let module = parse("a = 1\nb = 2").unwrap();
    assert_eq!(module.arena.program_body(module.root).len(), 2);
}

#[test]
fn asi_restricts_return_argument_to_the_same_line() {
    let module = parse("function f() { return\n    1; }").unwrap();
    let bare = find_first(&module.arena, module.root, |arena, index| {
        matches!(
            arena.kind(index),
            Some(NodeKind::ReturnStatement { argument }) if argument.is_none()
        )
    });
    assert!(bare.is_some(), "newline after return must end the statement");
}

#[test]
fn parses_arrow_factories() {
    let module = parse("define(['a'], a => a.run());").unwrap();
    let arrow = find_first(&module.arena, module.root, |arena, index| {
        matches!(
            arena.kind(index),
            Some(NodeKind::ArrowFunctionExpression { .. })
        )
    });
    assert!(arrow.is_some());

    let module = parse("define(['a'], (a, b) => { return a(b); });").unwrap();
    let arrow = find_first(&module.arena, module.root, |arena, index| {
        matches!(
            arena.kind(index),
            Some(NodeKind::ArrowFunctionExpression { expression: false, .. })
        )
    });
    assert!(arrow.is_some());
}

#[test]
fn parses_for_in_and_classic_for() {
    let module = parse("for (var key in obj) { use(key); }").unwrap();
    let body = module.arena.program_body(module.root);
    assert!(matches!(
        module.arena.kind(body[0]),
        Some(NodeKind::ForInStatement { .. })
    ));

    let module = parse("for (var i = 0; i < 10; i++) { use(i); }").unwrap();
    let body = module.arena.program_body(module.root);
    assert!(matches!(
        module.arena.kind(body[0]),
        Some(NodeKind::ForStatement { .. })
    ));
}

#[test]
fn preserves_parentheses_as_nodes() {
    let module = parse("x = (a + b) * c;").unwrap();
    let paren = find_first(&module.arena, module.root, |arena, index| {
        matches!(
            arena.kind(index),
            Some(NodeKind::ParenthesizedExpression { .. })
        )
    });
    assert!(paren.is_some());
}

#[test]
fn parses_object_literals_with_string_keys() {
    let module = parse("define({ 'a-b': 1, c: two, d: function () {} });").unwrap();
    let object = find_first(&module.arena, module.root, |arena, index| {
        matches!(arena.kind(index), Some(NodeKind::ObjectExpression { .. }))
    })
    .unwrap();
    let Some(NodeKind::ObjectExpression { properties }) = module.arena.kind(object) else {
        panic!("not an object");
    };
    assert_eq!(properties.len(), 3);
}

#[test]
fn rejects_unterminated_input() {
    assert!(parse("define(['a'], function (a) {").is_err());
    assert!(parse("var x = 'unclosed").is_err());
}

#[test]
fn parses_iife_wrappers() {
    let module = parse(
        "(function (root) {\n    root.define(['a'], function (a) { return a; });\n}(this));",
    )
    .unwrap();
    assert_eq!(module.arena.program_body(module.root).len(), 1);
}
