//! End-to-end conversion tests: parse, convert, print, assert.

use esmify_ast::NodeKind;
use esmify_convert::{RewriteMap, convert};
use esmify_emitter::{PrintOptions, print};
use esmify_parser::parse;

fn convert_source(source: &str) -> String {
    let mut module = parse(source).unwrap();
    convert(&mut module.arena, module.root);
    print(&module.arena, module.root, &PrintOptions::default())
}

// ===================== call shapes =====================

#[test]
fn object_export_becomes_a_single_default_export() {
    assert_eq!(
        convert_source("define({ a: 1 });"),
        "export default {\n    a: 1\n};\n"
    );
}

#[test]
fn dependencies_map_to_imports_in_list_order() {
    assert_eq!(
        convert_source("define(['a', 'b'], function (x, y) { return x + y; });"),
        "import x from 'a';\nimport y from 'b';\nexport default x + y;\n"
    );
}

#[test]
fn named_define_drops_the_name() {
    assert_eq!(
        convert_source("define('widget', ['a'], function (a) { return a; });"),
        "import a from 'a';\nexport default a;\n"
    );
}

#[test]
fn expression_bodied_factory_exports_its_expression() {
    assert_eq!(
        convert_source("define(['a'], a => a.run());"),
        "import a from 'a';\nexport default a.run();\n"
    );
}

#[test]
fn unpaired_dependencies_become_side_effect_imports() {
    assert_eq!(
        convert_source("define(['a', 'b'], function (a) { return a; });"),
        "import a from 'a';\nimport 'b';\nexport default a;\n"
    );
}

#[test]
fn unsupported_shapes_produce_an_empty_body() {
    assert_eq!(convert_source("define(42);"), "");
    assert_eq!(convert_source("define('only-a-name');"), "");
}

#[test]
fn no_define_call_produces_an_empty_body() {
    assert_eq!(convert_source("var x = 1;\nf(x);"), "");
}

// ===================== reserved specifiers =====================

#[test]
fn reserved_specifiers_never_become_imports() {
    assert_eq!(
        convert_source(
            "define(['require', 'exports', 'module', 'a'], \
             function (require, exports, module, a) { exports.name = a; });"
        ),
        "import a from 'a';\nexport var name = a;\n"
    );
}

#[test]
fn commonjs_wrapper_binds_reserved_names_by_position() {
    assert_eq!(
        convert_source(
            "define(function (require, exports, module) { module.exports = create(); });"
        ),
        "export default create();\n"
    );
}

#[test]
fn renamed_reserved_bindings_are_resolved() {
    assert_eq!(
        convert_source(
            "define(['require', 'exports'], function (req, exp) { \
             var a = req('a'); exp.value = a; });"
        ),
        "import a from 'a';\nexport var value = a;\n"
    );
}

// ===================== body rewriting =====================

#[test]
fn loader_declarators_are_filtered_from_declarations() {
    assert_eq!(
        convert_source("define(function (require) { var a = require('a'), b = 2; return b; });"),
        "import a from 'a';\nvar b = 2;\nexport default b;\n"
    );
}

#[test]
fn fully_loader_backed_declarations_are_dropped() {
    assert_eq!(
        convert_source(
            "define(function (require) { var a = require('a'), b = require('b'); return a(b); });"
        ),
        "import a from 'a';\nimport b from 'b';\nexport default a(b);\n"
    );
}

#[test]
fn bare_loader_calls_become_side_effect_imports() {
    assert_eq!(
        convert_source("define(function (require) { require('side'); return 1; });"),
        "import 'side';\nexport default 1;\n"
    );
}

#[test]
fn nested_loader_declarators_are_removed_by_the_apply_pass() {
    assert_eq!(
        convert_source(
            "define(function (require) { \
             function init() { var lazy = require('lazy'); return lazy; } \
             return init; });"
        ),
        "import lazy from 'lazy';\nfunction init() {\n    return lazy;\n}\nexport default init;\n"
    );
}

#[test]
fn bare_return_is_elided() {
    assert_eq!(
        convert_source("define(function () { run(); return; });"),
        "run();\n"
    );
}

#[test]
fn unrelated_statements_pass_through_unchanged() {
    assert_eq!(
        convert_source(
            "define(function () { var state = {}; state.x = 1; return state; });"
        ),
        "var state = {};\nstate.x = 1;\nexport default state;\n"
    );
}

#[test]
fn whole_target_assignment_becomes_a_trailing_default_export() {
    assert_eq!(
        convert_source("define(function (require, exports) { exports = build(); });"),
        "export default build();\n"
    );
}

// ===================== cleanup =====================

#[test]
fn interop_marker_and_strict_directive_are_removed() {
    assert_eq!(
        convert_source(
            "define(function (require, exports) { \
             'use strict'; \
             Object.defineProperty(exports, '__esModule', { value: true }); \
             exports.a = 1; });"
        ),
        "export var a = 1;\n"
    );
}

#[test]
fn partial_interop_matches_are_left_untouched() {
    let output = convert_source(
        "define(function (require, exports) { \
         Object.defineProperty(exports, '__other', { value: true }); \
         Object.defineProperty(exports, '__esModule'); \
         return 1; });",
    );
    assert!(output.contains("'__other'"), "{output}");
    assert!(output.contains("'__esModule'"), "{output}");
}

// ===================== rewrite side-table =====================

#[test]
fn markers_apply_anywhere_in_the_tree() {
    // A removal marker on a declarator buried outside any transformed body
    // is still honored by the apply pass.
    let mut module = parse("if (x) { var a = 1; }").unwrap();
    let declarator = esmify_ast::find_first(&module.arena, module.root, |arena, index| {
        matches!(arena.kind(index), Some(NodeKind::VariableDeclarator { .. }))
    })
    .unwrap();
    let mut rewrites = RewriteMap::new();
    rewrites.mark_remove(declarator);
    rewrites.apply(&mut module.arena);
    let output = print(&module.arena, module.root, &PrintOptions::default());
    assert_eq!(output, "if (x) {}\n");
}

#[test]
fn replacement_markers_overwrite_the_marked_node() {
    let mut module = parse("x = a + 1;").unwrap();
    let old = esmify_ast::find_first(&module.arena, module.root, |arena, index| {
        arena.identifier_text(index) == Some("a")
    })
    .unwrap();
    let new = esmify_ast::build::identifier(&mut module.arena, "b");
    let mut rewrites = RewriteMap::new();
    rewrites.mark_replace(old, new);
    rewrites.apply(&mut module.arena);
    let output = print(&module.arena, module.root, &PrintOptions::default());
    assert_eq!(output, "x = b + 1;\n");
}

// ===================== umd-ish inputs =====================

#[test]
fn define_is_found_inside_wrappers() {
    let output = convert_source(
        "(function () {\n    define(['a'], function (a) { return a; });\n}());",
    );
    assert_eq!(output, "import a from 'a';\nexport default a;\n");
}

#[test]
fn mixed_dependency_sources_keep_list_imports_first() {
    assert_eq!(
        convert_source(
            "define(['a'], function (a) { var b = require('b'); return a(b); });"
        ),
        "import a from 'a';\nimport b from 'b';\nexport default a(b);\n"
    );
}
