//! Integration tests for the public library API.

use esmify::{Error, Options, convert};

#[test]
fn converts_a_dependency_list_module() {
    let output = convert(
        "define(['a', 'b'], function (a, b) { return a(b); });",
        &Options::default(),
    )
    .unwrap();
    assert_eq!(
        output,
        "import a from 'a';\nimport b from 'b';\nexport default a(b);\n"
    );
}

#[test]
fn beautify_separates_sections() {
    let output = convert(
        "define(['a'], function (a) { var b = a.setup(); return b; });",
        &Options { beautify: true },
    )
    .unwrap();
    assert_eq!(
        output,
        "import a from 'a';\n\nvar b = a.setup();\n\nexport default b;\n"
    );
}

#[test]
fn surfaces_parse_errors() {
    let error = convert("define(['a'], function (a) {", &Options::default()).unwrap_err();
    let Error::Parse(diagnostic) = &error;
    assert!(!diagnostic.message.is_empty());
    assert!(error.to_string().starts_with("parse error:"));
}

#[test]
fn conversions_are_independent() {
    // Rewrite state must not leak across files: the same input converts
    // identically no matter what was converted before it.
    let first = convert(
        "define(function (require, exports) { var a = require('a'); exports.a = a; });",
        &Options::default(),
    )
    .unwrap();
    let _noise = convert(
        "define(['x', 'y', 'z'], function (x) { return x; });",
        &Options::default(),
    )
    .unwrap();
    let second = convert(
        "define(function (require, exports) { var a = require('a'); exports.a = a; });",
        &Options::default(),
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn converts_files_round_tripped_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("widget.js");
    std::fs::write(&input, "define({ name: 'widget' });").unwrap();

    let content = std::fs::read_to_string(&input).unwrap();
    let compiled = convert(&content, &Options::default()).unwrap();
    let output = input.with_extension("mjs");
    std::fs::write(&output, &compiled).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "export default {\n    name: 'widget'\n};\n"
    );
}
