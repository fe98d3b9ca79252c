//! Classification of the module definition call.
//!
//! The ad hoc field sniffing of loader-era tooling is replaced by a single
//! classification step producing a tagged variant; the engine then matches
//! exhaustively, so unsupported shapes are an explicit `None` rather than a
//! silent fallthrough.

use crate::matchers::is_define_call;
use esmify_ast::{NodeArena, NodeIndex, NodeKind, find_first};

/// The two mutually exclusive shapes of a `define(...)` call.
#[derive(Clone, Debug)]
pub enum DefineShape {
    /// `define({ ... })` — the whole module is a static data export.
    ObjectExport { object: NodeIndex },
    /// `define(name?, dependencies?, callback)` — a factory module. The
    /// optional name has no ESM counterpart and is dropped.
    Factory {
        name: Option<NodeIndex>,
        dependencies: Vec<NodeIndex>,
        callback: NodeIndex,
    },
}

/// First `define(...)` call anywhere in the tree. UMD wrappers bury the call
/// inside an IIFE, so the search is not restricted to the top level.
pub fn find_define_call(arena: &NodeArena, root: NodeIndex) -> Option<NodeIndex> {
    find_first(arena, root, is_define_call)
}

/// Classify a define call, or `None` when the argument pattern matches
/// neither shape.
pub fn classify(arena: &NodeArena, call: NodeIndex) -> Option<DefineShape> {
    let Some(NodeKind::CallExpression { arguments, .. }) = arena.kind(call) else {
        return None;
    };
    let arguments = arguments.clone();

    if arguments.len() == 1 {
        if matches!(
            arena.kind(arguments[0]),
            Some(NodeKind::ObjectExpression { .. })
        ) {
            return Some(DefineShape::ObjectExport {
                object: arguments[0],
            });
        }
    }

    let callback = *arguments.last()?;
    if !matches!(
        arena.kind(callback),
        Some(NodeKind::FunctionExpression { .. } | NodeKind::ArrowFunctionExpression { .. })
    ) {
        return None;
    }

    match arguments.len() {
        1 => Some(DefineShape::Factory {
            name: None,
            dependencies: Vec::new(),
            callback,
        }),
        2 => match arena.kind(arguments[0]) {
            Some(NodeKind::ArrayExpression { elements }) => Some(DefineShape::Factory {
                name: None,
                dependencies: elements.clone(),
                callback,
            }),
            Some(NodeKind::StringLiteral { .. }) => Some(DefineShape::Factory {
                name: Some(arguments[0]),
                dependencies: Vec::new(),
                callback,
            }),
            _ => None,
        },
        3 => {
            let name_ok = matches!(
                arena.kind(arguments[0]),
                Some(NodeKind::StringLiteral { .. })
            );
            let Some(NodeKind::ArrayExpression { elements }) = arena.kind(arguments[1]) else {
                return None;
            };
            if !name_ok {
                return None;
            }
            Some(DefineShape::Factory {
                name: Some(arguments[0]),
                dependencies: elements.clone(),
                callback,
            })
        }
        _ => None,
    }
}

/// Parameter identifiers of the factory callback.
pub fn callback_params(arena: &NodeArena, callback: NodeIndex) -> Vec<String> {
    let params = match arena.kind(callback) {
        Some(
            NodeKind::FunctionExpression { params, .. }
            | NodeKind::ArrowFunctionExpression { params, .. },
        ) => params.clone(),
        _ => Vec::new(),
    };
    params
        .iter()
        .filter_map(|param| arena.identifier_text(*param).map(str::to_string))
        .collect()
}

/// Top-level statements of the factory callback, or the bare expression of
/// an expression-bodied arrow.
pub fn callback_body(arena: &NodeArena, callback: NodeIndex) -> Result<Vec<NodeIndex>, NodeIndex> {
    match arena.kind(callback) {
        Some(NodeKind::FunctionExpression { body, .. }) => match arena.kind(*body) {
            Some(NodeKind::BlockStatement { body }) => Ok(body.clone()),
            _ => Ok(Vec::new()),
        },
        Some(NodeKind::ArrowFunctionExpression {
            body, expression, ..
        }) => {
            if *expression {
                Err(*body)
            } else {
                match arena.kind(*body) {
                    Some(NodeKind::BlockStatement { body }) => Ok(body.clone()),
                    _ => Ok(Vec::new()),
                }
            }
        }
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esmify_parser::parse;

    fn classify_source(source: &str) -> Option<DefineShape> {
        let module = parse(source).unwrap();
        let call = find_define_call(&module.arena, module.root)?;
        classify(&module.arena, call)
    }

    #[test]
    fn classifies_object_exports() {
        assert!(matches!(
            classify_source("define({ a: 1 });"),
            Some(DefineShape::ObjectExport { .. })
        ));
    }

    #[test]
    fn classifies_factory_variants() {
        assert!(matches!(
            classify_source("define(function () {});"),
            Some(DefineShape::Factory { name: None, ref dependencies, .. }) if dependencies.is_empty()
        ));
        assert!(matches!(
            classify_source("define(['a'], function (a) {});"),
            Some(DefineShape::Factory { name: None, ref dependencies, .. }) if dependencies.len() == 1
        ));
        assert!(matches!(
            classify_source("define('id', ['a', 'b'], function (a, b) {});"),
            Some(DefineShape::Factory { name: Some(_), ref dependencies, .. }) if dependencies.len() == 2
        ));
        assert!(matches!(
            classify_source("define('id', function () {});"),
            Some(DefineShape::Factory { name: Some(_), .. })
        ));
    }

    #[test]
    fn rejects_foreign_argument_patterns() {
        assert!(classify_source("define(42);").is_none());
        assert!(classify_source("define('id', 42, function () {});").is_none());
        assert!(classify_source("definitely({ a: 1 });").is_none());
    }
}
