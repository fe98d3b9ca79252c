//! Node predicates. Pure classification, no tree mutation.

use esmify_ast::{NodeArena, NodeIndex, NodeKind};

/// `define(...)` with a plain identifier callee.
pub fn is_define_call(arena: &NodeArena, index: NodeIndex) -> bool {
    matches!(
        arena.kind(index),
        Some(NodeKind::CallExpression { callee, .. })
            if arena.identifier_text(*callee) == Some("define")
    )
}

pub fn is_return_statement(arena: &NodeArena, index: NodeIndex) -> bool {
    matches!(arena.kind(index), Some(NodeKind::ReturnStatement { .. }))
}

pub fn is_variable_declaration(arena: &NodeArena, index: NodeIndex) -> bool {
    matches!(arena.kind(index), Some(NodeKind::VariableDeclaration { .. }))
}

/// `loader('specifier')` — a call of the resolved loader binding with a
/// single string argument. Dynamic forms (`require([...], cb)`) are not
/// loader calls.
pub fn is_loader_call(arena: &NodeArena, index: NodeIndex, loader: &str) -> bool {
    match arena.kind(index) {
        Some(NodeKind::CallExpression { callee, arguments }) => {
            arena.identifier_text(*callee) == Some(loader)
                && arguments.len() == 1
                && matches!(
                    arena.kind(arguments[0]),
                    Some(NodeKind::StringLiteral { .. })
                )
        }
        _ => false,
    }
}

/// A loader call used as a whole statement: `loader('specifier');`
pub fn is_loader_call_statement(arena: &NodeArena, index: NodeIndex, loader: &str) -> bool {
    match arena.kind(index) {
        Some(NodeKind::ExpressionStatement { expression, .. }) => {
            is_loader_call(arena, *expression, loader)
        }
        _ => false,
    }
}

/// Specifier string of a loader call, when `is_loader_call` holds.
pub fn loader_call_specifier<'a>(
    arena: &'a NodeArena,
    index: NodeIndex,
    loader: &str,
) -> Option<&'a str> {
    if !is_loader_call(arena, index, loader) {
        return None;
    }
    match arena.kind(index) {
        Some(NodeKind::CallExpression { arguments, .. }) => arena.string_value(arguments[0]),
        _ => None,
    }
}

/// A `'use strict'` directive-prologue statement.
pub fn is_use_strict_directive(arena: &NodeArena, index: NodeIndex) -> bool {
    matches!(
        arena.kind(index),
        Some(NodeKind::ExpressionStatement { directive: Some(d), .. }) if d == "use strict"
    )
}

/// The module-interop boilerplate statement:
/// `Object.defineProperty(<target>, '__esModule', { value: true });`
///
/// The match requires the target identifier, the `'__esModule'` literal and
/// at least one further argument; anything less is left untouched.
pub fn is_interop_marker(arena: &NodeArena, index: NodeIndex, target: &str) -> bool {
    let Some(NodeKind::ExpressionStatement { expression, .. }) = arena.kind(index) else {
        return false;
    };
    let Some(NodeKind::CallExpression { callee, arguments }) = arena.kind(*expression) else {
        return false;
    };
    let Some(NodeKind::MemberExpression {
        object,
        property,
        computed: false,
    }) = arena.kind(*callee)
    else {
        return false;
    };
    if arena.identifier_text(*object) != Some("Object")
        || arena.identifier_text(*property) != Some("defineProperty")
    {
        return false;
    }
    arguments.len() > 2
        && arena.identifier_text(arguments[0]) == Some(target)
        && arena.string_value(arguments[1]) == Some("__esModule")
}
