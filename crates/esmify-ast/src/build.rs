//! Construction helpers for synthesized nodes.

use crate::arena::{NodeArena, NodeIndex};
use crate::node::{NodeKind, VarKind};
use crate::span::Span;

pub fn identifier(arena: &mut NodeArena, name: &str) -> NodeIndex {
    arena.add(
        NodeKind::Identifier {
            name: name.to_string(),
        },
        Span::SYNTHETIC,
    )
}

/// String literal printed with single quotes (the house style for
/// synthesized module specifiers).
pub fn string_literal(arena: &mut NodeArena, value: &str) -> NodeIndex {
    let mut raw = String::with_capacity(value.len() + 2);
    raw.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => raw.push_str("\\'"),
            '\\' => raw.push_str("\\\\"),
            '\n' => raw.push_str("\\n"),
            _ => raw.push(ch),
        }
    }
    raw.push('\'');
    arena.add(
        NodeKind::StringLiteral {
            value: value.to_string(),
            raw,
        },
        Span::SYNTHETIC,
    )
}

/// `import local from 'source'`, or `import 'source'` when `local` is None.
pub fn import_declaration(
    arena: &mut NodeArena,
    local: Option<&str>,
    source: &str,
) -> NodeIndex {
    let local = match local {
        Some(name) => identifier(arena, name),
        None => NodeIndex::NONE,
    };
    let source = string_literal(arena, source);
    arena.add(NodeKind::ImportDeclaration { local, source }, Span::SYNTHETIC)
}

pub fn export_default(arena: &mut NodeArena, declaration: NodeIndex) -> NodeIndex {
    arena.add(
        NodeKind::ExportDefaultDeclaration { declaration },
        Span::SYNTHETIC,
    )
}

pub fn export_named(arena: &mut NodeArena, declaration: NodeIndex) -> NodeIndex {
    arena.add(
        NodeKind::ExportNamedDeclaration { declaration },
        Span::SYNTHETIC,
    )
}

pub fn variable_declarator(arena: &mut NodeArena, id: NodeIndex, init: NodeIndex) -> NodeIndex {
    arena.add(NodeKind::VariableDeclarator { id, init }, Span::SYNTHETIC)
}

pub fn variable_declaration(
    arena: &mut NodeArena,
    kind: VarKind,
    declarations: Vec<NodeIndex>,
) -> NodeIndex {
    arena.add(
        NodeKind::VariableDeclaration { kind, declarations },
        Span::SYNTHETIC,
    )
}

pub fn expression_statement(arena: &mut NodeArena, expression: NodeIndex) -> NodeIndex {
    arena.add(
        NodeKind::ExpressionStatement {
            expression,
            directive: None,
        },
        Span::SYNTHETIC,
    )
}
