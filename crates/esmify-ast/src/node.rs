//! The closed set of AST node kinds.
//!
//! `NodeKind` is a tagged union over the ES5+ subset AMD modules are written
//! in, plus the module declarations the converter synthesizes. Children are
//! referenced by `NodeIndex`; optional children use `NodeIndex::NONE`.
//! Keeping the set closed means every consumer matches exhaustively and a
//! new kind is a compile error, not a silent pass-through.

use crate::arena::NodeIndex;
use serde::Serialize;

/// Declaration keyword of a variable statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum NodeKind {
    /// Root of a parsed file; `body` is the ordered program body.
    Program { body: Vec<NodeIndex> },

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier {
        name: String,
    },
    /// String literal; `raw` keeps the source text including quotes so
    /// printing round-trips the author's quoting.
    StringLiteral {
        value: String,
        raw: String,
    },
    NumberLiteral {
        raw: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    RegexLiteral {
        raw: String,
    },
    ThisExpression,
    ArrayExpression {
        elements: Vec<NodeIndex>,
    },
    ObjectExpression {
        properties: Vec<NodeIndex>,
    },
    /// `key: value` inside an object literal.
    Property {
        key: NodeIndex,
        value: NodeIndex,
        computed: bool,
        shorthand: bool,
    },
    FunctionExpression {
        name: Option<String>,
        params: Vec<NodeIndex>,
        body: NodeIndex,
    },
    /// Arrow function; `body` is a block statement or, when `expression` is
    /// set, a bare expression.
    ArrowFunctionExpression {
        params: Vec<NodeIndex>,
        body: NodeIndex,
        expression: bool,
    },
    UnaryExpression {
        operator: String,
        argument: NodeIndex,
    },
    /// `++x`, `x--`
    UpdateExpression {
        operator: String,
        argument: NodeIndex,
        prefix: bool,
    },
    BinaryExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    LogicalExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    AssignmentExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    ConditionalExpression {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    CallExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    NewExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `object.property` or `object[property]` when `computed`.
    MemberExpression {
        object: NodeIndex,
        property: NodeIndex,
        computed: bool,
    },
    SequenceExpression {
        expressions: Vec<NodeIndex>,
    },
    /// Explicit parentheses, preserved from source. The printer emits them
    /// verbatim, which keeps printing purely structural.
    ParenthesizedExpression {
        expression: NodeIndex,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    /// `directive` is set for directive-prologue statements (`"use strict"`).
    ExpressionStatement {
        expression: NodeIndex,
        directive: Option<String>,
    },
    BlockStatement {
        body: Vec<NodeIndex>,
    },
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeIndex>,
    },
    /// One `id = init` declarator; `init` is NONE when absent.
    VariableDeclarator {
        id: NodeIndex,
        init: NodeIndex,
    },
    FunctionDeclaration {
        name: String,
        params: Vec<NodeIndex>,
        body: NodeIndex,
    },
    ReturnStatement {
        argument: NodeIndex,
    },
    IfStatement {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    ForStatement {
        init: NodeIndex,
        test: NodeIndex,
        update: NodeIndex,
        body: NodeIndex,
    },
    ForInStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
    },
    WhileStatement {
        test: NodeIndex,
        body: NodeIndex,
    },
    DoWhileStatement {
        body: NodeIndex,
        test: NodeIndex,
    },
    BreakStatement {
        label: Option<String>,
    },
    ContinueStatement {
        label: Option<String>,
    },
    LabeledStatement {
        label: String,
        body: NodeIndex,
    },
    ThrowStatement {
        argument: NodeIndex,
    },
    TryStatement {
        block: NodeIndex,
        param: NodeIndex,
        handler: NodeIndex,
        finalizer: NodeIndex,
    },
    SwitchStatement {
        discriminant: NodeIndex,
        cases: Vec<NodeIndex>,
    },
    /// `test` is NONE for the `default:` clause.
    SwitchCase {
        test: NodeIndex,
        consequent: Vec<NodeIndex>,
    },
    EmptyStatement,

    // =========================================================================
    // Module declarations (synthesized by the converter)
    // =========================================================================
    /// `import local from 'source'`, or `import 'source'` when `local` is
    /// NONE (side-effect-only import).
    ImportDeclaration {
        local: NodeIndex,
        source: NodeIndex,
    },
    ExportDefaultDeclaration {
        declaration: NodeIndex,
    },
    /// `export <declaration>`, e.g. `export var foo = 1`.
    ExportNamedDeclaration {
        declaration: NodeIndex,
    },
}

impl NodeKind {
    /// Child node indices in source order, skipping NONE slots.
    pub fn children(&self) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let one = |idx: &NodeIndex, out: &mut Vec<NodeIndex>| {
            if idx.is_some() {
                out.push(*idx);
            }
        };
        match self {
            NodeKind::Program { body } => out.extend_from_slice(body),
            NodeKind::Identifier { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::NumberLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::NullLiteral
            | NodeKind::RegexLiteral { .. }
            | NodeKind::ThisExpression
            | NodeKind::BreakStatement { .. }
            | NodeKind::ContinueStatement { .. }
            | NodeKind::EmptyStatement => {}
            NodeKind::ArrayExpression { elements } => out.extend_from_slice(elements),
            NodeKind::ObjectExpression { properties } => out.extend_from_slice(properties),
            NodeKind::Property { key, value, .. } => {
                one(key, &mut out);
                one(value, &mut out);
            }
            NodeKind::FunctionExpression { params, body, .. }
            | NodeKind::FunctionDeclaration { params, body, .. }
            | NodeKind::ArrowFunctionExpression { params, body, .. } => {
                out.extend_from_slice(params);
                one(body, &mut out);
            }
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. }
            | NodeKind::ReturnStatement { argument }
            | NodeKind::ThrowStatement { argument } => one(argument, &mut out),
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. } => {
                one(left, &mut out);
                one(right, &mut out);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                one(test, &mut out);
                one(consequent, &mut out);
                one(alternate, &mut out);
            }
            NodeKind::CallExpression { callee, arguments }
            | NodeKind::NewExpression { callee, arguments } => {
                one(callee, &mut out);
                out.extend_from_slice(arguments);
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                one(object, &mut out);
                one(property, &mut out);
            }
            NodeKind::SequenceExpression { expressions } => out.extend_from_slice(expressions),
            NodeKind::ParenthesizedExpression { expression }
            | NodeKind::ExpressionStatement { expression, .. } => one(expression, &mut out),
            NodeKind::BlockStatement { body } => out.extend_from_slice(body),
            NodeKind::VariableDeclaration { declarations, .. } => {
                out.extend_from_slice(declarations)
            }
            NodeKind::VariableDeclarator { id, init } => {
                one(id, &mut out);
                one(init, &mut out);
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                one(test, &mut out);
                one(consequent, &mut out);
                one(alternate, &mut out);
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                one(init, &mut out);
                one(test, &mut out);
                one(update, &mut out);
                one(body, &mut out);
            }
            NodeKind::ForInStatement { left, right, body } => {
                one(left, &mut out);
                one(right, &mut out);
                one(body, &mut out);
            }
            NodeKind::WhileStatement { test, body } => {
                one(test, &mut out);
                one(body, &mut out);
            }
            NodeKind::DoWhileStatement { body, test } => {
                one(body, &mut out);
                one(test, &mut out);
            }
            NodeKind::LabeledStatement { body, .. } => one(body, &mut out),
            NodeKind::TryStatement {
                block,
                param,
                handler,
                finalizer,
            } => {
                one(block, &mut out);
                one(param, &mut out);
                one(handler, &mut out);
                one(finalizer, &mut out);
            }
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => {
                one(discriminant, &mut out);
                out.extend_from_slice(cases);
            }
            NodeKind::SwitchCase { test, consequent } => {
                one(test, &mut out);
                out.extend_from_slice(consequent);
            }
            NodeKind::ImportDeclaration { local, source } => {
                one(local, &mut out);
                one(source, &mut out);
            }
            NodeKind::ExportDefaultDeclaration { declaration }
            | NodeKind::ExportNamedDeclaration { declaration } => one(declaration, &mut out),
        }
        out
    }
}
