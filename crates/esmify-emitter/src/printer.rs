//! The printer.

use esmify_ast::{NodeArena, NodeIndex, NodeKind};

const INDENT: &str = "    ";

#[derive(Clone, Debug, Default)]
pub struct PrintOptions {
    /// Separate the import block, module body and export block with blank
    /// lines. Driven by the CLI `--beautify` flag.
    pub separate_sections: bool,
}

/// Print the program rooted at `root`.
pub fn print(arena: &NodeArena, root: NodeIndex, options: &PrintOptions) -> String {
    let mut printer = Printer::new(arena, options.clone());
    printer.print_program(root);
    printer.finish()
}

pub struct Printer<'a> {
    arena: &'a NodeArena,
    options: PrintOptions,
    out: String,
    indent: u32,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, options: PrintOptions) -> Printer<'a> {
        Printer {
            arena,
            options,
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    pub fn print_program(&mut self, root: NodeIndex) {
        let body = self.arena.program_body(root).to_vec();
        let import_run = body
            .iter()
            .take_while(|index| self.is_import(**index))
            .count();
        let export_run_start = body
            .iter()
            .rposition(|index| !self.is_export(*index))
            .map_or(0, |index| index + 1);
        for (position, statement) in body.iter().enumerate() {
            if self.options.separate_sections
                && position > 0
                && (position == import_run || position == export_run_start)
            {
                self.out.push('\n');
            }
            self.emit_statement(*statement);
            self.out.push('\n');
        }
    }

    fn is_import(&self, index: NodeIndex) -> bool {
        matches!(
            self.arena.kind(index),
            Some(NodeKind::ImportDeclaration { .. })
        )
    }

    fn is_export(&self, index: NodeIndex) -> bool {
        matches!(
            self.arena.kind(index),
            Some(
                NodeKind::ExportDefaultDeclaration { .. } | NodeKind::ExportNamedDeclaration { .. }
            )
        )
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    // ===================== statements =====================

    fn emit_statement(&mut self, index: NodeIndex) {
        self.write_indent();
        self.emit_statement_no_indent(index);
    }

    /// Statement emission without the leading indent, for positions where
    /// the line already carries a prefix (`else`, labels, `export`).
    fn emit_statement_no_indent(&mut self, index: NodeIndex) {
        let Some(kind) = self.arena.kind(index) else {
            return;
        };
        match kind.clone() {
            NodeKind::ExpressionStatement { expression, .. } => {
                self.emit_expression(expression);
                self.out.push(';');
            }
            NodeKind::BlockStatement { .. } => self.emit_block(index),
            NodeKind::VariableDeclaration { .. } => {
                self.emit_variable_declaration(index);
                self.out.push(';');
            }
            NodeKind::FunctionDeclaration { name, params, body } => {
                self.out.push_str("function ");
                self.out.push_str(&name);
                self.emit_params(&params);
                self.out.push(' ');
                self.emit_block(body);
            }
            NodeKind::ReturnStatement { argument } => {
                self.out.push_str("return");
                if argument.is_some() {
                    self.out.push(' ');
                    self.emit_expression(argument);
                }
                self.out.push(';');
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.out.push_str("if (");
                self.emit_expression(test);
                self.out.push(')');
                self.emit_clause(consequent);
                if alternate.is_some() {
                    self.write_indent_if_line_start();
                    self.out.push_str("else");
                    if matches!(
                        self.arena.kind(alternate),
                        Some(NodeKind::IfStatement { .. })
                    ) {
                        self.out.push(' ');
                        self.emit_statement_no_indent(alternate);
                    } else {
                        self.emit_clause(alternate);
                    }
                }
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                self.out.push_str("for (");
                if init.is_some() {
                    if matches!(
                        self.arena.kind(init),
                        Some(NodeKind::VariableDeclaration { .. })
                    ) {
                        self.emit_variable_declaration(init);
                    } else {
                        self.emit_expression(init);
                    }
                }
                self.out.push(';');
                if test.is_some() {
                    self.out.push(' ');
                    self.emit_expression(test);
                }
                self.out.push(';');
                if update.is_some() {
                    self.out.push(' ');
                    self.emit_expression(update);
                }
                self.out.push(')');
                self.emit_clause(body);
            }
            NodeKind::ForInStatement { left, right, body } => {
                self.out.push_str("for (");
                if matches!(
                    self.arena.kind(left),
                    Some(NodeKind::VariableDeclaration { .. })
                ) {
                    self.emit_variable_declaration(left);
                } else {
                    self.emit_expression(left);
                }
                self.out.push_str(" in ");
                self.emit_expression(right);
                self.out.push(')');
                self.emit_clause(body);
            }
            NodeKind::WhileStatement { test, body } => {
                self.out.push_str("while (");
                self.emit_expression(test);
                self.out.push(')');
                self.emit_clause(body);
            }
            NodeKind::DoWhileStatement { body, test } => {
                self.out.push_str("do");
                self.emit_clause(body);
                self.write_indent_if_line_start();
                self.out.push_str("while (");
                self.emit_expression(test);
                self.out.push_str(");");
            }
            NodeKind::BreakStatement { label } => {
                self.out.push_str("break");
                if let Some(label) = label {
                    self.out.push(' ');
                    self.out.push_str(&label);
                }
                self.out.push(';');
            }
            NodeKind::ContinueStatement { label } => {
                self.out.push_str("continue");
                if let Some(label) = label {
                    self.out.push(' ');
                    self.out.push_str(&label);
                }
                self.out.push(';');
            }
            NodeKind::LabeledStatement { label, body } => {
                self.out.push_str(&label);
                self.out.push_str(": ");
                self.emit_statement_no_indent(body);
            }
            NodeKind::ThrowStatement { argument } => {
                self.out.push_str("throw ");
                self.emit_expression(argument);
                self.out.push(';');
            }
            NodeKind::TryStatement {
                block,
                param,
                handler,
                finalizer,
            } => {
                self.out.push_str("try ");
                self.emit_block(block);
                if handler.is_some() {
                    self.out.push_str(" catch (");
                    self.emit_expression(param);
                    self.out.push_str(") ");
                    self.emit_block(handler);
                }
                if finalizer.is_some() {
                    self.out.push_str(" finally ");
                    self.emit_block(finalizer);
                }
            }
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => {
                self.out.push_str("switch (");
                self.emit_expression(discriminant);
                self.out.push_str(") {\n");
                for case in cases {
                    self.indent += 1;
                    self.write_indent();
                    match self.arena.kind(case).cloned() {
                        Some(NodeKind::SwitchCase { test, consequent }) => {
                            if test.is_some() {
                                self.out.push_str("case ");
                                self.emit_expression(test);
                                self.out.push(':');
                            } else {
                                self.out.push_str("default:");
                            }
                            self.out.push('\n');
                            self.indent += 1;
                            for statement in consequent {
                                self.emit_statement(statement);
                                self.out.push('\n');
                            }
                            self.indent -= 1;
                        }
                        _ => {}
                    }
                    self.indent -= 1;
                }
                self.write_indent();
                self.out.push('}');
            }
            NodeKind::EmptyStatement => self.out.push(';'),
            NodeKind::ImportDeclaration { local, source } => {
                self.out.push_str("import ");
                if local.is_some() {
                    self.emit_expression(local);
                    self.out.push_str(" from ");
                }
                self.emit_expression(source);
                self.out.push(';');
            }
            NodeKind::ExportDefaultDeclaration { declaration } => {
                self.out.push_str("export default ");
                self.emit_expression(declaration);
                self.out.push(';');
            }
            NodeKind::ExportNamedDeclaration { declaration } => {
                self.out.push_str("export ");
                self.emit_statement_no_indent(declaration);
            }
            // An expression landed in statement position.
            _ => {
                self.emit_expression(index);
                self.out.push(';');
            }
        }
    }

    /// Body of `if`/`for`/`while`: blocks stay on the same line, a single
    /// statement moves to the next line, indented.
    fn emit_clause(&mut self, index: NodeIndex) {
        if matches!(self.arena.kind(index), Some(NodeKind::BlockStatement { .. })) {
            self.out.push(' ');
            self.emit_block(index);
        } else {
            self.out.push('\n');
            self.indent += 1;
            self.emit_statement(index);
            self.indent -= 1;
        }
    }

    /// Join `else` / `while` onto the clause that precedes it.
    fn write_indent_if_line_start(&mut self) {
        if self.out.ends_with('\n') {
            self.write_indent();
        } else {
            self.out.push(' ');
        }
    }

    fn emit_block(&mut self, index: NodeIndex) {
        let Some(NodeKind::BlockStatement { body }) = self.arena.kind(index).cloned() else {
            return;
        };
        if body.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for statement in body {
            self.emit_statement(statement);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    fn emit_variable_declaration(&mut self, index: NodeIndex) {
        let Some(NodeKind::VariableDeclaration { kind, declarations }) =
            self.arena.kind(index).cloned()
        else {
            return;
        };
        self.out.push_str(kind.keyword());
        self.out.push(' ');
        for (position, declarator) in declarations.iter().enumerate() {
            if position > 0 {
                self.out.push_str(", ");
            }
            let Some(NodeKind::VariableDeclarator { id, init }) =
                self.arena.kind(*declarator).cloned()
            else {
                continue;
            };
            self.emit_expression(id);
            if init.is_some() {
                self.out.push_str(" = ");
                self.emit_expression(init);
            }
        }
    }

    fn emit_params(&mut self, params: &[NodeIndex]) {
        self.out.push('(');
        for (position, param) in params.iter().enumerate() {
            if position > 0 {
                self.out.push_str(", ");
            }
            self.emit_expression(*param);
        }
        self.out.push(')');
    }

    // ===================== expressions =====================

    fn emit_expression(&mut self, index: NodeIndex) {
        let Some(kind) = self.arena.kind(index) else {
            return;
        };
        match kind.clone() {
            NodeKind::Identifier { name } => self.out.push_str(&name),
            NodeKind::StringLiteral { raw, .. } => self.out.push_str(&raw),
            NodeKind::NumberLiteral { raw } => self.out.push_str(&raw),
            NodeKind::BooleanLiteral { value } => {
                self.out.push_str(if value { "true" } else { "false" })
            }
            NodeKind::NullLiteral => self.out.push_str("null"),
            NodeKind::RegexLiteral { raw } => self.out.push_str(&raw),
            NodeKind::ThisExpression => self.out.push_str("this"),
            NodeKind::ArrayExpression { elements } => {
                self.out.push('[');
                for (position, element) in elements.iter().enumerate() {
                    if position > 0 {
                        self.out.push_str(", ");
                    }
                    self.emit_expression(*element);
                }
                self.out.push(']');
            }
            NodeKind::ObjectExpression { properties } => {
                if properties.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push_str("{\n");
                self.indent += 1;
                for (position, property) in properties.iter().enumerate() {
                    self.write_indent();
                    self.emit_expression(*property);
                    if position + 1 < properties.len() {
                        self.out.push(',');
                    }
                    self.out.push('\n');
                }
                self.indent -= 1;
                self.write_indent();
                self.out.push('}');
            }
            NodeKind::Property {
                key,
                value,
                shorthand,
                ..
            } => {
                self.emit_expression(key);
                if !shorthand {
                    self.out.push_str(": ");
                    self.emit_expression(value);
                }
            }
            NodeKind::FunctionExpression { name, params, body } => {
                // Anonymous functions keep the `function (a)` space.
                match name {
                    Some(name) => {
                        self.out.push_str("function ");
                        self.out.push_str(&name);
                    }
                    None => self.out.push_str("function "),
                }
                self.emit_params(&params);
                self.out.push(' ');
                self.emit_block(body);
            }
            NodeKind::ArrowFunctionExpression {
                params,
                body,
                expression,
            } => {
                if params.len() == 1
                    && matches!(self.arena.kind(params[0]), Some(NodeKind::Identifier { .. }))
                {
                    self.emit_expression(params[0]);
                } else {
                    self.emit_params(&params);
                }
                self.out.push_str(" => ");
                if expression {
                    self.emit_expression(body);
                } else {
                    self.emit_block(body);
                }
            }
            NodeKind::UnaryExpression { operator, argument } => {
                self.out.push_str(&operator);
                if operator.chars().next().is_some_and(|ch| ch.is_alphabetic()) {
                    self.out.push(' ');
                } else if self.needs_sign_separator(&operator, argument) {
                    self.out.push(' ');
                }
                self.emit_expression(argument);
            }
            NodeKind::UpdateExpression {
                operator,
                argument,
                prefix,
            } => {
                if prefix {
                    self.out.push_str(&operator);
                    self.emit_expression(argument);
                } else {
                    self.emit_expression(argument);
                    self.out.push_str(&operator);
                }
            }
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            }
            | NodeKind::LogicalExpression {
                operator,
                left,
                right,
            } => {
                self.emit_expression(left);
                self.out.push(' ');
                self.out.push_str(&operator);
                self.out.push(' ');
                self.emit_expression(right);
            }
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.emit_expression(left);
                self.out.push(' ');
                self.out.push_str(&operator);
                self.out.push(' ');
                self.emit_expression(right);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.emit_expression(test);
                self.out.push_str(" ? ");
                self.emit_expression(consequent);
                self.out.push_str(" : ");
                self.emit_expression(alternate);
            }
            NodeKind::CallExpression { callee, arguments } => {
                self.emit_expression(callee);
                self.emit_arguments(&arguments);
            }
            NodeKind::NewExpression { callee, arguments } => {
                self.out.push_str("new ");
                self.emit_expression(callee);
                self.emit_arguments(&arguments);
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => {
                self.emit_expression(object);
                if computed {
                    self.out.push('[');
                    self.emit_expression(property);
                    self.out.push(']');
                } else {
                    self.out.push('.');
                    self.emit_expression(property);
                }
            }
            NodeKind::SequenceExpression { expressions } => {
                for (position, expression) in expressions.iter().enumerate() {
                    if position > 0 {
                        self.out.push_str(", ");
                    }
                    self.emit_expression(*expression);
                }
            }
            NodeKind::ParenthesizedExpression { expression } => {
                self.out.push('(');
                self.emit_expression(expression);
                self.out.push(')');
            }
            // Statement kinds never appear in expression position.
            _ => {}
        }
    }

    fn emit_arguments(&mut self, arguments: &[NodeIndex]) {
        self.out.push('(');
        for (position, argument) in arguments.iter().enumerate() {
            if position > 0 {
                self.out.push_str(", ");
            }
            self.emit_expression(*argument);
        }
        self.out.push(')');
    }

    /// `-(-x)` and `- --x` must not fuse into `--`.
    fn needs_sign_separator(&self, operator: &str, argument: NodeIndex) -> bool {
        if operator != "-" && operator != "+" {
            return false;
        }
        match self.arena.kind(argument) {
            Some(NodeKind::UnaryExpression { operator: inner, .. })
            | Some(NodeKind::UpdateExpression { operator: inner, .. }) => {
                inner.starts_with(operator)
            }
            _ => false,
        }
    }
}
