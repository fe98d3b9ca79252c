//! Recursive-descent statement parsing.
//!
//! The parser owns the token vector and the node arena; expression parsing
//! lives in `expressions.rs`. Automatic semicolon insertion follows the
//! usual rule: a missing `;` is tolerated before a line break, a `}` or the
//! end of input.

use crate::scanner::{Lexed, Token, scan};
use esmify_ast::{Diagnostic, NodeArena, NodeIndex, NodeKind, Span, VarKind};

/// Hard cap on nesting depth, so pathological input fails with a diagnostic
/// instead of blowing the stack.
pub(crate) const MAX_PARSE_DEPTH: u32 = 400;

pub(crate) type PResult<T> = Result<T, Diagnostic>;

/// A parsed file: the arena plus the index of its `Program` root.
#[derive(Debug)]
pub struct ParsedModule {
    pub arena: NodeArena,
    pub root: NodeIndex,
}

/// Parse one source file into a fresh arena.
pub fn parse(source: &str) -> Result<ParsedModule, Diagnostic> {
    let tokens = scan(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        arena: NodeArena::with_capacity(source.len() / 8),
        depth: 0,
    };
    let root = parser.parse_program()?;
    tracing::debug!(nodes = parser.arena.len(), "parsed module");
    Ok(ParsedModule {
        arena: parser.arena,
        root,
    })
}

pub(crate) struct Parser {
    pub(crate) tokens: Vec<Lexed>,
    pub(crate) pos: usize,
    pub(crate) arena: NodeArena,
    pub(crate) depth: u32,
}

impl Parser {
    // ===================== token helpers =====================

    pub(crate) fn peek(&self) -> &Lexed {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Lexed {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn bump(&mut self) -> Lexed {
        let lexed = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        lexed
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.peek().token, Token::Eof)
    }

    pub(crate) fn at_punct(&self, punct: &str) -> bool {
        matches!(&self.peek().token, Token::Punct(p) if *p == punct)
    }

    pub(crate) fn eat_punct(&mut self, punct: &str) -> bool {
        if self.at_punct(punct) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_punct(&mut self, punct: &str) -> PResult<Span> {
        if self.at_punct(punct) {
            Ok(self.bump().span)
        } else {
            Err(self.unexpected(&format!("expected `{punct}`")))
        }
    }

    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.peek().token, Token::Ident(name) if name == keyword)
    }

    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_ident(&mut self) -> PResult<String> {
        match &self.peek().token {
            Token::Ident(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected("expected an identifier")),
        }
    }

    pub(crate) fn unexpected(&self, context: &str) -> Diagnostic {
        let lexed = self.peek();
        let what = match &lexed.token {
            Token::Ident(name) => format!("`{name}`"),
            Token::Str { raw, .. } => raw.clone(),
            Token::Num(raw) => format!("`{raw}`"),
            Token::Regex(raw) => format!("`{raw}`"),
            Token::Punct(p) => format!("`{p}`"),
            Token::Eof => "end of input".to_string(),
        };
        Diagnostic::new(format!("{context}, found {what}"), lexed.span)
    }

    pub(crate) fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(Diagnostic::new("nesting too deep", self.peek().span));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Consume a statement terminator, applying automatic semicolon
    /// insertion.
    fn semicolon(&mut self) -> PResult<()> {
        if self.eat_punct(";") {
            return Ok(());
        }
        if self.at_punct("}") || self.at_eof() || self.peek().newline_before {
            return Ok(());
        }
        Err(self.unexpected("expected `;`"))
    }

    // ===================== statements =====================

    fn parse_program(&mut self) -> PResult<NodeIndex> {
        let mut body = Vec::new();
        while !self.at_eof() {
            body.push(self.parse_statement()?);
        }
        let end = self.peek().span.end;
        Ok(self
            .arena
            .add(NodeKind::Program { body }, Span::new(0, end)))
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<NodeIndex> {
        self.enter()?;
        let result = self.parse_statement_inner();
        self.leave();
        result
    }

    fn parse_statement_inner(&mut self) -> PResult<NodeIndex> {
        let start = self.peek().span;
        if self.at_punct("{") {
            return self.parse_block();
        }
        if self.at_punct(";") {
            let span = self.bump().span;
            return Ok(self.arena.add(NodeKind::EmptyStatement, span));
        }
        if let Token::Ident(name) = &self.peek().token {
            match name.as_str() {
                "var" | "let" | "const" => {
                    let declaration = self.parse_variable_declaration(true)?;
                    self.semicolon()?;
                    return Ok(declaration);
                }
                "function" => return self.parse_function_declaration(),
                "return" => return self.parse_return(start),
                "if" => return self.parse_if(start),
                "for" => return self.parse_for(start),
                "while" => return self.parse_while(start),
                "do" => return self.parse_do_while(start),
                "break" | "continue" => return self.parse_break_continue(start),
                "throw" => return self.parse_throw(start),
                "try" => return self.parse_try(start),
                "switch" => return self.parse_switch(start),
                _ => {
                    // Labeled statement: `name: stmt`
                    if matches!(self.peek_at(1).token, Token::Punct(":")) {
                        let label = self.expect_ident()?;
                        self.bump();
                        let body = self.parse_statement()?;
                        let end = self.arena.get(body).map_or(start, |node| node.span);
                        return Ok(self
                            .arena
                            .add(NodeKind::LabeledStatement { label, body }, start.to(end)));
                    }
                }
            }
        }
        self.parse_expression_statement(start)
    }

    fn parse_expression_statement(&mut self, start: Span) -> PResult<NodeIndex> {
        let expression = self.parse_expression(false)?;
        self.semicolon()?;
        let directive = match self.arena.kind(expression) {
            Some(NodeKind::StringLiteral { value, .. }) => Some(value.clone()),
            _ => None,
        };
        let end = self.arena.get(expression).map_or(start, |node| node.span);
        Ok(self.arena.add(
            NodeKind::ExpressionStatement {
                expression,
                directive,
            },
            start.to(end),
        ))
    }

    pub(crate) fn parse_block(&mut self) -> PResult<NodeIndex> {
        let start = self.expect_punct("{")?;
        let mut body = Vec::new();
        while !self.at_punct("}") {
            if self.at_eof() {
                return Err(self.unexpected("expected `}`"));
            }
            body.push(self.parse_statement()?);
        }
        let end = self.expect_punct("}")?;
        Ok(self
            .arena
            .add(NodeKind::BlockStatement { body }, start.to(end)))
    }

    /// Parse `var a = 1, b` without the trailing semicolon; used both for
    /// statements and for `for` initializers.
    fn parse_variable_declaration(&mut self, allow_in: bool) -> PResult<NodeIndex> {
        let start = self.peek().span;
        let keyword = self.expect_ident()?;
        let kind = match keyword.as_str() {
            "var" => VarKind::Var,
            "let" => VarKind::Let,
            "const" => VarKind::Const,
            _ => return Err(self.unexpected("expected a declaration keyword")),
        };
        let mut declarations = Vec::new();
        let mut end = start;
        loop {
            let id_start = self.peek().span;
            let name = self.expect_ident()?;
            let id = self
                .arena
                .add(NodeKind::Identifier { name }, id_start);
            let init = if self.eat_punct("=") {
                self.parse_assignment(!allow_in)?
            } else {
                NodeIndex::NONE
            };
            let declarator_end = if init.is_some() {
                self.arena.get(init).map_or(id_start, |node| node.span)
            } else {
                id_start
            };
            end = id_start.to(declarator_end);
            declarations.push(
                self.arena
                    .add(NodeKind::VariableDeclarator { id, init }, end),
            );
            if !self.eat_punct(",") {
                break;
            }
        }
        Ok(self
            .arena
            .add(NodeKind::VariableDeclaration { kind, declarations }, start.to(end)))
    }

    fn parse_function_declaration(&mut self) -> PResult<NodeIndex> {
        let start = self.peek().span;
        self.bump();
        let name = self.expect_ident()?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        let end = self.arena.get(body).map_or(start, |node| node.span);
        Ok(self
            .arena
            .add(NodeKind::FunctionDeclaration { name, params, body }, start.to(end)))
    }

    pub(crate) fn parse_params(&mut self) -> PResult<Vec<NodeIndex>> {
        self.expect_punct("(")?;
        let mut params = Vec::new();
        while !self.at_punct(")") {
            let span = self.peek().span;
            let name = self.expect_ident()?;
            params.push(self.arena.add(NodeKind::Identifier { name }, span));
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(params)
    }

    fn parse_return(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        // `return` is a restricted production: a newline ends it.
        let argument = if self.at_punct(";")
            || self.at_punct("}")
            || self.at_eof()
            || self.peek().newline_before
        {
            NodeIndex::NONE
        } else {
            self.parse_expression(false)?
        };
        self.semicolon()?;
        let end = if argument.is_some() {
            self.arena.get(argument).map_or(start, |node| node.span)
        } else {
            start
        };
        Ok(self
            .arena
            .add(NodeKind::ReturnStatement { argument }, start.to(end)))
    }

    fn parse_if(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        self.expect_punct("(")?;
        let test = self.parse_expression(false)?;
        self.expect_punct(")")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat_keyword("else") {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        let tail = if alternate.is_some() { alternate } else { consequent };
        let end = self.arena.get(tail).map_or(start, |node| node.span);
        Ok(self.arena.add(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            start.to(end),
        ))
    }

    fn parse_for(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        self.expect_punct("(")?;
        let init = if self.at_punct(";") {
            NodeIndex::NONE
        } else if self.at_keyword("var") || self.at_keyword("let") || self.at_keyword("const") {
            self.parse_variable_declaration(false)?
        } else {
            self.parse_expression(true)?
        };
        if self.eat_keyword("in") {
            let right = self.parse_expression(false)?;
            self.expect_punct(")")?;
            let body = self.parse_statement()?;
            let end = self.arena.get(body).map_or(start, |node| node.span);
            return Ok(self.arena.add(
                NodeKind::ForInStatement {
                    left: init,
                    right,
                    body,
                },
                start.to(end),
            ));
        }
        self.expect_punct(";")?;
        let test = if self.at_punct(";") {
            NodeIndex::NONE
        } else {
            self.parse_expression(false)?
        };
        self.expect_punct(";")?;
        let update = if self.at_punct(")") {
            NodeIndex::NONE
        } else {
            self.parse_expression(false)?
        };
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        let end = self.arena.get(body).map_or(start, |node| node.span);
        Ok(self.arena.add(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
            start.to(end),
        ))
    }

    fn parse_while(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        self.expect_punct("(")?;
        let test = self.parse_expression(false)?;
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        let end = self.arena.get(body).map_or(start, |node| node.span);
        Ok(self
            .arena
            .add(NodeKind::WhileStatement { test, body }, start.to(end)))
    }

    fn parse_do_while(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        let body = self.parse_statement()?;
        if !self.eat_keyword("while") {
            return Err(self.unexpected("expected `while`"));
        }
        self.expect_punct("(")?;
        let test = self.parse_expression(false)?;
        let end = self.expect_punct(")")?;
        self.eat_punct(";");
        Ok(self
            .arena
            .add(NodeKind::DoWhileStatement { body, test }, start.to(end)))
    }

    fn parse_break_continue(&mut self, start: Span) -> PResult<NodeIndex> {
        let keyword = self.expect_ident()?;
        let label = match &self.peek().token {
            Token::Ident(name) if !self.peek().newline_before => {
                let name = name.clone();
                self.bump();
                Some(name)
            }
            _ => None,
        };
        self.semicolon()?;
        let kind = if keyword == "break" {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.arena.add(kind, start))
    }

    fn parse_throw(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        let argument = self.parse_expression(false)?;
        self.semicolon()?;
        let end = self.arena.get(argument).map_or(start, |node| node.span);
        Ok(self
            .arena
            .add(NodeKind::ThrowStatement { argument }, start.to(end)))
    }

    fn parse_try(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        let block = self.parse_block()?;
        let mut param = NodeIndex::NONE;
        let mut handler = NodeIndex::NONE;
        if self.eat_keyword("catch") {
            self.expect_punct("(")?;
            let span = self.peek().span;
            let name = self.expect_ident()?;
            param = self.arena.add(NodeKind::Identifier { name }, span);
            self.expect_punct(")")?;
            handler = self.parse_block()?;
        }
        let finalizer = if self.eat_keyword("finally") {
            self.parse_block()?
        } else {
            NodeIndex::NONE
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("expected `catch` or `finally`"));
        }
        let tail = if finalizer.is_some() { finalizer } else { handler };
        let end = self.arena.get(tail).map_or(start, |node| node.span);
        Ok(self.arena.add(
            NodeKind::TryStatement {
                block,
                param,
                handler,
                finalizer,
            },
            start.to(end),
        ))
    }

    fn parse_switch(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        self.expect_punct("(")?;
        let discriminant = self.parse_expression(false)?;
        self.expect_punct(")")?;
        self.expect_punct("{")?;
        let mut cases = Vec::new();
        while !self.at_punct("}") {
            let case_start = self.peek().span;
            let test = if self.eat_keyword("case") {
                let test = self.parse_expression(false)?;
                self.expect_punct(":")?;
                test
            } else if self.eat_keyword("default") {
                self.expect_punct(":")?;
                NodeIndex::NONE
            } else {
                return Err(self.unexpected("expected `case` or `default`"));
            };
            let mut consequent = Vec::new();
            while !self.at_punct("}") && !self.at_keyword("case") && !self.at_keyword("default") {
                consequent.push(self.parse_statement()?);
            }
            cases.push(
                self.arena
                    .add(NodeKind::SwitchCase { test, consequent }, case_start),
            );
        }
        let end = self.expect_punct("}")?;
        Ok(self.arena.add(
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            },
            start.to(end),
        ))
    }
}
