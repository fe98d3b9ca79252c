//! Expression parsing: precedence climbing plus the call/member chains.

use crate::parser::{PResult, Parser};
use crate::scanner::Token;
use esmify_ast::{NodeIndex, NodeKind, Span};

const ASSIGNMENT_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^=",
];

impl Parser {
    fn span_of(&self, index: NodeIndex) -> Span {
        self.arena.get(index).map_or(Span::SYNTHETIC, |node| node.span)
    }

    /// Full expression, including comma sequences.
    pub(crate) fn parse_expression(&mut self, no_in: bool) -> PResult<NodeIndex> {
        let first = self.parse_assignment(no_in)?;
        if !self.at_punct(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_punct(",") {
            expressions.push(self.parse_assignment(no_in)?);
        }
        let span = self
            .span_of(expressions[0])
            .to(self.span_of(*expressions.last().unwrap()));
        Ok(self
            .arena
            .add(NodeKind::SequenceExpression { expressions }, span))
    }

    pub(crate) fn parse_assignment(&mut self, no_in: bool) -> PResult<NodeIndex> {
        self.enter()?;
        let result = self.parse_assignment_inner(no_in);
        self.leave();
        result
    }

    fn parse_assignment_inner(&mut self, no_in: bool) -> PResult<NodeIndex> {
        // `x => body`
        if matches!(&self.peek().token, Token::Ident(name) if !is_reserved_word(name))
            && matches!(self.peek_at(1).token, Token::Punct("=>"))
        {
            let start = self.peek().span;
            let name = self.expect_ident()?;
            let param = self.arena.add(NodeKind::Identifier { name }, start);
            self.bump();
            return self.parse_arrow_tail(vec![param], start);
        }
        // `(a, b) => body`
        if self.at_punct("(") && self.is_arrow_ahead() {
            let start = self.peek().span;
            let params = self.parse_params()?;
            self.expect_punct("=>")?;
            return self.parse_arrow_tail(params, start);
        }

        let left = self.parse_conditional(no_in)?;
        let operator = match &self.peek().token {
            Token::Punct(p) if ASSIGNMENT_OPS.contains(p) => p.to_string(),
            _ => return Ok(left),
        };
        self.bump();
        let right = self.parse_assignment(no_in)?;
        let span = self.span_of(left).to(self.span_of(right));
        Ok(self.arena.add(
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            },
            span,
        ))
    }

    /// Tokens from the current `(` to its matching `)` followed by `=>`.
    fn is_arrow_ahead(&self) -> bool {
        let mut depth = 0usize;
        let mut offset = 0usize;
        loop {
            match &self.peek_at(offset).token {
                Token::Punct("(") => depth += 1,
                Token::Punct(")") => {
                    depth -= 1;
                    if depth == 0 {
                        return matches!(self.peek_at(offset + 1).token, Token::Punct("=>"));
                    }
                }
                Token::Eof => return false,
                _ => {}
            }
            offset += 1;
        }
    }

    fn parse_arrow_tail(&mut self, params: Vec<NodeIndex>, start: Span) -> PResult<NodeIndex> {
        let (body, expression) = if self.at_punct("{") {
            (self.parse_block()?, false)
        } else {
            (self.parse_assignment(false)?, true)
        };
        let span = start.to(self.span_of(body));
        Ok(self.arena.add(
            NodeKind::ArrowFunctionExpression {
                params,
                body,
                expression,
            },
            span,
        ))
    }

    fn parse_conditional(&mut self, no_in: bool) -> PResult<NodeIndex> {
        let test = self.parse_binary(1, no_in)?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect_punct(":")?;
        let alternate = self.parse_assignment(no_in)?;
        let span = self.span_of(test).to(self.span_of(alternate));
        Ok(self.arena.add(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            span,
        ))
    }

    fn peek_binary_op(&self, no_in: bool) -> Option<(u8, String, bool)> {
        match &self.peek().token {
            Token::Punct(p) => {
                let (prec, logical) = match *p {
                    "||" => (1, true),
                    "&&" => (2, true),
                    "|" => (3, false),
                    "^" => (4, false),
                    "&" => (5, false),
                    "==" | "!=" | "===" | "!==" => (6, false),
                    "<" | ">" | "<=" | ">=" => (7, false),
                    "<<" | ">>" | ">>>" => (8, false),
                    "+" | "-" => (9, false),
                    "*" | "/" | "%" => (10, false),
                    _ => return None,
                };
                Some((prec, p.to_string(), logical))
            }
            Token::Ident(name) if name == "instanceof" => Some((7, name.clone(), false)),
            Token::Ident(name) if name == "in" && !no_in => Some((7, name.clone(), false)),
            _ => None,
        }
    }

    fn parse_binary(&mut self, min_prec: u8, no_in: bool) -> PResult<NodeIndex> {
        let mut left = self.parse_unary()?;
        loop {
            let Some((prec, operator, logical)) = self.peek_binary_op(no_in) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.bump();
            let right = self.parse_binary(prec + 1, no_in)?;
            let span = self.span_of(left).to(self.span_of(right));
            let kind = if logical {
                NodeKind::LogicalExpression {
                    operator,
                    left,
                    right,
                }
            } else {
                NodeKind::BinaryExpression {
                    operator,
                    left,
                    right,
                }
            };
            left = self.arena.add(kind, span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<NodeIndex> {
        self.enter()?;
        let result = self.parse_unary_inner();
        self.leave();
        result
    }

    fn parse_unary_inner(&mut self) -> PResult<NodeIndex> {
        let start = self.peek().span;
        match &self.peek().token {
            Token::Punct(p @ ("!" | "~" | "+" | "-")) => {
                let operator = p.to_string();
                self.bump();
                let argument = self.parse_unary()?;
                let span = start.to(self.span_of(argument));
                Ok(self
                    .arena
                    .add(NodeKind::UnaryExpression { operator, argument }, span))
            }
            Token::Punct(p @ ("++" | "--")) => {
                let operator = p.to_string();
                self.bump();
                let argument = self.parse_unary()?;
                let span = start.to(self.span_of(argument));
                Ok(self.arena.add(
                    NodeKind::UpdateExpression {
                        operator,
                        argument,
                        prefix: true,
                    },
                    span,
                ))
            }
            Token::Ident(name) if matches!(name.as_str(), "typeof" | "void" | "delete") => {
                let operator = name.clone();
                self.bump();
                let argument = self.parse_unary()?;
                let span = start.to(self.span_of(argument));
                Ok(self
                    .arena
                    .add(NodeKind::UnaryExpression { operator, argument }, span))
            }
            _ => {
                let expression = self.parse_call_member(true)?;
                match &self.peek().token {
                    Token::Punct(p @ ("++" | "--")) if !self.peek().newline_before => {
                        let operator = p.to_string();
                        let span = start.to(self.peek().span);
                        self.bump();
                        Ok(self.arena.add(
                            NodeKind::UpdateExpression {
                                operator,
                                argument: expression,
                                prefix: false,
                            },
                            span,
                        ))
                    }
                    _ => Ok(expression),
                }
            }
        }
    }

    fn parse_call_member(&mut self, allow_call: bool) -> PResult<NodeIndex> {
        let base = if self.at_keyword("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_member_chain(base, allow_call)
    }

    fn parse_member_chain(&mut self, mut expr: NodeIndex, allow_call: bool) -> PResult<NodeIndex> {
        loop {
            if self.eat_punct(".") {
                let span = self.peek().span;
                let name = self.expect_ident()?;
                let property = self.arena.add(NodeKind::Identifier { name }, span);
                let full = self.span_of(expr).to(span);
                expr = self.arena.add(
                    NodeKind::MemberExpression {
                        object: expr,
                        property,
                        computed: false,
                    },
                    full,
                );
            } else if self.at_punct("[") {
                self.bump();
                let property = self.parse_expression(false)?;
                let end = self.expect_punct("]")?;
                let full = self.span_of(expr).to(end);
                expr = self.arena.add(
                    NodeKind::MemberExpression {
                        object: expr,
                        property,
                        computed: true,
                    },
                    full,
                );
            } else if allow_call && self.at_punct("(") {
                let arguments = self.parse_arguments()?;
                let full = self.span_of(expr).to(self.tokens[self.pos - 1].span);
                expr = self.arena.add(
                    NodeKind::CallExpression {
                        callee: expr,
                        arguments,
                    },
                    full,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_new(&mut self) -> PResult<NodeIndex> {
        let start = self.peek().span;
        self.bump();
        let callee = if self.at_keyword("new") {
            self.parse_new()?
        } else {
            let base = self.parse_primary()?;
            self.parse_member_chain(base, false)?
        };
        let arguments = if self.at_punct("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let span = start.to(self.span_of(callee));
        Ok(self
            .arena
            .add(NodeKind::NewExpression { callee, arguments }, span))
    }

    fn parse_arguments(&mut self) -> PResult<Vec<NodeIndex>> {
        self.expect_punct("(")?;
        let mut arguments = Vec::new();
        while !self.at_punct(")") {
            arguments.push(self.parse_assignment(false)?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> PResult<NodeIndex> {
        let start = self.peek().span;
        match self.peek().token.clone() {
            Token::Num(raw) => {
                self.bump();
                Ok(self.arena.add(NodeKind::NumberLiteral { raw }, start))
            }
            Token::Str { value, raw } => {
                self.bump();
                Ok(self.arena.add(NodeKind::StringLiteral { value, raw }, start))
            }
            Token::Regex(raw) => {
                self.bump();
                Ok(self.arena.add(NodeKind::RegexLiteral { raw }, start))
            }
            Token::Punct("(") => {
                self.bump();
                let expression = self.parse_expression(false)?;
                let end = self.expect_punct(")")?;
                Ok(self.arena.add(
                    NodeKind::ParenthesizedExpression { expression },
                    start.to(end),
                ))
            }
            Token::Punct("[") => self.parse_array(start),
            Token::Punct("{") => self.parse_object(start),
            Token::Ident(name) => match name.as_str() {
                "function" => self.parse_function_expression(start),
                "this" => {
                    self.bump();
                    Ok(self.arena.add(NodeKind::ThisExpression, start))
                }
                "true" | "false" => {
                    self.bump();
                    Ok(self.arena.add(
                        NodeKind::BooleanLiteral {
                            value: name == "true",
                        },
                        start,
                    ))
                }
                "null" => {
                    self.bump();
                    Ok(self.arena.add(NodeKind::NullLiteral, start))
                }
                _ => {
                    self.bump();
                    Ok(self.arena.add(NodeKind::Identifier { name }, start))
                }
            },
            _ => Err(self.unexpected("expected an expression")),
        }
    }

    fn parse_function_expression(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        let name = match &self.peek().token {
            Token::Ident(name) => {
                let name = name.clone();
                self.bump();
                Some(name)
            }
            _ => None,
        };
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        let span = start.to(self.span_of(body));
        Ok(self
            .arena
            .add(NodeKind::FunctionExpression { name, params, body }, span))
    }

    fn parse_array(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        let mut elements = Vec::new();
        while !self.at_punct("]") {
            elements.push(self.parse_assignment(false)?);
            if !self.eat_punct(",") {
                break;
            }
        }
        let end = self.expect_punct("]")?;
        Ok(self
            .arena
            .add(NodeKind::ArrayExpression { elements }, start.to(end)))
    }

    fn parse_object(&mut self, start: Span) -> PResult<NodeIndex> {
        self.bump();
        let mut properties = Vec::new();
        while !self.at_punct("}") {
            let key_span = self.peek().span;
            let key = match self.peek().token.clone() {
                Token::Ident(name) => {
                    self.bump();
                    self.arena.add(NodeKind::Identifier { name }, key_span)
                }
                Token::Str { value, raw } => {
                    self.bump();
                    self.arena
                        .add(NodeKind::StringLiteral { value, raw }, key_span)
                }
                Token::Num(raw) => {
                    self.bump();
                    self.arena.add(NodeKind::NumberLiteral { raw }, key_span)
                }
                _ => return Err(self.unexpected("expected a property name")),
            };
            let (value, shorthand) = if self.eat_punct(":") {
                (self.parse_assignment(false)?, false)
            } else {
                // Shorthand property: the key doubles as the value.
                (key, true)
            };
            let span = key_span.to(self.span_of(value));
            properties.push(self.arena.add(
                NodeKind::Property {
                    key,
                    value,
                    computed: false,
                    shorthand,
                },
                span,
            ));
            if !self.eat_punct(",") {
                break;
            }
        }
        let end = self.expect_punct("}")?;
        Ok(self
            .arena
            .add(NodeKind::ObjectExpression { properties }, start.to(end)))
    }
}

fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "var" | "let"
            | "const"
            | "function"
            | "return"
            | "if"
            | "else"
            | "for"
            | "while"
            | "do"
            | "break"
            | "continue"
            | "throw"
            | "try"
            | "catch"
            | "finally"
            | "switch"
            | "case"
            | "default"
            | "new"
            | "delete"
            | "typeof"
            | "void"
            | "instanceof"
            | "in"
            | "this"
            | "null"
            | "true"
            | "false"
    )
}
