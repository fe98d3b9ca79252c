//! Hand-rolled tokenizer for the JavaScript subset AMD modules use.
//!
//! The whole file is scanned up front into a token vector; the parser indexes
//! into it, which makes lookahead and backtracking cheap. Each token records
//! whether a line terminator preceded it, which drives automatic semicolon
//! insertion and the restricted productions.

use esmify_ast::{Diagnostic, Span};
use memchr::memchr;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Identifiers and keywords; the parser distinguishes by text.
    Ident(String),
    Str { value: String, raw: String },
    Num(String),
    Regex(String),
    Punct(&'static str),
    Eof,
}

#[derive(Clone, Debug)]
pub struct Lexed {
    pub token: Token,
    pub span: Span,
    pub newline_before: bool,
}

/// Multi-character punctuators, longest first so greedy matching works.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "===", "!==", ">>>", "<<=", ">>=", "=>", "==", "!=", "<=", ">=", "&&", "||", "++",
    "--", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "(", ")", "[", "]", "{",
    "}", ";", ",", "<", ">", "+", "-", "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=",
    ".",
];

/// Keywords after which a `/` starts a regular expression literal rather
/// than a division.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else",
];

pub fn scan(source: &str) -> Result<Vec<Lexed>, Diagnostic> {
    Scanner::new(source).run()
}

struct Scanner<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
    newline_before: bool,
    tokens: Vec<Lexed>,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Scanner<'src> {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            newline_before: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Lexed>, Diagnostic> {
        loop {
            self.skip_trivia()?;
            let start = self.pos;
            if self.pos >= self.bytes.len() {
                self.push(Token::Eof, start);
                return Ok(self.tokens);
            }
            let byte = self.bytes[self.pos];
            match byte {
                b'"' | b'\'' => self.scan_string(byte)?,
                b'0'..=b'9' => self.scan_number(),
                b'.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.scan_number()
                }
                b'/' if self.regex_allowed() => self.scan_regex()?,
                _ if is_ident_start(self.peek_char()) => self.scan_ident(),
                _ => self.scan_punct(start)?,
            }
        }
    }

    fn push(&mut self, token: Token, start: usize) {
        let span = Span::new(start as u32, self.pos as u32);
        let newline_before = std::mem::take(&mut self.newline_before);
        self.tokens.push(Lexed {
            token,
            span,
            newline_before,
        });
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    fn skip_trivia(&mut self) -> Result<(), Diagnostic> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\n' => {
                    self.newline_before = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | 0x0c => self.pos += 1,
                b'/' if self.peek_byte(1) == Some(b'/') => {
                    match memchr(b'\n', &self.bytes[self.pos..]) {
                        Some(offset) => self.pos += offset,
                        None => self.pos = self.bytes.len(),
                    }
                }
                b'/' if self.peek_byte(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.pos >= self.bytes.len() {
                            return Err(Diagnostic::new(
                                "unterminated block comment",
                                Span::new(start as u32, self.pos as u32),
                            ));
                        }
                        if self.bytes[self.pos] == b'\n' {
                            self.newline_before = true;
                        }
                        if self.bytes[self.pos] == b'*' && self.peek_byte(1) == Some(b'/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// A `/` begins a regex when the previous significant token cannot end an
    /// expression.
    fn regex_allowed(&self) -> bool {
        if self.peek_byte(0) != Some(b'/') {
            return false;
        }
        match self.tokens.last().map(|lexed| &lexed.token) {
            None => true,
            Some(Token::Punct(p)) => !matches!(*p, ")" | "]" | "}" | "++" | "--"),
            Some(Token::Ident(name)) => REGEX_PRECEDING_KEYWORDS.contains(&name.as_str()),
            Some(Token::Str { .. } | Token::Num(_) | Token::Regex(_) | Token::Eof) => false,
        }
    }

    fn scan_regex(&mut self) -> Result<(), Diagnostic> {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            let Some(byte) = self.peek_byte(0) else {
                return Err(Diagnostic::new(
                    "unterminated regular expression",
                    Span::new(start as u32, self.pos as u32),
                ));
            };
            match byte {
                b'\\' => self.pos += 2,
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    break;
                }
                b'\n' => {
                    return Err(Diagnostic::new(
                        "unterminated regular expression",
                        Span::new(start as u32, self.pos as u32),
                    ));
                }
                _ => self.pos += 1,
            }
        }
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        let raw = self.source[start..self.pos].to_string();
        self.push(Token::Regex(raw), start);
        Ok(())
    }

    fn scan_string(&mut self, quote: u8) -> Result<(), Diagnostic> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(byte) = self.peek_byte(0) else {
                return Err(Diagnostic::new(
                    "unterminated string literal",
                    Span::new(start as u32, self.pos as u32),
                ));
            };
            if byte == quote {
                self.pos += 1;
                break;
            }
            match byte {
                b'\n' => {
                    return Err(Diagnostic::new(
                        "unterminated string literal",
                        Span::new(start as u32, self.pos as u32),
                    ));
                }
                b'\\' => {
                    self.pos += 1;
                    let Some(escaped) = self.peek_byte(0) else {
                        continue;
                    };
                    match escaped {
                        b'n' => {
                            value.push('\n');
                            self.pos += 1;
                        }
                        b't' => {
                            value.push('\t');
                            self.pos += 1;
                        }
                        b'r' => {
                            value.push('\r');
                            self.pos += 1;
                        }
                        b'0' => {
                            value.push('\0');
                            self.pos += 1;
                        }
                        b'b' => {
                            value.push('\u{8}');
                            self.pos += 1;
                        }
                        b'f' => {
                            value.push('\u{c}');
                            self.pos += 1;
                        }
                        b'v' => {
                            value.push('\u{b}');
                            self.pos += 1;
                        }
                        // Line continuation: escaped newline contributes nothing.
                        b'\n' => self.pos += 1,
                        b'u' | b'x' => {
                            let digits = if escaped == b'u' { 4 } else { 2 };
                            let hex_start = self.pos + 1;
                            let hex_end = (hex_start + digits).min(self.bytes.len());
                            let hex = &self.source[hex_start..hex_end];
                            if let Ok(code) = u32::from_str_radix(hex, 16) {
                                if let Some(ch) = char::from_u32(code) {
                                    value.push(ch);
                                }
                                self.pos += 1 + digits;
                            } else {
                                value.push(escaped as char);
                                self.pos += 1;
                            }
                        }
                        _ => {
                            let ch = self.source[self.pos..].chars().next().unwrap_or('\0');
                            value.push(ch);
                            self.pos += ch.len_utf8();
                        }
                    }
                }
                _ => {
                    let ch = self.source[self.pos..].chars().next().unwrap_or('\0');
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        let raw = self.source[start..self.pos].to_string();
        self.push(Token::Str { value, raw }, start);
        Ok(())
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        if self.peek_byte(0) == Some(b'0')
            && matches!(self.peek_byte(1), Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B'))
        {
            self.pos += 2;
            while self
                .peek_byte(0)
                .is_some_and(|b| b.is_ascii_alphanumeric())
            {
                self.pos += 1;
            }
        } else {
            while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.peek_byte(0) == Some(b'.') {
                self.pos += 1;
                while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
            if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
                self.pos += 1;
                if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let raw = self.source[start..self.pos].to_string();
        self.push(Token::Num(raw), start);
    }

    fn scan_ident(&mut self) {
        let start = self.pos;
        for ch in self.source[self.pos..].chars() {
            if is_ident_part(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        let name = self.source[start..self.pos].to_string();
        self.push(Token::Ident(name), start);
    }

    fn scan_punct(&mut self, start: usize) -> Result<(), Diagnostic> {
        for punct in PUNCTUATORS {
            if self.source[self.pos..].starts_with(punct) {
                self.pos += punct.len();
                self.push(Token::Punct(punct), start);
                return Ok(());
            }
        }
        Err(Diagnostic::new(
            format!("unexpected character `{}`", self.peek_char()),
            Span::new(start as u32, start as u32 + 1),
        ))
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        scan(source)
            .unwrap()
            .into_iter()
            .map(|lexed| lexed.token)
            .collect()
    }

    #[test]
    fn scans_punctuators_greedily() {
        assert_eq!(
            kinds("a === b"),
            vec![
                Token::Ident("a".into()),
                Token::Punct("==="),
                Token::Ident("b".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn scans_strings_with_escapes() {
        let tokens = kinds(r#"'a\'b'"#);
        assert_eq!(
            tokens[0],
            Token::Str {
                value: "a'b".into(),
                raw: r#"'a\'b'"#.into()
            }
        );
    }

    #[test]
    fn distinguishes_regex_from_division() {
        let tokens = kinds("a / b");
        assert_eq!(tokens[1], Token::Punct("/"));
        let tokens = kinds("return /ab/g");
        assert_eq!(tokens[1], Token::Regex("/ab/g".into()));
        let tokens = kinds("x = /[/]/");
        assert_eq!(tokens[2], Token::Regex("/[/]/".into()));
    }

    #[test]
    fn skips_comments_and_tracks_newlines() {
        let tokens = scan("a // trailing\nb /* block */ c").unwrap();
        assert!(!tokens[0].newline_before);
        assert!(tokens[1].newline_before);
        assert!(!tokens[2].newline_before);
        assert_eq!(tokens[2].token, Token::Ident("c".into()));
    }

    #[test]
    fn scans_numbers() {
        assert_eq!(kinds("0x1f")[0], Token::Num("0x1f".into()));
        assert_eq!(kinds("1.5e-3")[0], Token::Num("1.5e-3".into()));
        assert_eq!(kinds(".25")[0], Token::Num(".25".into()));
    }
}
