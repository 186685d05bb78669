//! Tokenizer for tern source text.
//!
//! Scans a source string into a flat token stream in a single pass. The
//! tokenizer has no knowledge of operator precedence; it only recognizes
//! lexical shapes (numbers, strings, names, operator symbols, group
//! delimiters, comments) and records the source position of each token.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A position in source text. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub(crate) fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Which delimiter produced a string literal.
///
/// All three kinds evaluate to the same runtime string; the kind is kept in
/// the token and the parsed tree so an embedding host can give one of them
/// (typically [`StringKind::Template`]) its own meaning later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringKind {
    /// `"…"`
    Double,
    /// `'…'`
    Single,
    /// `` `…` ``
    Template,
}

impl StringKind {
    fn delimiter(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
            Self::Template => '`',
        }
    }
}

/// Operator and delimiter symbols.
///
/// Multi-character symbols (`<=`, `>=`, `==`, `!=`, `->`) are produced with
/// maximal munch, so `<=` never scans as `<` followed by `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    Comma,
    Assign,
    Colon,
    Arrow,
    Semicolon,
    Question,
    Pipe,
    Amp,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Dot,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl Symbol {
    pub(crate) fn text(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Assign => "=",
            Self::Colon => ":",
            Self::Arrow => "->",
            Self::Semicolon => ";",
            Self::Question => "?",
            Self::Pipe => "|",
            Self::Amp => "&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Dot => ".",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    String { kind: StringKind, value: String },
    Name(String),
    Symbol(Symbol),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::String { .. } => f.write_str("string literal"),
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::Symbol(sym) => write!(f, "'{}'", sym.text()),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

/// Scans `source` into tokens, ending with a single [`TokenKind::Eof`].
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Scanner::new(source).run()
}

struct Scanner {
    src: Vec<char>,
    idx: usize,
    line: u32,
    column: u32,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            src: source.chars().collect(),
            idx: 0,
            line: 1,
            column: 1,
        }
    }

    fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.idx).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src.get(self.idx + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.idx += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn run(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let at_end = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if at_end {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                // comments run to the end of the line and are dropped
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let pos = self.pos();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                pos,
            });
        };

        if c.is_ascii_digit() {
            return self.scan_number(pos);
        }
        if c == '"' || c == '\'' || c == '`' {
            return self.scan_string(pos);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.scan_name(pos));
        }
        self.scan_symbol(pos)
    }

    fn scan_number(&mut self, pos: Pos) -> Result<Token, Error> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }
        // a '.' is part of the number only when a digit follows; otherwise it
        // is the subcontexting operator
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.bump();
            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                text.push(c);
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign_len = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign_len).is_some_and(|c| c.is_ascii_digit()) {
                text.push('e');
                self.bump();
                if sign_len == 1 {
                    let sign = self.bump().unwrap_or('+');
                    text.push(sign);
                }
                while let Some(c) = self.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
            }
        }
        let value: f64 = text
            .parse()
            .map_err(|_| Error::parse(format!("invalid number literal '{text}'"), pos))?;
        Ok(Token {
            kind: TokenKind::Number(value),
            pos,
        })
    }

    fn scan_string(&mut self, pos: Pos) -> Result<Token, Error> {
        let kind = match self.bump() {
            Some('\'') => StringKind::Single,
            Some('`') => StringKind::Template,
            _ => StringKind::Double,
        };
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == kind.delimiter() => {
                    return Ok(Token {
                        kind: TokenKind::String { kind, value },
                        pos,
                    });
                }
                Some(c) => value.push(c),
                None => return Err(Error::parse("unterminated string literal", pos)),
            }
        }
    }

    fn scan_name(&mut self, pos: Pos) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.bump();
        }
        Token {
            kind: TokenKind::Name(name),
            pos,
        }
    }

    fn scan_symbol(&mut self, pos: Pos) -> Result<Token, Error> {
        let c = self.bump().unwrap_or_default();
        let symbol = match c {
            ',' => Symbol::Comma,
            ':' => Symbol::Colon,
            ';' => Symbol::Semicolon,
            '?' => Symbol::Question,
            '|' => Symbol::Pipe,
            '&' => Symbol::Amp,
            '+' => Symbol::Plus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '%' => Symbol::Percent,
            '^' => Symbol::Caret,
            '.' => Symbol::Dot,
            '(' => Symbol::OpenParen,
            ')' => Symbol::CloseParen,
            '[' => Symbol::OpenBracket,
            ']' => Symbol::CloseBracket,
            '{' => Symbol::OpenBrace,
            '}' => Symbol::CloseBrace,
            '-' => {
                if self.peek() == Some('>') {
                    self.bump();
                    Symbol::Arrow
                } else {
                    Symbol::Minus
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Symbol::Eq
                } else {
                    Symbol::Assign
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Symbol::Le
                } else {
                    Symbol::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Symbol::Ge
                } else {
                    Symbol::Gt
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.bump();
                    Symbol::Ne
                } else {
                    return Err(Error::parse("unexpected character '!'", pos));
                }
            }
            other => {
                return Err(Error::parse(format!("unexpected character '{other}'"), pos));
            }
        };
        Ok(Token {
            kind: TokenKind::Symbol(symbol),
            pos,
        })
    }
}
