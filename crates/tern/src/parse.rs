//! Precedence-climbing expression parser.
//!
//! Each binary operator carries a binding power and an associativity; the
//! parser resolves precedence and names the operation, nothing more. Two
//! adjacent operands with no operator between them form an application,
//! which binds as tightly as `.`. Parentheses group only; they never create
//! a tuple by themselves. A unary minus directly before a numeric literal is
//! folded into the literal; there is no other prefix operator.

use std::rc::Rc;

use crate::{
    error::Error,
    expressions::{BinaryOp, Expr, Node},
    tokenize::{self, Pos, Symbol, Token, TokenKind},
};

/// Binding power of application (juxtaposition); ties with `.`.
const APPLY_BP: u8 = 30;

fn binary_symbol(symbol: Symbol) -> Option<BinaryOp> {
    match symbol {
        Symbol::Comma => Some(BinaryOp::Pair),
        Symbol::Assign => Some(BinaryOp::Set),
        Symbol::Colon => Some(BinaryOp::Label),
        Symbol::Arrow => Some(BinaryOp::Def),
        Symbol::Semicolon => Some(BinaryOp::Else),
        Symbol::Question => Some(BinaryOp::If),
        Symbol::Pipe => Some(BinaryOp::Or),
        Symbol::Amp => Some(BinaryOp::And),
        Symbol::Eq => Some(BinaryOp::Eq),
        Symbol::Ne => Some(BinaryOp::Ne),
        Symbol::Lt => Some(BinaryOp::Lt),
        Symbol::Le => Some(BinaryOp::Le),
        Symbol::Gt => Some(BinaryOp::Gt),
        Symbol::Ge => Some(BinaryOp::Ge),
        Symbol::Plus => Some(BinaryOp::Add),
        Symbol::Minus => Some(BinaryOp::Sub),
        Symbol::Star => Some(BinaryOp::Mul),
        Symbol::Slash => Some(BinaryOp::Div),
        Symbol::Percent => Some(BinaryOp::Mod),
        Symbol::Caret => Some(BinaryOp::Pow),
        Symbol::Dot => Some(BinaryOp::Dot),
        _ => None,
    }
}

/// Binding power and right-associativity per operator. Lower binds looser.
fn binding_power(op: BinaryOp) -> (u8, bool) {
    match op {
        BinaryOp::Pair => (10, false),
        BinaryOp::Set | BinaryOp::Label => (11, false),
        BinaryOp::Def => (12, true),
        BinaryOp::Else => (21, false),
        BinaryOp::If => (22, false),
        BinaryOp::Or | BinaryOp::And => (23, false),
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => (24, false),
        BinaryOp::Add | BinaryOp::Sub => (25, false),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => (26, false),
        BinaryOp::Pow => (27, false),
        BinaryOp::Dot | BinaryOp::Apply => (APPLY_BP, false),
    }
}

/// Parses `source` into an executable tree. Empty source parses to the
/// `Nothing` literal, which template hosts rely on for empty expressions.
pub(crate) fn parse_source(source: &str) -> Result<Node, Error> {
    let tokens = tokenize::tokenize(source)?;
    let mut parser = Parser { tokens, idx: 0 };
    if matches!(parser.current().kind, TokenKind::Eof) {
        return Ok(Node::new(Pos::start(), Expr::Nothing));
    }
    let node = parser.parse_expr(0)?;
    match &parser.current().kind {
        TokenKind::Eof => Ok(node),
        kind => Err(Error::parse(
            format!("unexpected {kind} after expression"),
            parser.current().pos,
        )),
    }
}

struct Parser {
    tokens: Vec<Token>,
    idx: usize,
}

impl Parser {
    fn current(&self) -> &Token {
        // the token stream always ends with Eof, which is never consumed
        &self.tokens[self.idx.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        self.idx += 1;
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<Node, Error> {
        let mut lhs = self.parse_operand()?;
        loop {
            let token = self.current();
            let pos = token.pos;
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Symbol(symbol) => {
                    if let Some(op) = binary_symbol(*symbol) {
                        let (bp, right_assoc) = binding_power(op);
                        if bp < min_bp {
                            break;
                        }
                        self.advance();
                        let next_min = if right_assoc { bp } else { bp + 1 };
                        let rhs = self.parse_expr(next_min)?;
                        lhs = Node::new(
                            pos,
                            Expr::Binary {
                                op,
                                lhs: Rc::new(lhs),
                                rhs: Rc::new(rhs),
                            },
                        );
                    } else if matches!(symbol, Symbol::OpenParen | Symbol::OpenBracket | Symbol::OpenBrace) {
                        if APPLY_BP < min_bp {
                            break;
                        }
                        lhs = self.parse_application(lhs, pos)?;
                    } else {
                        // a closing delimiter; the enclosing group handles it
                        break;
                    }
                }
                _ => {
                    // number, string or name directly after an operand:
                    // juxtaposition, i.e. application
                    if APPLY_BP < min_bp {
                        break;
                    }
                    lhs = self.parse_application(lhs, pos)?;
                }
            }
        }
        Ok(lhs)
    }

    fn parse_application(&mut self, lhs: Node, pos: Pos) -> Result<Node, Error> {
        let rhs = self.parse_expr(APPLY_BP + 1)?;
        Ok(Node::new(
            pos,
            Expr::Binary {
                op: BinaryOp::Apply,
                lhs: Rc::new(lhs),
                rhs: Rc::new(rhs),
            },
        ))
    }

    fn parse_operand(&mut self) -> Result<Node, Error> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Node::new(token.pos, Expr::Number(n)))
            }
            TokenKind::String { kind, value } => {
                self.advance();
                Ok(Node::new(token.pos, Expr::String { kind, value }))
            }
            TokenKind::Name(name) => {
                self.advance();
                Ok(Node::new(token.pos, Expr::Name(name)))
            }
            TokenKind::Symbol(Symbol::Minus) => {
                // unary minus folds into a directly following numeric literal
                if let TokenKind::Number(n) = self.tokens[self.idx + 1].kind {
                    self.advance();
                    self.advance();
                    Ok(Node::new(token.pos, Expr::Number(-n)))
                } else {
                    Err(Error::parse("operand expected before '-'", token.pos))
                }
            }
            TokenKind::Symbol(Symbol::OpenParen) => {
                self.advance();
                if self.consume_close(Symbol::CloseParen) {
                    return Ok(Node::new(token.pos, Expr::Nothing));
                }
                let inner = self.parse_expr(0)?;
                self.expect_close(Symbol::CloseParen, token.pos)?;
                Ok(inner)
            }
            TokenKind::Symbol(Symbol::OpenBracket) => {
                self.advance();
                if self.consume_close(Symbol::CloseBracket) {
                    return Ok(Node::new(token.pos, Expr::List(None)));
                }
                let inner = self.parse_expr(0)?;
                self.expect_close(Symbol::CloseBracket, token.pos)?;
                Ok(Node::new(token.pos, Expr::List(Some(Rc::new(inner)))))
            }
            TokenKind::Symbol(Symbol::OpenBrace) => {
                self.advance();
                if self.consume_close(Symbol::CloseBrace) {
                    return Ok(Node::new(token.pos, Expr::NamespaceBlock(None)));
                }
                let inner = self.parse_expr(0)?;
                self.expect_close(Symbol::CloseBrace, token.pos)?;
                Ok(Node::new(token.pos, Expr::NamespaceBlock(Some(Rc::new(inner)))))
            }
            kind => Err(Error::parse(format!("operand expected, found {kind}"), token.pos)),
        }
    }

    fn consume_close(&mut self, close: Symbol) -> bool {
        if self.current().kind == TokenKind::Symbol(close) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_close(&mut self, close: Symbol, open_pos: Pos) -> Result<(), Error> {
        let token = self.current();
        match &token.kind {
            TokenKind::Symbol(s) if *s == close => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Err(Error::parse(
                format!("unbalanced group: expected '{}'", close.text()),
                open_pos,
            )),
            kind => Err(Error::parse(
                format!("expected '{}', found {kind}", close.text()),
                token.pos,
            )),
        }
    }
}
