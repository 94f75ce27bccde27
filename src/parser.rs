use std::mem;

use thiserror::Error;

use crate::{
    ast::{CompareOp, Expr, LogicalOp, Token, TokenKind, Wildcard},
    value::Value,
};

/// Errors raised while building the AST from tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, got '{found}' at position {position}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: &'static str,
    },

    #[error("Expected a value after comparison operator, got '{found}' at position {position}")]
    MissingValue { position: usize, found: String },

    #[error("Empty tag path at position {position}")]
    EmptyTagPath { position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::MissingValue { position, .. }
            | ParseError::EmptyTagPath { position } => *position,
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    /// Create a parser over a token sequence produced by the lexer.
    ///
    /// A missing trailing [`TokenKind::Eof`] is supplied so the parser never
    /// reads past the end.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let position = tokens.last().map_or(0, |t| t.position + 1);
            tokens.push(Token::new(TokenKind::Eof, position));
        }
        Parser { tokens, index: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current().kind) == mem::discriminant(kind)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        ParseError::UnexpectedToken {
            position: token.position,
            found: token.kind.to_string(),
            expected,
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if !self.check(&kind) {
            return Err(self.unexpected(expected));
        }
        self.advance();
        Ok(())
    }

    /// Parse a complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Eof, "'&&', '||' or end of input")?;
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&TokenKind::OrOr) {
            self.advance();
            let right = self.parse_and()?;

            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while self.check(&TokenKind::AndAnd) {
            self.advance();
            let right = self.parse_unary()?;

            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Bang) {
            self.advance();
            let operand = self.parse_unary()?; // Right-associative
            return Ok(Expr::Negation(Box::new(operand)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match &self.current().kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            TokenKind::TagRef(_) => self.parse_tag_expr(),
            _ => Err(self.unexpected("a tag reference, '!' or '('")),
        }
    }

    fn parse_tag_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.current().position;
        let raw = match &self.current().kind {
            TokenKind::TagRef(path) => path.clone(),
            _ => return Err(self.unexpected("a tag reference")),
        };
        self.advance();

        let path = raw.trim_end_matches('.');
        if path.is_empty() {
            return Err(ParseError::EmptyTagPath { position });
        }

        if let Some(op) = self.comparison_operator() {
            self.advance();
            let value = self.parse_value()?;
            return Ok(Expr::Comparison {
                path: path.to_string(),
                op,
                value,
            });
        }

        if self.check(&TokenKind::Star) {
            self.advance();
            // `path.*` lexes with the trailing dot kept
            let wildcard = if raw.ends_with('.') {
                Wildcard::ChildrenOnly
            } else {
                Wildcard::Inclusive
            };
            return Ok(Expr::Presence {
                path: path.to_string(),
                wildcard,
            });
        }

        Ok(Expr::Presence {
            path: path.to_string(),
            wildcard: Wildcard::None,
        })
    }

    fn comparison_operator(&self) -> Option<CompareOp> {
        match self.current().kind {
            TokenKind::EqEq => Some(CompareOp::Equal),
            TokenKind::NotEq => Some(CompareOp::NotEqual),
            TokenKind::Gt => Some(CompareOp::GreaterThan),
            TokenKind::GtEq => Some(CompareOp::GreaterEqual),
            TokenKind::Lt => Some(CompareOp::LessThan),
            TokenKind::LtEq => Some(CompareOp::LessEqual),
            _ => None,
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.current();
        if !token.kind.is_value() {
            return Err(ParseError::MissingValue {
                position: token.position,
                found: token.kind.to_string(),
            });
        }

        let value = match mem::replace(&mut self.tokens[self.index].kind, TokenKind::Eof) {
            TokenKind::String(s) => Value::String(s),
            TokenKind::Integer(n) => Value::Integer(n),
            TokenKind::Float(n) => Value::Float(n),
            TokenKind::Boolean(b) => Value::Boolean(b),
            TokenKind::None => Value::None,
            _ => unreachable!("checked by is_value"),
        };
        self.advance();
        Ok(value)
    }
}

/// Parse a token sequence into an AST.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}
