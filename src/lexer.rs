use thiserror::Error;

use crate::ast::{Token, TokenKind};

const TAG_PREFIX: &str = "tag.";

/// Errors raised while tokenizing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("Unterminated string starting at position {position}: missing closing {quote}")]
    UnterminatedString { position: usize, quote: char },

    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber { position: usize, text: String },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position, .. }
            | LexError::InvalidNumber { position, .. } => *position,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Whether the input at the current position spells `word`.
    fn starts_with(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, c)| self.peek_char(i) == Some(c))
    }

    /// Like [`starts_with`](Self::starts_with), but the word must not run on
    /// into further identifier characters.
    fn starts_with_word(&self, word: &str) -> bool {
        let len = word.chars().count();
        self.starts_with(word)
            && !self
                .peek_char(len)
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    fn read_tag_ref(&mut self) -> String {
        self.position += TAG_PREFIX.len();

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            // Same alphabet the taxonomy accepts for tag names
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result.to_ascii_lowercase()
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(LexError::UnterminatedString {
            position: start,
            quote,
        })
    }

    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let invalid = || LexError::InvalidNumber {
            position: start,
            text: number.clone(),
        };

        if is_float {
            number
                .parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| invalid())
        } else {
            number
                .parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| invalid())
        }
    }

    /// Consume `width` characters and produce `kind`.
    fn symbol(&mut self, kind: TokenKind, width: usize) -> TokenKind {
        self.position += width;
        kind
    }

    fn unexpected(&self, character: char) -> LexError {
        LexError::UnexpectedCharacter {
            position: self.position,
            character,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let kind = match self.current_char() {
            None => TokenKind::Eof,
            Some('(') => self.symbol(TokenKind::LParen, 1),
            Some(')') => self.symbol(TokenKind::RParen, 1),
            Some('*') => self.symbol(TokenKind::Star, 1),
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.symbol(TokenKind::AndAnd, 2)
                } else {
                    return Err(self.unexpected('&'));
                }
            }
            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.symbol(TokenKind::OrOr, 2)
                } else {
                    return Err(self.unexpected('|'));
                }
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.symbol(TokenKind::EqEq, 2)
                } else {
                    return Err(self.unexpected('='));
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.symbol(TokenKind::NotEq, 2)
                } else {
                    self.symbol(TokenKind::Bang, 1)
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.symbol(TokenKind::GtEq, 2)
                } else {
                    self.symbol(TokenKind::Gt, 1)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.symbol(TokenKind::LtEq, 2)
                } else {
                    self.symbol(TokenKind::Lt, 1)
                }
            }
            Some(quote @ ('"' | '\'')) => TokenKind::String(self.read_string(quote)?),
            Some(_) if self.starts_with(TAG_PREFIX) => TokenKind::TagRef(self.read_tag_ref()),
            Some(_) if self.starts_with_word("true") => self.symbol(TokenKind::Boolean(true), 4),
            Some(_) if self.starts_with_word("false") => {
                self.symbol(TokenKind::Boolean(false), 5)
            }
            Some(_) if self.starts_with_word("None") => self.symbol(TokenKind::None, 4),
            Some(ch)
                if ch.is_ascii_digit()
                    || (ch == '-' && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.read_number()?
            }
            Some(ch) => return Err(self.unexpected(ch)),
        };

        Ok(Token::new(kind, start))
    }

    /// Tokenize the whole input. The result always ends with [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Tokenize an expression string.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).tokenize()
}
