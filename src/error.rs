use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::resolver::ResolveError;

/// Any failure while compiling a query expression.
///
/// All three kinds are local to the expression that produced them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Syntax error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),
}

impl QueryError {
    /// Character offset of a lex or parse error.
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::Lex(e) => Some(e.position()),
            QueryError::Parse(e) => Some(e.position()),
            QueryError::Resolve(_) => None,
        }
    }

    /// Offending path of a resolution error.
    pub fn path(&self) -> Option<&str> {
        match self {
            QueryError::Resolve(e) => Some(e.path()),
            _ => None,
        }
    }
}
