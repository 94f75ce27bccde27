use std::fmt;

/// A lexical token together with its character offset in the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Zero-based character offset of the token's first character
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Token { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // References
    /// Tag reference, stored without the `tag.` prefix and lower-cased
    ///
    /// A trailing `.` is kept so the parser can tell `path*` from `path.*`.
    ///
    /// # Examples
    /// ```text
    /// tag.person.alice      // TagRef("person.alice")
    /// tag.Scene.Outdoor.    // TagRef("scene.outdoor.")
    /// ```
    TagRef(String),

    // Literals
    /// String literal enclosed in single or double quotes, no escapes
    ///
    /// # Examples
    /// ```text
    /// "Springfield"
    /// 'Springfield'
    /// ```
    String(String),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 2018
    /// -4
    /// ```
    Integer(i64),

    /// Floating point number, any numeric literal containing a `.`
    ///
    /// # Examples
    /// ```text
    /// 40.71
    /// -73.5
    /// ```
    Float(f64),

    /// `true` or `false`
    Boolean(bool),

    /// `None`
    None,

    // Comparison
    /// Equality operator `==`
    EqEq,

    /// Inequality operator `!=`
    NotEq,

    /// Greater than `>`
    Gt,

    /// Greater than or equal `>=`
    GtEq,

    /// Less than `<`
    Lt,

    /// Less than or equal `<=`
    LtEq,

    // Logical
    /// Logical AND `&&`
    AndAnd,

    /// Logical OR `||`
    OrOr,

    /// Negation `!`
    Bang,

    /// Wildcard `*`
    Star,

    // Delimiters
    LParen,
    RParen,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether this token is a literal value usable on the right of a comparison.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::String(_)
                | TokenKind::Integer(_)
                | TokenKind::Float(_)
                | TokenKind::Boolean(_)
                | TokenKind::None
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::TagRef(path) => write!(f, "tag.{}", path),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Float(n) => write!(f, "{}", n),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::None => write!(f, "None"),
            TokenKind::EqEq => write!(f, "=="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::GtEq => write!(f, ">="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::LtEq => write!(f, "<="),
            TokenKind::AndAnd => write!(f, "&&"),
            TokenKind::OrOr => write!(f, "||"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
