use crate::ast::{CompareOp, LogicalOp, Wildcard};
use crate::value::Value;

/// Abstract Syntax Tree node of a tag query.
///
/// Tag paths are stored lower-cased, without the `tag.` prefix and without
/// trailing dots.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Value comparison against a fixed field
    ///
    /// # Examples
    /// ```text
    /// tag.datetime.year>=2018
    /// tag.location.city=="Springfield"
    /// tag.datetime==None
    /// ```
    Comparison {
        path: String,
        op: CompareOp,
        value: Value,
    },

    /// Binary `&&` / `||`
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Presence check, optionally widened to descendants
    ///
    /// # Examples
    /// ```text
    /// tag.person.alice        // Wildcard::None
    /// tag.scene.outdoor*      // Wildcard::Inclusive
    /// tag.scene.outdoor.*     // Wildcard::ChildrenOnly
    /// ```
    Presence { path: String, wildcard: Wildcard },

    /// Negation (`!expr`)
    Negation(Box<Expr>),
}

impl Expr {
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOp::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(child: Expr) -> Self {
        Expr::Negation(Box::new(child))
    }

    pub fn presence(path: impl Into<String>, wildcard: Wildcard) -> Self {
        Expr::Presence {
            path: path.into(),
            wildcard,
        }
    }

    pub fn comparison(path: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Expr::Comparison {
            path: path.into(),
            op,
            value,
        }
    }

    /// Every tag path referenced by the expression, in source order.
    pub fn paths(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Comparison { path, .. } | Expr::Presence { path, .. } => out.push(path),
            Expr::Logical { left, right, .. } => {
                left.collect_paths(out);
                right.collect_paths(out);
            }
            Expr::Negation(child) => child.collect_paths(out),
        }
    }
}
