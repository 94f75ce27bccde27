//! Canonical text rendering of parsed queries.
//!
//! [`Expr`] implements `Display`, printing the expression with the `tag.`
//! prefix restored and only the parentheses its structure needs. Parsing the
//! printed text yields an AST equal to the original.
//!
//! # Examples
//!
//! ```
//! use tagquery::{lexer::tokenize, parser::parse};
//!
//! let expr = parse(tokenize("( tag.A || tag.b ) && !tag.c.*").unwrap()).unwrap();
//! assert_eq!(expr.to_string(), "(tag.a || tag.b) && !tag.c.*");
//! ```

use std::fmt;

use crate::ast::{Expr, LogicalOp, Wildcard};
use crate::value::Value;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison { path, op, value } => {
                write!(f, "tag.{}{}", path, op)?;
                write_literal(f, value)
            }
            Expr::Presence { path, wildcard } => match wildcard {
                Wildcard::None => write!(f, "tag.{}", path),
                Wildcard::Inclusive => write!(f, "tag.{}*", path),
                Wildcard::ChildrenOnly => write!(f, "tag.{}.*", path),
            },
            Expr::Negation(child) => {
                if matches!(**child, Expr::Logical { .. }) {
                    write!(f, "!({})", child)
                } else {
                    write!(f, "!{}", child)
                }
            }
            Expr::Logical { op, left, right } => {
                // Both connectives are left-associative, so an equal-precedence
                // right operand needs parentheses
                write_operand(f, left, *op, false)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, *op, true)
            }
        }
    }
}

fn write_operand(
    f: &mut fmt::Formatter<'_>,
    operand: &Expr,
    parent: LogicalOp,
    is_right: bool,
) -> fmt::Result {
    let needs_parens = match operand {
        Expr::Logical { op, .. } => {
            op.precedence() < parent.precedence()
                || (is_right && op.precedence() == parent.precedence())
        }
        _ => false,
    };
    if needs_parens {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::None => f.write_str("None"),
        Value::Boolean(b) => write!(f, "{}", b),
        Value::Integer(n) => write!(f, "{}", n),
        Value::Float(n) => {
            // Keep the '.' so the literal lexes back as a float
            let text = n.to_string();
            if text.contains('.') {
                f.write_str(&text)
            } else {
                write!(f, "{}.0", text)
            }
        }
        Value::String(s) => {
            let quote = if s.contains('"') { '\'' } else { '"' };
            write!(f, "{quote}{s}{quote}")
        }
    }
}

/// Render an expression in canonical form.
pub fn to_query_string(expr: &Expr) -> String {
    expr.to_string()
}
