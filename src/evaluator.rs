use std::sync::Arc;

use crate::{
    ast::{CompareOp, LogicalOp},
    fields::FixedField,
    item::{ItemView, TagSet},
    taxonomy::{TagId, ValueKind},
    value::Value,
};

/// A query with every tag path bound, ready to run against items.
///
/// Produced by [`Resolver::bind`](crate::resolver::Resolver::bind) and
/// immutable afterwards; descendant closures are shared by `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Fixed field compared with a literal
    Compare {
        field: FixedField,
        op: CompareOp,
        value: Value,
    },

    /// Presence of a fixed field: `true` for boolean fields, set for the rest
    FieldSet(FixedField),

    /// Exact tag membership
    HasTag(TagId),

    /// Membership of any tag in a descendant closure
    HasAnyTag(Arc<TagSet>),

    Not(Box<Condition>),

    Logical {
        op: LogicalOp,
        left: Box<Condition>,
        right: Box<Condition>,
    },
}

/// Decide whether `item` satisfies `condition`.
///
/// Total: unset fields and missing tags are ordinary inputs.
///
/// # Examples
///
/// ```
/// use tagquery::evaluator::{evaluate, Condition};
/// use tagquery::{FixedField, ItemRecord};
///
/// let mut item = ItemRecord::new("beach.jpg");
/// item.favorite = Some(true);
///
/// assert!(evaluate(&Condition::FieldSet(FixedField::Favorite), &item));
/// assert!(!evaluate(&Condition::FieldSet(FixedField::City), &item));
/// ```
pub fn evaluate<I: ItemView + ?Sized>(condition: &Condition, item: &I) -> bool {
    match condition {
        Condition::Compare { field, op, value } => compare(&item.field(*field), *op, value),
        Condition::FieldSet(field) => match field.kind() {
            ValueKind::Boolean => item.field(*field) == Value::Boolean(true),
            _ => !item.field(*field).is_none(),
        },
        Condition::HasTag(id) => item.has_tag(*id),
        Condition::HasAnyTag(ids) => item.has_any_tag(ids),
        Condition::Not(child) => !evaluate(child, item),
        Condition::Logical {
            op: LogicalOp::And,
            left,
            right,
        } => evaluate(left, item) && evaluate(right, item),
        Condition::Logical {
            op: LogicalOp::Or,
            left,
            right,
        } => evaluate(left, item) || evaluate(right, item),
    }
}

/// Compare a field value with a literal.
///
/// An absent field equals only `None` and differs from every other literal;
/// ordering against an absent field never holds.
fn compare(actual: &Value, op: CompareOp, literal: &Value) -> bool {
    match (actual.is_none(), literal.is_none()) {
        (true, true) => op == CompareOp::Equal,
        (true, false) | (false, true) => op == CompareOp::NotEqual,
        (false, false) => match actual.compare(literal) {
            Some(ordering) => op.holds(ordering),
            // Unordered pair, e.g. true vs false
            None => op == CompareOp::NotEqual,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_semantics() {
        let one = Value::Integer(1);
        assert!(compare(&Value::None, CompareOp::Equal, &Value::None));
        assert!(!compare(&Value::None, CompareOp::NotEqual, &Value::None));
        assert!(compare(&Value::None, CompareOp::NotEqual, &one));
        assert!(!compare(&Value::None, CompareOp::Equal, &one));
        assert!(!compare(&Value::None, CompareOp::GreaterThan, &one));
        assert!(!compare(&Value::None, CompareOp::LessEqual, &one));
    }

    #[test]
    fn test_present_field_against_none() {
        let year = Value::Integer(2020);
        assert!(!compare(&year, CompareOp::Equal, &Value::None));
        assert!(compare(&year, CompareOp::NotEqual, &Value::None));
    }

    #[test]
    fn test_boolean_equality() {
        let yes = Value::Boolean(true);
        let no = Value::Boolean(false);
        assert!(compare(&yes, CompareOp::Equal, &yes));
        assert!(!compare(&yes, CompareOp::Equal, &no));
        assert!(compare(&yes, CompareOp::NotEqual, &no));
    }

    #[test]
    fn test_string_ordering() {
        let city = Value::from("Boston");
        assert!(compare(&city, CompareOp::LessThan, &Value::from("Chicago")));
        assert!(compare(&city, CompareOp::GreaterEqual, &Value::from("Boston")));
    }
}
