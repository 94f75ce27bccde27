// tests/resolver_tests.rs

use tagquery::ast::{CompareOp, Expr, Wildcard};
use tagquery::evaluator::Condition;
use tagquery::fields::FixedField;
use tagquery::resolver::{ResolveError, ResolvedPath, Resolver, resolve};
use tagquery::taxonomy::{Taxonomy, ValueKind};
use tagquery::value::Value;

fn sample_taxonomy() -> Taxonomy {
    let mut tax = Taxonomy::new();
    for path in [
        "person.alice",
        "person.bob",
        "scene.indoor",
        "scene.outdoor.hike",
        "scene.outdoor.lake",
    ] {
        tax.ensure_path(path, ValueKind::String).unwrap();
    }
    tax
}

fn bind(expr_text: &str, tax: &Taxonomy) -> Result<Condition, ResolveError> {
    let tokens = tagquery::tokenize(expr_text).unwrap();
    let expr = tagquery::parse(tokens).unwrap();
    Resolver::new(tax).bind(&expr)
}

// ============================================================================
// Path Binding
// ============================================================================

#[test]
fn test_fixed_field() {
    let tax = sample_taxonomy();
    assert_eq!(
        resolve("datetime.year", &tax).unwrap(),
        ResolvedPath::FixedField {
            field: FixedField::Year,
            kind: ValueKind::Integer
        }
    );
}

#[test]
fn test_fixed_field_wins_over_taxonomy() {
    // The default tree also carries datetime.year as a tag
    let tax = Taxonomy::with_default_tags();
    assert!(tax.resolve_path("datetime.year").is_some());
    assert!(matches!(
        resolve("datetime.year", &tax).unwrap(),
        ResolvedPath::FixedField {
            field: FixedField::Year,
            ..
        }
    ));
}

#[test]
fn test_taxonomy_node() {
    let tax = sample_taxonomy();
    let alice = tax.resolve_path("person.alice").unwrap();
    assert_eq!(
        resolve("person.alice", &tax).unwrap(),
        ResolvedPath::TaxonomyNode {
            id: alice,
            kind: ValueKind::String,
            closure: None
        }
    );
}

#[test]
fn test_taxonomy_lookup_ignores_case() {
    let mut tax = Taxonomy::new();
    tax.ensure_path("Person.Alice", ValueKind::String).unwrap();
    assert!(resolve("person.alice", &tax).is_ok());
}

#[test]
fn test_unresolved_path() {
    let tax = sample_taxonomy();
    assert_eq!(
        resolve("person.carol", &tax),
        Err(ResolveError::UnresolvedPath {
            path: "person.carol".into()
        })
    );
    // A prefix match is not enough
    assert!(resolve("person.alice.birthday", &tax).is_err());
}

#[test]
fn test_memoized_bindings() {
    let tax = sample_taxonomy();
    let expr = tagquery::parse(
        tagquery::tokenize("tag.person.alice && (tag.person.alice || !tag.person.alice)").unwrap(),
    )
    .unwrap();

    let mut resolver = Resolver::new(&tax);
    resolver.bind(&expr).unwrap();
    assert_eq!(resolver.bound_paths(), 1);
}

// ============================================================================
// Wildcard Closures
// ============================================================================

#[test]
fn test_inclusive_closure() {
    let tax = sample_taxonomy();
    let outdoor = tax.resolve_path("scene.outdoor").unwrap();
    let hike = tax.resolve_path("scene.outdoor.hike").unwrap();
    let lake = tax.resolve_path("scene.outdoor.lake").unwrap();

    let mut resolver = Resolver::new(&tax);
    match resolver
        .resolve_presence("scene.outdoor", Wildcard::Inclusive)
        .unwrap()
    {
        ResolvedPath::TaxonomyNode {
            closure: Some(set), ..
        } => {
            assert_eq!(set.len(), 3);
            assert!(set.contains(&outdoor));
            assert!(set.contains(&hike));
            assert!(set.contains(&lake));
        }
        other => panic!("Expected a closure, got {:?}", other),
    }
}

#[test]
fn test_children_only_closure() {
    let tax = sample_taxonomy();
    let outdoor = tax.resolve_path("scene.outdoor").unwrap();

    let mut resolver = Resolver::new(&tax);
    match resolver
        .resolve_presence("scene.outdoor", Wildcard::ChildrenOnly)
        .unwrap()
    {
        ResolvedPath::TaxonomyNode {
            closure: Some(set), ..
        } => {
            assert_eq!(set.len(), 2);
            assert!(!set.contains(&outdoor));
        }
        other => panic!("Expected a closure, got {:?}", other),
    }
}

#[test]
fn test_closure_is_transitive() {
    let tax = sample_taxonomy();
    let hike = tax.resolve_path("scene.outdoor.hike").unwrap();
    let indoor = tax.resolve_path("scene.indoor").unwrap();

    match bind("tag.scene.*", &tax).unwrap() {
        Condition::HasAnyTag(set) => {
            assert_eq!(set.len(), 4);
            assert!(set.contains(&hike));
            assert!(set.contains(&indoor));
        }
        other => panic!("Expected HasAnyTag, got {:?}", other),
    }
}

#[test]
fn test_leaf_children_only_is_empty() {
    let tax = sample_taxonomy();
    match bind("tag.person.alice.*", &tax).unwrap() {
        Condition::HasAnyTag(set) => assert!(set.is_empty()),
        other => panic!("Expected HasAnyTag, got {:?}", other),
    }
}

#[test]
fn test_closure_shared_between_references() {
    let tax = sample_taxonomy();
    let expr = tagquery::parse(
        tagquery::tokenize("tag.scene.outdoor* || !tag.scene.outdoor* || tag.scene.outdoor.*")
            .unwrap(),
    )
    .unwrap();

    let mut resolver = Resolver::new(&tax);
    resolver.bind(&expr).unwrap();
    let mut sizes = resolver.closure_sizes();
    sizes.sort();
    assert_eq!(sizes, vec![2, 3]);
}

// ============================================================================
// Binding Conditions
// ============================================================================

#[test]
fn test_bind_presence_variants() {
    let tax = sample_taxonomy();
    let alice = tax.resolve_path("person.alice").unwrap();

    assert_eq!(bind("tag.person.alice", &tax).unwrap(), Condition::HasTag(alice));
    assert_eq!(
        bind("tag.favorite", &tax).unwrap(),
        Condition::FieldSet(FixedField::Favorite)
    );
}

#[test]
fn test_bind_comparison() {
    let tax = sample_taxonomy();
    assert_eq!(
        bind("tag.datetime.year>=2018", &tax).unwrap(),
        Condition::Compare {
            field: FixedField::Year,
            op: CompareOp::GreaterEqual,
            value: Value::Integer(2018)
        }
    );
}

#[test]
fn test_integer_field_accepts_float() {
    let tax = sample_taxonomy();
    assert!(bind("tag.image_size.width > 1.5", &tax).is_ok());
}

#[test]
fn test_none_accepted_with_equality_on_any_field() {
    let tax = sample_taxonomy();
    for text in [
        "tag.datetime==None",
        "tag.location.city!=None",
        "tag.favorite==None",
        "tag.datetime.year!=None",
    ] {
        assert!(bind(text, &tax).is_ok(), "Failed for: {}", text);
    }
}

// ============================================================================
// Type Errors
// ============================================================================

#[test]
fn test_comparison_on_tag() {
    let tax = sample_taxonomy();
    assert_eq!(
        bind(r#"tag.person=="alice""#, &tax),
        Err(ResolveError::ComparisonOnTag {
            path: "person".into()
        })
    );
}

#[test]
fn test_ordering_on_boolean() {
    let tax = sample_taxonomy();
    assert_eq!(
        bind("tag.favorite > false", &tax),
        Err(ResolveError::OrderingOnBoolean {
            path: "favorite".into(),
            op: CompareOp::GreaterThan
        })
    );
}

#[test]
fn test_literal_kind_mismatch() {
    let tax = sample_taxonomy();
    assert_eq!(
        bind("tag.datetime.year == '2020'", &tax),
        Err(ResolveError::LiteralKind {
            path: "datetime.year".into(),
            expected: ValueKind::Integer,
            found: "string"
        })
    );
    assert!(matches!(
        bind("tag.favorite == 1", &tax),
        Err(ResolveError::LiteralKind {
            expected: ValueKind::Boolean,
            ..
        })
    ));
    assert!(matches!(
        bind("tag.location.city == true", &tax),
        Err(ResolveError::LiteralKind {
            expected: ValueKind::String,
            ..
        })
    ));
}

#[test]
fn test_ordering_with_none() {
    let tax = sample_taxonomy();
    assert_eq!(
        bind("tag.datetime.year < None", &tax),
        Err(ResolveError::OrderingWithNone {
            path: "datetime.year".into(),
            op: CompareOp::LessThan
        })
    );
}

#[test]
fn test_wildcard_on_field() {
    let tax = sample_taxonomy();
    assert_eq!(
        bind("tag.datetime.year*", &tax),
        Err(ResolveError::WildcardOnField {
            path: "datetime.year".into()
        })
    );
}

#[test]
fn test_error_inside_nested_expression() {
    let tax = sample_taxonomy();
    let err = bind("tag.person.alice && !(tag.scene.indoor || tag.nope)", &tax).unwrap_err();
    assert_eq!(err.path(), "nope");
    assert!(err.to_string().contains("tag.nope"));
}

#[test]
fn test_bind_direct_expr() {
    let tax = sample_taxonomy();
    let expr = Expr::and(
        Expr::presence("person", Wildcard::Inclusive),
        Expr::comparison("location.state", CompareOp::Equal, Value::from("CA")),
    );
    let condition = Resolver::new(&tax).bind(&expr).unwrap();
    assert!(matches!(condition, Condition::Logical { .. }));
}
