//! Binding of tag paths to fixed fields or taxonomy nodes.
//!
//! A [`Resolver`] lives for one query compilation. It memoizes every path it
//! binds and every descendant closure it computes, so a path referenced
//! several times in one expression is resolved once.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::ast::{CompareOp, Expr, Wildcard};
use crate::evaluator::Condition;
use crate::fields::FixedField;
use crate::item::TagSet;
use crate::taxonomy::{TagId, TaxonomyView, ValueKind};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Unknown tag path 'tag.{path}': not a fixed field and not in the tag tree")]
    UnresolvedPath { path: String },

    #[error("Operator '{op}' cannot be used on boolean field 'tag.{path}'; use == or !=")]
    OrderingOnBoolean { path: String, op: CompareOp },

    #[error(
        "Cannot compare tag 'tag.{path}': tags are presence-only, use 'tag.{path}' or a fixed field"
    )]
    ComparisonOnTag { path: String },

    #[error("Field 'tag.{path}' is {expected}, cannot compare it with a {found} value")]
    LiteralKind {
        path: String,
        expected: ValueKind,
        found: &'static str,
    },

    #[error("Operator '{op}' cannot be used with None on 'tag.{path}'; use == or !=")]
    OrderingWithNone { path: String, op: CompareOp },

    #[error("Wildcard cannot be used on fixed field 'tag.{path}'")]
    WildcardOnField { path: String },
}

impl ResolveError {
    /// The offending tag path.
    pub fn path(&self) -> &str {
        match self {
            ResolveError::UnresolvedPath { path }
            | ResolveError::OrderingOnBoolean { path, .. }
            | ResolveError::ComparisonOnTag { path }
            | ResolveError::LiteralKind { path, .. }
            | ResolveError::OrderingWithNone { path, .. }
            | ResolveError::WildcardOnField { path } => path,
        }
    }
}

/// A tag path bound against the taxonomy snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPath {
    FixedField {
        field: FixedField,
        kind: ValueKind,
    },
    TaxonomyNode {
        id: TagId,
        kind: ValueKind,
        /// Descendant closure, present when bound for a wildcard presence check
        closure: Option<Arc<TagSet>>,
    },
}

pub struct Resolver<'t, T: TaxonomyView + ?Sized> {
    taxonomy: &'t T,
    bindings: HashMap<String, ResolvedPath>,
    closures: HashMap<(TagId, Wildcard), Arc<TagSet>>,
}

impl<'t, T: TaxonomyView + ?Sized> Resolver<'t, T> {
    pub fn new(taxonomy: &'t T) -> Self {
        Resolver {
            taxonomy,
            bindings: HashMap::new(),
            closures: HashMap::new(),
        }
    }

    /// Bind a dotted path. Fixed fields take priority over taxonomy nodes.
    pub fn resolve(&mut self, path: &str) -> Result<ResolvedPath, ResolveError> {
        if let Some(bound) = self.bindings.get(path) {
            log::trace!("path '{}' already bound", path);
            return Ok(bound.clone());
        }

        let bound = match FixedField::from_path(path) {
            Some(field) => ResolvedPath::FixedField {
                field,
                kind: field.kind(),
            },
            None => {
                let id = self
                    .find_node(path)
                    .ok_or_else(|| ResolveError::UnresolvedPath {
                        path: path.to_string(),
                    })?;
                let kind = self.taxonomy.node(id).map_or(ValueKind::String, |n| n.kind);
                ResolvedPath::TaxonomyNode {
                    id,
                    kind,
                    closure: None,
                }
            }
        };

        log::trace!("bound '{}' to {:?}", path, bound);
        self.bindings.insert(path.to_string(), bound.clone());
        Ok(bound)
    }

    /// Bind a path for a presence check, attaching the descendant closure
    /// when `wildcard` asks for one.
    pub fn resolve_presence(
        &mut self,
        path: &str,
        wildcard: Wildcard,
    ) -> Result<ResolvedPath, ResolveError> {
        match self.resolve(path)? {
            ResolvedPath::FixedField { .. } if wildcard != Wildcard::None => {
                Err(ResolveError::WildcardOnField {
                    path: path.to_string(),
                })
            }
            ResolvedPath::TaxonomyNode { id, kind, .. } if wildcard != Wildcard::None => {
                Ok(ResolvedPath::TaxonomyNode {
                    id,
                    kind,
                    closure: Some(self.closure(id, wildcard)),
                })
            }
            bound => Ok(bound),
        }
    }

    fn find_node(&self, path: &str) -> Option<TagId> {
        let mut current = None;
        for segment in path.split('.') {
            current = Some(self.taxonomy.child_by_name(current, segment)?);
        }
        current
    }

    /// Descendant closure of `id`, computed once per (node, mode).
    fn closure(&mut self, id: TagId, wildcard: Wildcard) -> Arc<TagSet> {
        if let Some(set) = self.closures.get(&(id, wildcard)) {
            return Arc::clone(set);
        }

        let mut set = TagSet::new();
        if wildcard == Wildcard::Inclusive {
            set.insert(id);
        }
        let mut stack: Vec<TagId> = self.taxonomy.children(id).to_vec();
        while let Some(next) = stack.pop() {
            if set.insert(next) {
                stack.extend_from_slice(self.taxonomy.children(next));
            }
        }

        log::trace!(
            "closure of {} ({:?}): {} tags",
            self.taxonomy.path_of(id),
            wildcard,
            set.len()
        );
        let set = Arc::new(set);
        self.closures.insert((id, wildcard), Arc::clone(&set));
        set
    }

    /// Bind every path in `expr`, producing the condition the evaluator runs.
    pub fn bind(&mut self, expr: &Expr) -> Result<Condition, ResolveError> {
        match expr {
            Expr::Comparison { path, op, value } => self.bind_comparison(path, *op, value),
            Expr::Presence { path, wildcard } => {
                Ok(match self.resolve_presence(path, *wildcard)? {
                    ResolvedPath::FixedField { field, .. } => Condition::FieldSet(field),
                    ResolvedPath::TaxonomyNode {
                        closure: Some(set), ..
                    } => Condition::HasAnyTag(set),
                    ResolvedPath::TaxonomyNode { id, .. } => Condition::HasTag(id),
                })
            }
            Expr::Negation(child) => Ok(Condition::Not(Box::new(self.bind(child)?))),
            Expr::Logical { op, left, right } => Ok(Condition::Logical {
                op: *op,
                left: Box::new(self.bind(left)?),
                right: Box::new(self.bind(right)?),
            }),
        }
    }

    fn bind_comparison(
        &mut self,
        path: &str,
        op: CompareOp,
        value: &Value,
    ) -> Result<Condition, ResolveError> {
        let (field, kind) = match self.resolve(path)? {
            ResolvedPath::FixedField { field, kind } => (field, kind),
            ResolvedPath::TaxonomyNode { .. } => {
                return Err(ResolveError::ComparisonOnTag {
                    path: path.to_string(),
                });
            }
        };

        if value.is_none() {
            if op.is_ordering() {
                return Err(ResolveError::OrderingWithNone {
                    path: path.to_string(),
                    op,
                });
            }
        } else {
            let fits = match kind {
                ValueKind::Integer => value.is_numeric(),
                ValueKind::Boolean => matches!(value, Value::Boolean(_)),
                ValueKind::String | ValueKind::Datetime => matches!(value, Value::String(_)),
            };
            if !fits {
                return Err(ResolveError::LiteralKind {
                    path: path.to_string(),
                    expected: kind,
                    found: value.type_name(),
                });
            }
            if kind == ValueKind::Boolean && op.is_ordering() {
                return Err(ResolveError::OrderingOnBoolean {
                    path: path.to_string(),
                    op,
                });
            }
        }

        Ok(Condition::Compare {
            field,
            op,
            value: value.clone(),
        })
    }

    /// Number of distinct paths bound so far.
    pub fn bound_paths(&self) -> usize {
        self.bindings.len()
    }

    /// Sizes of the descendant closures computed so far.
    pub fn closure_sizes(&self) -> Vec<usize> {
        self.closures.values().map(|s| s.len()).collect()
    }
}

/// Bind a single path against a taxonomy.
pub fn resolve<T: TaxonomyView + ?Sized>(
    path: &str,
    taxonomy: &T,
) -> Result<ResolvedPath, ResolveError> {
    Resolver::new(taxonomy).resolve(path)
}
