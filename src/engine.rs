//! Query engine facade: lex, parse and resolve once, evaluate many times.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    ast::Expr,
    error::QueryError,
    evaluator::{Condition, evaluate},
    item::ItemView,
    lexer::Lexer,
    parser::Parser,
    resolver::Resolver,
    taxonomy::TaxonomyView,
};

/// The immutable, resolved form of one expression.
///
/// Evaluation is read-only, so one `CompiledQuery` can be shared across
/// threads and run against any number of items. It reflects the taxonomy as
/// it was at compile time; recompile after the taxonomy changes.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    source: String,
    expr: Expr,
    condition: Condition,
}

impl CompiledQuery {
    /// The expression text this query was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn matches<I: ItemView + ?Sized>(&self, item: &I) -> bool {
        evaluate(&self.condition, item)
    }

    /// Matching items, in input order. Items are evaluated in parallel.
    pub fn filter<'a, I: ItemView + Sync>(&self, items: &'a [I]) -> Vec<&'a I> {
        items
            .par_iter()
            .filter(|item| self.matches(*item))
            .collect()
    }

    pub fn count<I: ItemView + Sync>(&self, items: &[I]) -> usize {
        items.par_iter().filter(|item| self.matches(*item)).count()
    }
}

/// Compile `expression` against a snapshot of `taxonomy`.
///
/// # Examples
///
/// ```
/// use tagquery::{compile, ItemRecord, Taxonomy, ValueKind};
///
/// let mut taxonomy = Taxonomy::new();
/// let alice = taxonomy.ensure_path("person.alice", ValueKind::String).unwrap();
///
/// let query = compile("tag.person.alice && tag.datetime.year>=2018", &taxonomy).unwrap();
///
/// let mut item = ItemRecord::new("party.jpg").with_tag(alice);
/// item.year = Some(2020);
/// assert!(query.matches(&item));
/// ```
pub fn compile<T: TaxonomyView + ?Sized>(
    expression: &str,
    taxonomy: &T,
) -> Result<CompiledQuery, QueryError> {
    let tokens = Lexer::new(expression).tokenize()?;
    let expr = Parser::new(tokens).parse()?;

    let mut resolver = Resolver::new(taxonomy);
    let condition = resolver.bind(&expr)?;

    log::debug!(
        "compiled '{}': {} distinct paths, closures {:?}",
        expression,
        resolver.bound_paths(),
        resolver.closure_sizes()
    );

    Ok(CompiledQuery {
        source: expression.to_string(),
        expr,
        condition,
    })
}

/// Compiles expressions against a shared taxonomy snapshot and keeps the
/// results, so each distinct expression is compiled once.
///
/// Taxonomy edits go into a new snapshot handed over with
/// [`set_taxonomy`](Self::set_taxonomy), which also drops every cached query.
pub struct QueryEngine<T: TaxonomyView + ?Sized> {
    taxonomy: Arc<T>,
    cache: HashMap<String, Arc<CompiledQuery>>,
}

impl<T: TaxonomyView + ?Sized> QueryEngine<T> {
    pub fn new(taxonomy: Arc<T>) -> Self {
        QueryEngine {
            taxonomy,
            cache: HashMap::new(),
        }
    }

    pub fn taxonomy(&self) -> &Arc<T> {
        &self.taxonomy
    }

    /// Replace the snapshot; queries compiled against the old one are discarded.
    pub fn set_taxonomy(&mut self, taxonomy: Arc<T>) {
        log::debug!("taxonomy replaced, dropping {} cached queries", self.cache.len());
        self.taxonomy = taxonomy;
        self.cache.clear();
    }

    pub fn compile(&mut self, expression: &str) -> Result<Arc<CompiledQuery>, QueryError> {
        if let Some(query) = self.cache.get(expression) {
            log::trace!("compile cache hit for '{}'", expression);
            return Ok(Arc::clone(query));
        }

        let query = Arc::new(compile(expression, self.taxonomy.as_ref())?);
        self.cache.insert(expression.to_string(), Arc::clone(&query));
        Ok(query)
    }

    /// Compile (or reuse) `expression` and return the matching items.
    pub fn query<'a, I: ItemView + Sync>(
        &mut self,
        expression: &str,
        items: &'a [I],
    ) -> Result<Vec<&'a I>, QueryError> {
        Ok(self.compile(expression)?.filter(items))
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
