//! CLI support for tagquery
//!
//! Provides programmatic access to the tagq CLI functionality so other tools
//! can embed it.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{Catalog, CatalogItem, TagDecl, load_catalog, parse_catalog};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

use crate::fields::FixedField;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] crate::QueryError),

    #[error("Invalid catalog tag: {0}")]
    Taxonomy(#[from] crate::TaxonomyError),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Item '{item}' uses undeclared tag '{path}'")]
    UnknownTag { item: String, path: String },

    #[error("No catalog provided. Use --catalog, TAGQ_CATALOG, or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'tagq docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Query(e.into())
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}

/// One line per fixed field: path and kind.
pub fn list_fields() -> String {
    FixedField::ALL
        .iter()
        .map(|f| format!("tag.{}\t{}\n", f.path(), f.kind()))
        .collect()
}
