//! Run tag queries against a JSON catalog

use serde_json::json;

use super::{CliError, load_catalog, parse_catalog};
use crate::{Lexer, Parser, Taxonomy, compile};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The tag query to execute
    pub query: String,
    /// Catalog JSON string
    pub catalog: Option<String>,
    /// Only validate syntax, don't resolve or execute
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed; carries the canonical form of the query
    SyntaxValid(String),
    /// Query executed successfully
    Success(serde_json::Value),
}

/// Execute a tagq check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        let tokens = Lexer::new(&options.query).tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        return Ok(CheckResult::SyntaxValid(expr.to_string()));
    }

    let (taxonomy, items) = match &options.catalog {
        Some(json) => load_catalog(parse_catalog(json)?)?,
        None => return Err(CliError::NoInput),
    };

    run(&options.query, &taxonomy, &items)
}

fn run(
    query: &str,
    taxonomy: &Taxonomy,
    items: &[crate::ItemRecord],
) -> Result<CheckResult, CliError> {
    let compiled = compile(query, taxonomy)?;
    let matched: Vec<&str> = compiled
        .filter(items)
        .into_iter()
        .map(|item| item.id.as_str())
        .collect();

    Ok(CheckResult::Success(json!({
        "query": compiled.expr().to_string(),
        "total": items.len(),
        "matched": matched,
    })))
}
