pub mod ast;
pub mod cli;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod fields;
pub mod item;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod taxonomy;
pub mod value;

pub use ast::{CompareOp, Expr, LogicalOp, Token, TokenKind, Wildcard};
pub use engine::{CompiledQuery, QueryEngine, compile};
pub use error::QueryError;
pub use evaluator::{Condition, evaluate};
pub use fields::FixedField;
pub use item::{ItemRecord, ItemView, TagSet};
pub use lexer::{LexError, Lexer, tokenize};
pub use parser::{ParseError, Parser, parse};
pub use resolver::{ResolveError, ResolvedPath, Resolver, resolve};
pub use taxonomy::{TagId, TagNode, Taxonomy, TaxonomyError, TaxonomyView, ValueKind};
pub use value::Value;
