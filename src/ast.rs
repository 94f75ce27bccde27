//! # Tag Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! tag query language, a compact boolean language for filtering a photo
//! collection by hierarchical tags and structured fields.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, with positions
//! - **[expressions]** - The four expression node kinds
//! - **[operators]** - Comparison and logical operators, wildcard modes
//!
//! ## Quick Start
//!
//! ```text
//! tag.person.alice && tag.datetime.year>=2018 && !tag.scene.indoor
//! ```
//!
//! Photos tagged with alice, taken in 2018 or later, and not tagged indoor.
//!
//! ## Core Concepts
//!
//! ### Presence
//!
//! A bare tag reference asks whether the tag is applied to the photo:
//!
//! ```text
//! tag.person.alice
//! ```
//!
//! Appending `*` widens the check to the tag's subtree, `.*` to its
//! descendants only:
//!
//! ```text
//! tag.scene.outdoor*      // outdoor, lake, hike, ...
//! tag.scene.outdoor.*     // lake, hike, ... but not outdoor itself
//! ```
//!
//! ### Comparison
//!
//! Structured fields compare against a literal:
//!
//! ```text
//! tag.datetime.year>=2018
//! tag.favorite==true
//! tag.location.city=="Springfield"
//! tag.datetime==None
//! ```
//!
//! ### Precedence
//!
//! `!` binds tighter than `&&`, which binds tighter than `||`:
//!
//! ```text
//! tag.a || tag.b && tag.c     // tag.a || (tag.b && tag.c)
//! !tag.a && tag.b             // (!tag.a) && tag.b
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{CompareOp, LogicalOp, Wildcard};
pub use tokens::{Token, TokenKind};
