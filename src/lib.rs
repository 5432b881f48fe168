//! Shorthand validation rules compiled into predicate trees.
//!
//! A field's rules are written as a pipe-delimited string such as
//! `"required|integer|between:10,20"`. [`parse`] turns the string into a
//! [`RuleSet`], [`resolve_rule_set`] turns the set into a [`Predicate`] tree
//! for an external [`Evaluator`], and [`walk`] or a [`FieldValidator`]
//! applies per-leaf transformation and validation to nested documents while
//! preserving their shape.
//!
//! ```
//! use shorthand::RuleSet;
//!
//! let predicate = RuleSet::resolve_shorthand("integer|between:10,20").unwrap();
//! assert_eq!(
//!     predicate.to_string(),
//!     "Optional(All[Type(integer), Range(min=10, max=20)])"
//! );
//! ```

mod error;
#[cfg(feature = "json")]
mod json;
pub mod parse;
mod request;
mod resolve;
pub mod transform;
mod types;
pub mod validate;
mod walk;

pub use error::ShorthandError;
pub use parse::{ParseError, parse};
pub use request::{RequestPredicates, RequestRules, RequestRulesError, Section};
pub use resolve::{resolve_definition, resolve_fields, resolve_rule_set};
pub use types::{
    CharClass, Constraint, Document, FieldRules, Predicate, ResolveError, Rule, RuleDefinition,
    RuleItem, RuleName, RuleSet, TypeKind, Value, Violation, ViolationCode, WalkError, WalkReport,
    join_path,
};
pub use walk::{Evaluator, FieldRule, FieldValidator, LeafVisitor, WalkOptions, walk, walk_with};
