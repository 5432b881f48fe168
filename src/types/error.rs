use thiserror::Error;

use crate::parse::ParseError;

/// Configuration errors raised while turning rules into a predicate tree.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unable to resolve rule: {name}")]
    UnresolvableRule { name: String },

    #[error("rule '{rule}' expects at least {} parameter(s)", .index + 1)]
    MissingParameter { rule: String, index: usize },

    #[error("rule '{rule}' expects parameter #{index} to be an int, encountered '{value}'")]
    InvalidParameterType {
        rule: String,
        index: usize,
        value: String,
    },

    #[error("field path '{path}' is defined both as a field and as a parent of other fields")]
    PathConflict { path: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that abort a structural walk. Data violations are never reported here.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("structural mismatch at '{path}': expected {expected}, found {found}")]
    StructuralMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing rule for: {path}")]
    MissingRule { path: String },

    #[error("transformer '{transformer}' is unable to transform the value at '{path}'")]
    TransformFailure { path: String, transformer: String },

    #[error("document nesting at '{path}' exceeds the maximum depth of {limit}")]
    DepthExceeded { path: String, limit: usize },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
