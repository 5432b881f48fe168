use thiserror::Error;

use crate::parse::ParseError;
use crate::request::RequestRulesError;
use crate::{ResolveError, WalkError};

/// Unified error type covering parsing, resolution, walking and request
/// rule assembly.
///
/// Every fallible entry point returns its own narrower error; this type lets
/// callers combine them with `?`.
#[derive(Debug, Error)]
pub enum ShorthandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    RequestRules(#[from] RequestRulesError),
}
