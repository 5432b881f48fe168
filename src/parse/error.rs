use thiserror::Error;

/// Errors produced when parsing shorthand rule strings.
#[derive(Debug, Error)]
#[error("parse error in '{input}': {message}")]
pub struct ParseError {
    input: String,
    message: String,
}

impl ParseError {
    pub(crate) fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }

    /// The shorthand string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
