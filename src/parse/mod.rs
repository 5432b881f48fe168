mod error;
mod grammar;

pub use error::ParseError;

use crate::RuleSet;

/// Parse a pipe-delimited shorthand string into a [`RuleSet`].
///
/// Each token is a bare rule name (`required`) or a name followed by
/// comma-separated parameters (`between:10,20`). No whitespace is trimmed and
/// there is no escaping. The empty string parses to an empty set.
///
/// # Errors
///
/// Returns [`ParseError`] if a token has an empty rule name.
pub fn parse(input: &str) -> Result<RuleSet, ParseError> {
    use winnow::Parser;
    grammar::parse_rule_set
        .parse(input)
        .map_err(|e| ParseError::new(input, e.to_string()))
}
