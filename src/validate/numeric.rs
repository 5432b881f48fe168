use std::sync::LazyLock;

use regex::Regex;

use crate::{Value, Violation, ViolationCode};

// Optional sign, integer part without leading zeros, optional fraction.
// Both the integer part and the fraction digits may be absent.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[1-9][0-9]*|0)?(?:\.[0-9]*)?$").expect("decimal pattern is valid")
});

/// Whether `s` is a well-formed decimal string of arbitrary length.
///
/// Accepts `"0"`, `"-1"`, `"1."`, `".1"` and long digit runs; rejects the
/// empty string, a lone `-`, leading zeros, separators and exponents.
#[must_use]
pub fn is_decimal_string(s: &str) -> bool {
    !s.is_empty() && s != "-" && DECIMAL.is_match(s)
}

/// Strict numeric check backing the `numeric` rule.
///
/// Null, integers and floats always pass. Strings must be decimal (see
/// [`is_decimal_string`]). Anything else is the wrong type.
///
/// # Example
///
/// ```
/// use shorthand::validate::NumericValue;
/// use shorthand::{Value, ViolationCode};
///
/// assert!(NumericValue::check(&Value::from("-1.5")).is_ok());
/// assert_eq!(
///     NumericValue::check(&Value::from("01")),
///     Err(ViolationCode::InvalidDecimalFormat)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericValue;

impl NumericValue {
    /// Check a value, returning the violation code on failure.
    ///
    /// # Errors
    ///
    /// [`ViolationCode::InvalidValueType`] for booleans,
    /// [`ViolationCode::InvalidDecimalFormat`] for malformed strings.
    pub fn check(value: &Value) -> Result<(), ViolationCode> {
        match value {
            Value::Null | Value::Int(_) | Value::Float(_) => Ok(()),
            Value::String(s) if is_decimal_string(s) => Ok(()),
            Value::String(_) => Err(ViolationCode::InvalidDecimalFormat),
            Value::Bool(_) => Err(ViolationCode::InvalidValueType),
        }
    }

    /// Validate the value at `path`, producing a violation on failure.
    pub fn validate(path: &str, value: &Value) -> Option<Violation> {
        Self::check(value).err().map(|code| {
            Violation::new(path, code, format!("{value} is not a valid numeric value."))
        })
    }
}
