use std::fmt;

/// Machine-readable violation kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ViolationCode {
    /// The value has a type the check cannot handle at all.
    InvalidValueType,
    /// A string that is not a well-formed decimal number.
    #[cfg_attr(feature = "json", serde(rename = "INVALID_DECIMAL_ERROR"))]
    InvalidDecimalFormat,
    /// Any code reported by an external evaluator.
    Custom(String),
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationCode::InvalidValueType => f.write_str("INVALID_VALUE_TYPE"),
            ViolationCode::InvalidDecimalFormat => f.write_str("INVALID_DECIMAL_ERROR"),
            ViolationCode::Custom(code) => f.write_str(code),
        }
    }
}

/// A single failure of a value against a predicate. Violations are data, not
/// errors: they are accumulated and reported in bulk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Violation {
    path: String,
    code: ViolationCode,
    message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} [{}]", self.message, self.code)
        } else {
            write!(f, "{}: {} [{}]", self.path, self.message, self.code)
        }
    }
}

impl Violation {
    pub fn new(path: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }

    /// Dot-path of the offending value; empty for the document root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn code(&self) -> &ViolationCode {
        &self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
