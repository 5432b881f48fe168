use std::fmt;

use super::error::ResolveError;

/// The closed catalog of rule names understood by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleName {
    Required,
    Boolean,
    Integer,
    Float,
    Numeric,
    String,
    Array,
    Alpha,
    AlphaDash,
    AlphaNum,
    In,
    Date,
    DateTime,
    DateFormat,
    Email,
    Url,
    Nullable,
    Filled,
    Regex,
    Min,
    Max,
    Between,
}

impl RuleName {
    pub const ALL: [RuleName; 22] = [
        RuleName::Required,
        RuleName::Boolean,
        RuleName::Integer,
        RuleName::Float,
        RuleName::Numeric,
        RuleName::String,
        RuleName::Array,
        RuleName::Alpha,
        RuleName::AlphaDash,
        RuleName::AlphaNum,
        RuleName::In,
        RuleName::Date,
        RuleName::DateTime,
        RuleName::DateFormat,
        RuleName::Email,
        RuleName::Url,
        RuleName::Nullable,
        RuleName::Filled,
        RuleName::Regex,
        RuleName::Min,
        RuleName::Max,
        RuleName::Between,
    ];

    /// Look up a catalog entry by its shorthand spelling. Case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::Required => "required",
            RuleName::Boolean => "boolean",
            RuleName::Integer => "integer",
            RuleName::Float => "float",
            RuleName::Numeric => "numeric",
            RuleName::String => "string",
            RuleName::Array => "array",
            RuleName::Alpha => "alpha",
            RuleName::AlphaDash => "alpha_dash",
            RuleName::AlphaNum => "alpha_num",
            RuleName::In => "in",
            RuleName::Date => "date",
            RuleName::DateTime => "datetime",
            RuleName::DateFormat => "date_format",
            RuleName::Email => "email",
            RuleName::Url => "url",
            RuleName::Nullable => "nullable",
            RuleName::Filled => "filled",
            RuleName::Regex => "regex",
            RuleName::Min => "min",
            RuleName::Max => "max",
            RuleName::Between => "between",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named directive with ordered string parameters, e.g. `between:10,20`.
///
/// Rules are created by the shorthand parser or directly by callers. The name
/// is not checked against the catalog until resolution. The parser never
/// yields an empty name; one built directly matches no catalog entry and
/// resolves to [`ResolveError::UnresolvableRule`](crate::ResolveError) with an
/// empty `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    parameters: Vec<String>,
}

impl Rule {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// The catalog entry for this rule's name, if any.
    #[must_use]
    pub fn kind(&self) -> Option<RuleName> {
        RuleName::parse(&self.name)
    }

    /// The raw parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingParameter`] if `index` is out of range.
    pub fn parameter(&self, index: usize) -> Result<&str, ResolveError> {
        self.parameters
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| ResolveError::MissingParameter {
                rule: self.name.clone(),
                index,
            })
    }

    /// The parameter at `index` as an integer.
    ///
    /// Only the canonical decimal rendering is accepted: the text must equal
    /// the integer formatted back to a string, which rules out leading zeros,
    /// `+` signs, `-0`, whitespace and decimals.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingParameter`] if absent and
    /// [`ResolveError::InvalidParameterType`] if not a canonical integer.
    pub fn int_parameter(&self, index: usize) -> Result<i64, ResolveError> {
        let raw = self.parameter(index)?;
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => Ok(n),
            _ => Err(ResolveError::InvalidParameterType {
                rule: self.name.clone(),
                index,
                value: raw.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.parameters.is_empty() {
            write!(f, ":{}", self.parameters.join(","))?;
        }
        Ok(())
    }
}
