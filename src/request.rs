use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{FieldRules, Predicate, ResolveError};

/// Errors raised while assembling [`RequestRules`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestRulesError {
    #[error("unknown request section '{name}', expecting at most 'query' or 'request'")]
    UnknownSection { name: String },
}

/// The parts of a request that carry validated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Query,
    Request,
}

impl Section {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "query" => Some(Section::Query),
            "request" => Some(Section::Request),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Query => "query",
            Section::Request => "request",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field rules for the query string and the request body.
///
/// # Example
///
/// ```
/// use shorthand::{FieldRules, RequestRules};
///
/// let rules = RequestRules::from_sections([
///     ("query", FieldRules::new().field("page", "integer|min:1")),
///     ("request", FieldRules::new().field("email", "required|email")),
/// ])
/// .unwrap();
///
/// let resolved = rules.resolve().unwrap();
/// assert!(resolved.query.is_some());
/// assert!(resolved.request.is_some());
///
/// assert!(RequestRules::from_sections([("headers", FieldRules::new())]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestRules {
    query: Option<FieldRules>,
    request: Option<FieldRules>,
}

/// Resolved predicate trees of each present section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPredicates {
    pub query: Option<Predicate>,
    pub request: Option<Predicate>,
}

impl RequestRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from named sections. A repeated name replaces the earlier one.
    ///
    /// # Errors
    ///
    /// [`RequestRulesError::UnknownSection`] for any name other than
    /// `query` or `request`.
    pub fn from_sections<I, S>(sections: I) -> Result<Self, RequestRulesError>
    where
        I: IntoIterator<Item = (S, FieldRules)>,
        S: AsRef<str>,
    {
        let mut rules = Self::new();
        for (name, fields) in sections {
            let name = name.as_ref();
            let section = Section::parse(name).ok_or_else(|| RequestRulesError::UnknownSection {
                name: name.to_owned(),
            })?;
            rules.set(section, fields);
        }
        Ok(rules)
    }

    #[must_use]
    pub fn with_query(mut self, fields: FieldRules) -> Self {
        self.query = Some(fields);
        self
    }

    #[must_use]
    pub fn with_request(mut self, fields: FieldRules) -> Self {
        self.request = Some(fields);
        self
    }

    pub fn set(&mut self, section: Section, fields: FieldRules) {
        match section {
            Section::Query => self.query = Some(fields),
            Section::Request => self.request = Some(fields),
        }
    }

    #[must_use]
    pub fn section(&self, section: Section) -> Option<&FieldRules> {
        match section {
            Section::Query => self.query.as_ref(),
            Section::Request => self.request.as_ref(),
        }
    }

    #[must_use]
    pub fn query(&self) -> Option<&FieldRules> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn request(&self) -> Option<&FieldRules> {
        self.request.as_ref()
    }

    /// Resolve each present section into a `Mapping` predicate.
    ///
    /// # Errors
    ///
    /// The first resolution error, query section first.
    pub fn resolve(&self) -> Result<RequestPredicates, ResolveError> {
        let query = self.query.as_ref().map(FieldRules::resolve).transpose()?;
        let request = self.request.as_ref().map(FieldRules::resolve).transpose()?;
        debug!(
            query = query.is_some(),
            request = request.is_some(),
            "request rules resolved"
        );
        Ok(RequestPredicates { query, request })
    }
}
