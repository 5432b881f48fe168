use indexmap::IndexMap;

use super::predicate::Predicate;
use super::ruleset::RuleSet;

/// How a caller declares the rules for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDefinition {
    /// Pipe-delimited shorthand, parsed at resolution time.
    Shorthand(String),
    /// An already-built rule set.
    Rules(RuleSet),
    /// A predicate used as-is.
    Predicate(Predicate),
    /// A nested field collection for a structured value.
    Nested(FieldRules),
}

impl From<&str> for RuleDefinition {
    fn from(s: &str) -> Self {
        RuleDefinition::Shorthand(s.to_owned())
    }
}

impl From<String> for RuleDefinition {
    fn from(s: String) -> Self {
        RuleDefinition::Shorthand(s)
    }
}

impl From<RuleSet> for RuleDefinition {
    fn from(rules: RuleSet) -> Self {
        RuleDefinition::Rules(rules)
    }
}

impl From<Predicate> for RuleDefinition {
    fn from(p: Predicate) -> Self {
        RuleDefinition::Predicate(p)
    }
}

impl From<FieldRules> for RuleDefinition {
    fn from(fields: FieldRules) -> Self {
        RuleDefinition::Nested(fields)
    }
}

/// Maps field names or dot-paths (e.g. `"name.first_name"`, `"tags.0.slug"`)
/// to their rule definitions, in insertion order.
///
/// Resolved into a `Mapping` predicate by
/// [`resolve_fields`](crate::resolve_fields).
///
/// # Example
///
/// ```
/// use shorthand::FieldRules;
///
/// let fields = FieldRules::new()
///     .field("email", "required|email")
///     .field("name.first_name", "required|min:6");
///
/// let tree = fields.resolve().unwrap();
/// assert!(tree.get("name.first_name").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    fields: IndexMap<String, RuleDefinition>,
}

impl FieldRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition for a path. A later registration for the same
    /// path replaces the earlier one but keeps its position.
    #[must_use]
    pub fn field(mut self, path: &str, definition: impl Into<RuleDefinition>) -> Self {
        self.insert(path, definition.into());
        self
    }

    pub fn insert(&mut self, path: &str, definition: RuleDefinition) {
        self.fields.insert(path.to_owned(), definition);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RuleDefinition> {
        self.fields.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all registered (path, definition) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDefinition)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve every field into one `Mapping` predicate.
    ///
    /// # Errors
    ///
    /// See [`resolve_fields`](crate::resolve_fields).
    pub fn resolve(&self) -> Result<Predicate, crate::ResolveError> {
        crate::resolve::resolve_fields(self)
    }
}

impl<K: AsRef<str>, D: Into<RuleDefinition>> FromIterator<(K, D)> for FieldRules {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (path, definition) in iter {
            fields.insert(path.as_ref(), definition.into());
        }
        fields
    }
}
