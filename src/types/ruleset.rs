use std::fmt;

use super::error::ResolveError;
use super::predicate::Predicate;
use super::rule::{Rule, RuleName};

/// One entry of a [`RuleSet`]: a named rule, or a predicate the caller built directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleItem {
    Rule(Rule),
    Predicate(Predicate),
}

/// The ordered rules for a single field path.
///
/// Insertion order is evaluation order. No position is special: `required`
/// may appear anywhere.
///
/// # Example
///
/// ```
/// use shorthand::{Rule, RuleSet};
///
/// let rules = RuleSet::new()
///     .with_rule(Rule::new("integer"))
///     .with_rule(Rule::with_parameters("between", ["10", "20"]));
///
/// assert!(rules.has_rule("between"));
/// assert_eq!(rules.to_string(), "integer|between:10,20");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    items: Vec<RuleItem>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a pipe-delimited shorthand string, e.g. `"required|min:6"`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`](crate::parse::ParseError) on malformed input.
    pub fn from_shorthand(input: &str) -> Result<Self, crate::parse::ParseError> {
        crate::parse::parse(input)
    }

    /// Parse and resolve a shorthand string in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on parse failure, unknown rules or bad parameters.
    pub fn resolve_shorthand(input: &str) -> Result<Predicate, ResolveError> {
        let rule_set = Self::from_shorthand(input)?;
        rule_set.resolve()
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.items.push(RuleItem::Rule(rule));
    }

    pub fn add_predicate(&mut self, predicate: Predicate) {
        self.items.push(RuleItem::Predicate(predicate));
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.add_predicate(predicate);
        self
    }

    /// The first rule with the given name.
    #[must_use]
    pub fn get_rule(&self, name: &str) -> Option<&Rule> {
        self.rules().find(|r| r.name() == name)
    }

    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.get_rule(name).is_some()
    }

    /// Whether any rule resolves to the given catalog entry.
    #[must_use]
    pub fn contains(&self, kind: RuleName) -> bool {
        self.has_rule(kind.as_str())
    }

    /// Named rules in insertion order, skipping direct predicates.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.items.iter().filter_map(|item| match item {
            RuleItem::Rule(rule) => Some(rule),
            RuleItem::Predicate(_) => None,
        })
    }

    #[must_use]
    pub fn items(&self) -> &[RuleItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve this set into a single predicate node.
    ///
    /// # Errors
    ///
    /// See [`resolve_rule_set`](crate::resolve_rule_set).
    pub fn resolve(&self) -> Result<Predicate, ResolveError> {
        crate::resolve::resolve_rule_set(self)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(RuleItem::Rule).collect(),
        }
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(RuleItem::Rule));
    }
}

/// Renders named rules back to shorthand. Direct predicates are not part of
/// the shorthand grammar and are shown in braces.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            match item {
                RuleItem::Rule(rule) => write!(f, "{rule}")?,
                RuleItem::Predicate(predicate) => write!(f, "{{{predicate}}}")?,
            }
        }
        Ok(())
    }
}
