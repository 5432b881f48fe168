use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::{
    CharClass, Constraint, FieldRules, Predicate, ResolveError, Rule, RuleDefinition, RuleItem,
    RuleName, RuleSet, TypeKind, join_path,
};

/// Resolve a rule set into one predicate node.
///
/// Every rule name is checked against the catalog before anything else, so
/// an unknown rule fails the whole set wherever it appears. `min`, `max` and
/// `between` bound the value when the set also contains `integer`, `float` or
/// `numeric`, and bound the length or element count otherwise. The result is
/// `Required(..)` when `required` is present and `Optional(..)` otherwise,
/// wrapping nothing, the single predicate, or an `All` of several.
///
/// # Errors
///
/// Returns [`ResolveError::UnresolvableRule`] for names outside the catalog,
/// and [`ResolveError::MissingParameter`] or
/// [`ResolveError::InvalidParameterType`] for bad rule parameters.
pub fn resolve_rule_set(rule_set: &RuleSet) -> Result<Predicate, ResolveError> {
    check_catalog(rule_set)?;

    let value_bounds = [RuleName::Integer, RuleName::Float, RuleName::Numeric]
        .into_iter()
        .any(|kind| rule_set.contains(kind));

    let mut required = false;
    let mut predicates = Vec::with_capacity(rule_set.len());
    for item in rule_set.items() {
        match item {
            RuleItem::Predicate(predicate) => predicates.push(predicate.clone()),
            RuleItem::Rule(rule) => {
                let kind = rule_kind(rule)?;
                if kind == RuleName::Required {
                    required = true;
                } else if let Some(constraint) = resolve_constraint(kind, rule, value_bounds)? {
                    trace!(rule = %rule, constraint = %constraint, "resolved rule");
                    predicates.push(Predicate::Leaf(constraint));
                }
            }
        }
    }

    debug!(
        rules = rule_set.len(),
        predicates = predicates.len(),
        required,
        value_bounds,
        "resolved rule set"
    );

    let inner = Predicate::combine(predicates);
    Ok(if required {
        Predicate::required(inner)
    } else {
        Predicate::optional(inner)
    })
}

/// Resolve any rule definition into a predicate node.
///
/// # Errors
///
/// Returns [`ResolveError::Parse`] for malformed shorthand, plus every error
/// of [`resolve_rule_set`] and [`resolve_fields`].
pub fn resolve_definition(definition: &RuleDefinition) -> Result<Predicate, ResolveError> {
    match definition {
        RuleDefinition::Shorthand(text) => RuleSet::resolve_shorthand(text),
        RuleDefinition::Rules(rule_set) => resolve_rule_set(rule_set),
        RuleDefinition::Predicate(predicate) => Ok(predicate.clone()),
        RuleDefinition::Nested(fields) => resolve_fields(fields),
    }
}

/// Resolve a field collection into a `Mapping` node.
///
/// Each field resolves independently. Dotted paths become nested `Mapping`
/// nodes keyed by each segment, so `"a.0"` and `"a.1"` end up under one `a`
/// node with children `0` and `1`. A nested collection merges into the same
/// tree, so `name => {first_name}` and `name.last_name` share one `name` node.
///
/// # Errors
///
/// Returns [`ResolveError::PathConflict`] when a path is registered both as a
/// field and as the parent of another field, plus every error of
/// [`resolve_definition`].
pub fn resolve_fields(fields: &FieldRules) -> Result<Predicate, ResolveError> {
    let mut root = IndexMap::new();
    insert_fields(&mut root, "", fields)?;
    debug!(fields = fields.len(), "resolved field rules");
    Ok(into_predicate(root))
}

fn rule_kind(rule: &Rule) -> Result<RuleName, ResolveError> {
    rule.kind().ok_or_else(|| ResolveError::UnresolvableRule {
        name: rule.name().to_owned(),
    })
}

fn check_catalog(rule_set: &RuleSet) -> Result<(), ResolveError> {
    for rule in rule_set.rules() {
        rule_kind(rule)?;
    }
    Ok(())
}

fn resolve_constraint(
    kind: RuleName,
    rule: &Rule,
    value_bounds: bool,
) -> Result<Option<Constraint>, ResolveError> {
    let bounds = |min: Option<i64>, max: Option<i64>| {
        if value_bounds {
            Constraint::Range { min, max }
        } else {
            Constraint::Length { min, max }
        }
    };

    let constraint = match kind {
        RuleName::Required | RuleName::Nullable => return Ok(None),
        RuleName::Boolean => Constraint::Type(TypeKind::Bool),
        RuleName::Integer => Constraint::Type(TypeKind::Integer),
        RuleName::Float => Constraint::Type(TypeKind::Float),
        RuleName::Numeric => Constraint::NumericFormat,
        RuleName::String => Constraint::Type(TypeKind::String),
        RuleName::Array => Constraint::Type(TypeKind::Array),
        RuleName::Alpha => Constraint::CharClass(CharClass::Alpha),
        RuleName::AlphaDash => Constraint::CharClass(CharClass::AlphaDash),
        RuleName::AlphaNum => Constraint::CharClass(CharClass::AlphaNum),
        RuleName::In => Constraint::Choice(rule.parameters().to_vec()),
        RuleName::Date => Constraint::DateFormat(None),
        RuleName::DateTime => Constraint::DateTimeFormat,
        RuleName::DateFormat => Constraint::DateFormat(Some(rule.parameter(0)?.to_owned())),
        RuleName::Email => Constraint::EmailFormat,
        RuleName::Url => Constraint::UrlFormat,
        RuleName::Filled => Constraint::NotBlank,
        RuleName::Regex => Constraint::PatternMatch(rule.parameter(0)?.to_owned()),
        RuleName::Min => bounds(Some(rule.int_parameter(0)?), None),
        RuleName::Max => bounds(None, Some(rule.int_parameter(0)?)),
        RuleName::Between => bounds(Some(rule.int_parameter(0)?), Some(rule.int_parameter(1)?)),
    };
    Ok(Some(constraint))
}

enum Node {
    Field(Predicate),
    Group(IndexMap<String, Node>),
}

fn insert_fields(
    group: &mut IndexMap<String, Node>,
    prefix: &str,
    fields: &FieldRules,
) -> Result<(), ResolveError> {
    for (path, definition) in fields.iter() {
        let full = join_path(prefix, path);
        match definition {
            RuleDefinition::Nested(inner) => {
                let children = group_at(group, path, &full)?;
                insert_fields(children, &full, inner)?;
            }
            other => {
                let predicate = resolve_definition(other)?;
                insert_field(group, path, &full, predicate)?;
            }
        }
    }
    Ok(())
}

/// The group at `path` below `group`, created on the way down.
fn group_at<'a>(
    mut group: &'a mut IndexMap<String, Node>,
    path: &str,
    full: &str,
) -> Result<&'a mut IndexMap<String, Node>, ResolveError> {
    for segment in path.split('.') {
        let node = group
            .entry(segment.to_owned())
            .or_insert_with(|| Node::Group(IndexMap::new()));
        group = match node {
            Node::Group(children) => children,
            Node::Field(_) => return Err(conflict(full)),
        };
    }
    Ok(group)
}

fn insert_field(
    group: &mut IndexMap<String, Node>,
    path: &str,
    full: &str,
    predicate: Predicate,
) -> Result<(), ResolveError> {
    let (group, key) = match path.rsplit_once('.') {
        Some((parent, key)) => (group_at(group, parent, full)?, key),
        None => (group, path),
    };
    match group.entry(key.to_owned()) {
        Entry::Occupied(_) => Err(conflict(full)),
        Entry::Vacant(slot) => {
            slot.insert(Node::Field(predicate));
            Ok(())
        }
    }
}

fn conflict(path: &str) -> ResolveError {
    ResolveError::PathConflict {
        path: path.to_owned(),
    }
}

fn into_predicate(group: IndexMap<String, Node>) -> Predicate {
    Predicate::Mapping(
        group
            .into_iter()
            .map(|(key, node)| {
                let predicate = match node {
                    Node::Field(predicate) => predicate,
                    Node::Group(children) => into_predicate(children),
                };
                (key, predicate)
            })
            .collect(),
    )
}
