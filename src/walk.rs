use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::transform::Transformer;
use crate::{
    Document, Predicate, ResolveError, RuleSet, Value, Violation, WalkError, WalkReport, join_path,
};

const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied while walking a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkOptions {
    /// Maximum number of nested containers, the root included.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WalkOptions {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Receives every node the walker reaches.
///
/// Closures `FnMut(&str, Value) -> Result<Value, WalkError>` implement this
/// trait and only see leaves.
pub trait LeafVisitor {
    /// Called once per leaf with its dot-path. The returned value takes the
    /// leaf's place in the output document.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn visit_leaf(&mut self, path: &str, value: Value) -> Result<Value, WalkError>;

    /// Called before the children of a mapping or sequence are visited.
    /// `kind` is `"mapping"` or `"sequence"`.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn enter_container(&mut self, path: &str, kind: &'static str) -> Result<(), WalkError> {
        let _ = (path, kind);
        Ok(())
    }
}

impl<F> LeafVisitor for F
where
    F: FnMut(&str, Value) -> Result<Value, WalkError>,
{
    fn visit_leaf(&mut self, path: &str, value: Value) -> Result<Value, WalkError> {
        self(path, value)
    }
}

/// Walk `document` depth-first with default options.
///
/// # Errors
///
/// See [`walk_with`].
pub fn walk<V>(document: &Document, visitor: &mut V) -> Result<Document, WalkError>
where
    V: LeafVisitor + ?Sized,
{
    walk_with(&WalkOptions::default(), document, visitor)
}

/// Walk `document` depth-first, mapping keys in insertion order and sequence
/// items in index order, and rebuild a document of the same shape from the
/// visitor's leaf results.
///
/// # Errors
///
/// Returns whatever the visitor returns, or [`WalkError::DepthExceeded`] when
/// containers nest deeper than `options.max_depth`.
///
/// # Example
///
/// ```
/// use shorthand::{Document, Value, WalkError, walk};
///
/// let doc = Document::new().set("a", Document::list(["1", "2"]));
/// let mut seen = Vec::new();
/// let out = walk(&doc, &mut |path: &str, value: Value| -> Result<Value, WalkError> {
///     seen.push(path.to_owned());
///     Ok(value)
/// })
/// .unwrap();
///
/// assert_eq!(out, doc);
/// assert_eq!(seen, ["a.0", "a.1"]);
/// ```
pub fn walk_with<V>(
    options: &WalkOptions,
    document: &Document,
    visitor: &mut V,
) -> Result<Document, WalkError>
where
    V: LeafVisitor + ?Sized,
{
    debug!(max_depth = options.max_depth, "walk started");
    let out = walk_node(options, visitor, "", document, 0)?;
    debug!("walk finished");
    Ok(out)
}

fn walk_node<V>(
    options: &WalkOptions,
    visitor: &mut V,
    path: &str,
    node: &Document,
    depth: usize,
) -> Result<Document, WalkError>
where
    V: LeafVisitor + ?Sized,
{
    match node {
        Document::Value(value) => {
            trace!(path, "leaf");
            visitor.visit_leaf(path, value.clone()).map(Document::Value)
        }
        Document::List(items) => {
            enter(options, &mut *visitor, path, node, depth)?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let child = join_path(path, &i.to_string());
                    walk_node(options, &mut *visitor, &child, item, depth + 1)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Document::List)
        }
        Document::Map(map) => {
            enter(options, &mut *visitor, path, node, depth)?;
            map.iter()
                .map(|(key, item)| {
                    walk_node(options, &mut *visitor, &join_path(path, key), item, depth + 1)
                        .map(|out| (key.clone(), out))
                })
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Document::Map)
        }
    }
}

fn enter<V>(
    options: &WalkOptions,
    visitor: &mut V,
    path: &str,
    node: &Document,
    depth: usize,
) -> Result<(), WalkError>
where
    V: LeafVisitor + ?Sized,
{
    if depth >= options.max_depth {
        return Err(WalkError::DepthExceeded {
            path: path.to_owned(),
            limit: options.max_depth,
        });
    }
    visitor.enter_container(path, node.kind())
}

/// The external engine that checks a value against a predicate tree.
///
/// Closures `Fn(&str, &Value, &Predicate) -> Vec<Violation>` implement it.
pub trait Evaluator {
    fn evaluate(&self, path: &str, value: &Value, predicate: &Predicate) -> Vec<Violation>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, &Value, &Predicate) -> Vec<Violation>,
{
    fn evaluate(&self, path: &str, value: &Value, predicate: &Predicate) -> Vec<Violation> {
        self(path, value, predicate)
    }
}

/// The predicate and optional transformer registered for one leaf path.
#[derive(Clone)]
pub struct FieldRule {
    predicate: Predicate,
    transformer: Option<Arc<dyn Transformer>>,
}

impl FieldRule {
    #[must_use]
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            transformer: None,
        }
    }

    /// Resolve a shorthand string into the rule's predicate.
    ///
    /// # Errors
    ///
    /// Any parse or resolution error of the shorthand.
    pub fn from_shorthand(input: &str) -> Result<Self, ResolveError> {
        Ok(Self::new(RuleSet::resolve_shorthand(input)?))
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    #[must_use]
    pub fn with_shared_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub fn transformer(&self) -> Option<&dyn Transformer> {
        self.transformer.as_deref()
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("predicate", &self.predicate)
            .field("transformer", &self.transformer().map(|t| t.name()))
            .finish()
    }
}

impl From<Predicate> for FieldRule {
    fn from(predicate: Predicate) -> Self {
        Self::new(predicate)
    }
}

/// Transforms and validates every leaf of a document against rules
/// registered per dot-path.
///
/// Every leaf must have a registered rule. Null leaves skip the transformer
/// and go straight to the evaluator. A leaf whose value produces violations
/// is replaced by `null` in the output document. The validator
/// holds no per-walk state, so one instance can serve many documents and
/// threads.
///
/// # Example
///
/// ```
/// use shorthand::transform::StringToInt;
/// use shorthand::{Document, FieldRule, FieldValidator, Predicate, Value, Violation};
///
/// let accept_all = |_: &str, _: &Value, _: &Predicate| Vec::<Violation>::new();
/// let as_int = |rules: &str| {
///     FieldRule::from_shorthand(rules)
///         .unwrap()
///         .with_transformer(StringToInt)
/// };
/// let validator = FieldValidator::new(accept_all)
///     .rule("a.0", as_int("required|integer"))
///     .rule("a.1", as_int("integer"));
///
/// let report = validator
///     .validate(&Document::new().set("a", Document::list(["1", "2"])))
///     .unwrap();
///
/// assert!(report.is_valid());
/// assert_eq!(report.document(), &Document::new().set("a", Document::list([1_i64, 2])));
/// ```
#[derive(Debug)]
pub struct FieldValidator<E> {
    rules: IndexMap<String, FieldRule>,
    evaluator: E,
    options: WalkOptions,
}

impl<E: Evaluator> FieldValidator<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            rules: IndexMap::new(),
            evaluator,
            options: WalkOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Register a rule for a leaf path, replacing any earlier one.
    #[must_use]
    pub fn rule(mut self, path: &str, rule: impl Into<FieldRule>) -> Self {
        self.insert(path, rule.into());
        self
    }

    pub fn insert(&mut self, path: &str, rule: FieldRule) {
        self.rules.insert(path.to_owned(), rule);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FieldRule> {
        self.rules.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Walk `document`, transforming and evaluating every leaf.
    ///
    /// # Errors
    ///
    /// [`WalkError::MissingRule`] for a leaf without a registered rule,
    /// [`WalkError::StructuralMismatch`] when the document nests differently
    /// from the registered paths, [`WalkError::TransformFailure`] when a
    /// transformer declines a value, and [`WalkError::DepthExceeded`].
    /// Violations are not errors; they are collected into the report.
    pub fn validate(&self, document: &Document) -> Result<WalkReport, WalkError> {
        let start = Instant::now();
        let mut session = Session {
            validator: self,
            violations: Vec::new(),
            leaves: 0,
        };
        let output = walk_with(&self.options, document, &mut session)?;
        let Session {
            violations, leaves, ..
        } = session;
        debug!(leaves, violations = violations.len(), "document validated");
        Ok(WalkReport::new(output, violations, leaves, start.elapsed()))
    }

    // Whether some registered path lies strictly below `path`.
    fn has_children(&self, path: &str) -> bool {
        if path.is_empty() {
            return !self.rules.is_empty();
        }
        self.rules.keys().any(|key| {
            key.len() > path.len() && key.starts_with(path) && key.as_bytes()[path.len()] == b'.'
        })
    }
}

struct Session<'v, E> {
    validator: &'v FieldValidator<E>,
    violations: Vec<Violation>,
    leaves: usize,
}

impl<E: Evaluator> LeafVisitor for Session<'_, E> {
    fn visit_leaf(&mut self, path: &str, value: Value) -> Result<Value, WalkError> {
        self.leaves += 1;
        let Some(rule) = self.validator.rules.get(path) else {
            if self.validator.has_children(path) {
                return Err(WalkError::StructuralMismatch {
                    path: path.to_owned(),
                    expected: "container",
                    found: "leaf",
                });
            }
            return Err(WalkError::MissingRule {
                path: path.to_owned(),
            });
        };

        let value = match rule.transformer() {
            Some(transformer) if !value.is_null() => {
                if !transformer.transformable(&value) {
                    return Err(WalkError::TransformFailure {
                        path: path.to_owned(),
                        transformer: transformer.name().to_owned(),
                    });
                }
                trace!(path, transformer = transformer.name(), "transform");
                transformer.transform(value)
            }
            _ => value,
        };

        let violations = self
            .validator
            .evaluator
            .evaluate(path, &value, &rule.predicate);
        if violations.is_empty() {
            return Ok(value);
        }
        trace!(path, count = violations.len(), "leaf rejected");
        self.violations.extend(violations);
        Ok(Value::Null)
    }

    fn enter_container(&mut self, path: &str, kind: &'static str) -> Result<(), WalkError> {
        if self.validator.rules.contains_key(path) {
            return Err(WalkError::StructuralMismatch {
                path: path.to_owned(),
                expected: "leaf",
                found: kind,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::StringToInt;
    use crate::{Constraint, ViolationCode};

    fn identity(_: &str, value: Value) -> Result<Value, WalkError> {
        Ok(value)
    }

    fn accept_all(_: &str, _: &Value, _: &Predicate) -> Vec<Violation> {
        Vec::new()
    }

    // Rejects any non-integer value that meets a `Type(integer)` leaf.
    fn integers_only(path: &str, value: &Value, predicate: &Predicate) -> Vec<Violation> {
        fn wants_int(p: &Predicate) -> bool {
            match p {
                Predicate::Leaf(Constraint::Type(crate::TypeKind::Integer)) => true,
                Predicate::All(children) => children.iter().any(wants_int),
                Predicate::Optional(Some(inner)) | Predicate::Required(Some(inner)) => {
                    wants_int(inner)
                }
                _ => false,
            }
        }
        if wants_int(predicate) && !matches!(value, Value::Int(_)) {
            vec![Violation::new(
                path,
                ViolationCode::InvalidValueType,
                "not an integer",
            )]
        } else {
            Vec::new()
        }
    }

    #[test]
    fn walk_preserves_shape_and_order() {
        let doc = Document::new()
            .set("b", 1_i64)
            .set("a", Document::list(["x", "y"]))
            .set("c.d", Value::Null);
        let mut paths = Vec::new();
        let out = walk(&doc, &mut |path: &str, value: Value| -> Result<Value, WalkError> {
            paths.push(path.to_owned());
            Ok(value)
        })
        .unwrap();
        assert_eq!(out, doc);
        assert_eq!(paths, vec!["b", "a.0", "a.1", "c.d"]);
    }

    #[test]
    fn walk_substitutes_leaf_results() {
        let doc = Document::new().set("a", Document::list(["1", "2"]));
        let out = walk(&doc, &mut |_: &str, _: Value| -> Result<Value, WalkError> {
            Ok(Value::Null)
        }).unwrap();
        assert_eq!(
            out,
            Document::new().set("a", Document::list([Value::Null, Value::Null]))
        );
    }

    #[test]
    fn walk_scalar_root_uses_empty_path() {
        let doc = Document::Value(Value::Int(3));
        let mut seen = None;
        walk(&doc, &mut |path: &str, value: Value| -> Result<Value, WalkError> {
            seen = Some(path.to_owned());
            Ok(value)
        })
        .unwrap();
        assert_eq!(seen.as_deref(), Some(""));
    }

    #[test]
    fn walk_empty_containers() {
        let doc = Document::new().set("a", Document::List(vec![]));
        assert_eq!(walk(&doc, &mut identity).unwrap(), doc);
    }

    #[test]
    fn visitor_error_aborts() {
        let doc = Document::new().set("a", 1_i64).set("b", 2_i64);
        let mut calls = 0;
        let err = walk(&doc, &mut |path: &str, _: Value| -> Result<Value, WalkError> {
            calls += 1;
            Err(WalkError::MissingRule {
                path: path.to_owned(),
            })
        })
        .unwrap_err();
        assert!(matches!(err, WalkError::MissingRule { path } if path == "a"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn depth_limit() {
        let doc = Document::new().set("a.b.c", 1_i64);
        let shallow = WalkOptions::default().with_max_depth(2);
        let err = walk_with(&shallow, &doc, &mut identity).unwrap_err();
        assert!(matches!(err, WalkError::DepthExceeded { ref path, limit: 2 } if path == "a.b"));

        let enough = WalkOptions::default().with_max_depth(3);
        assert!(walk_with(&enough, &doc, &mut identity).is_ok());
    }

    #[test]
    fn default_options() {
        assert_eq!(WalkOptions::default().max_depth, 64);
    }

    #[test]
    fn validator_transforms_leaves() {
        let validator = FieldValidator::new(integers_only)
            .rule(
                "a.0",
                FieldRule::from_shorthand("required|integer|min:1")
                    .unwrap()
                    .with_transformer(StringToInt),
            )
            .rule(
                "a.1",
                FieldRule::from_shorthand("integer|min:3")
                    .unwrap()
                    .with_transformer(StringToInt),
            );
        let report = validator
            .validate(&Document::new().set("a", Document::list(["1", "2"])))
            .unwrap();
        assert!(report.is_valid());
        assert_eq!(report.leaves(), 2);
        assert_eq!(
            report.document(),
            &Document::new().set("a", Document::list([1_i64, 2]))
        );
    }

    #[test]
    fn validator_nulls_rejected_leaves() {
        let validator = FieldValidator::new(integers_only)
            .rule("a", FieldRule::from_shorthand("integer").unwrap())
            .rule("b", FieldRule::from_shorthand("string").unwrap());
        let report = validator
            .validate(&Document::new().set("a", "x").set("b", "y"))
            .unwrap();
        assert_eq!(report.violations().len(), 1);
        assert_eq!(report.violations()[0].path(), "a");
        assert_eq!(report.document().leaf("a"), Some(&Value::Null));
        assert_eq!(report.document().leaf("b"), Some(&Value::from("y")));
    }

    #[test]
    fn validator_missing_rule() {
        let validator = FieldValidator::new(accept_all).rule("a", Predicate::optional(None));
        let err = validator
            .validate(&Document::new().set("a", 1_i64).set("extra", 2_i64))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing rule for: extra");
    }

    #[test]
    fn validator_leaf_where_container_expected() {
        let validator =
            FieldValidator::new(accept_all).rule("name.first", Predicate::optional(None));
        let err = validator
            .validate(&Document::new().set("name", "Fabien"))
            .unwrap_err();
        assert!(matches!(
            err,
            WalkError::StructuralMismatch { ref path, expected: "container", found: "leaf" }
                if path == "name"
        ));
    }

    #[test]
    fn validator_container_where_leaf_expected() {
        let validator = FieldValidator::new(accept_all).rule("tags", Predicate::optional(None));
        let err = validator
            .validate(&Document::new().set("tags", Document::list(["a"])))
            .unwrap_err();
        assert!(matches!(
            err,
            WalkError::StructuralMismatch { ref path, expected: "leaf", found: "sequence" }
                if path == "tags"
        ));
    }

    #[test]
    fn validator_transform_failure() {
        let validator = FieldValidator::new(accept_all).rule(
            "a",
            FieldRule::new(Predicate::optional(None)).with_transformer(StringToInt),
        );
        let err = validator
            .validate(&Document::new().set("a", "abc"))
            .unwrap_err();
        assert!(matches!(
            err,
            WalkError::TransformFailure { ref path, ref transformer }
                if path == "a" && transformer == "string_to_int"
        ));
    }

    #[test]
    fn null_leaves_bypass_the_transformer() {
        let seen = std::sync::Mutex::new(Vec::new());
        let record = |path: &str, value: &Value, _: &Predicate| {
            seen.lock().unwrap().push((path.to_owned(), value.clone()));
            Vec::new()
        };
        let validator = FieldValidator::new(record).rule(
            "page",
            FieldRule::from_shorthand("integer|min:1")
                .unwrap()
                .with_transformer(StringToInt),
        );
        let report = validator
            .validate(&Document::new().set("page", Value::Null))
            .unwrap();
        assert!(report.is_valid());
        assert_eq!(report.document().leaf("page"), Some(&Value::Null));
        assert_eq!(*seen.lock().unwrap(), vec![("page".to_owned(), Value::Null)]);
    }

    #[test]
    fn prefix_is_not_a_parent() {
        let validator = FieldValidator::new(accept_all)
            .rule("ab", Predicate::optional(None))
            .rule("a", Predicate::optional(None));
        assert!(!validator.has_children("a"));
        assert!(validator.has_children(""));
    }

    #[test]
    fn field_rule_debug_names_transformer() {
        let rule = FieldRule::new(Predicate::optional(None)).with_transformer(StringToInt);
        assert!(format!("{rule:?}").contains("string_to_int"));
    }
}
