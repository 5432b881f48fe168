use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Compiled validation requirement handed to an external [`Evaluator`](crate::Evaluator).
///
/// The tree is inert: it describes what must hold, evaluation semantics live
/// with the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum Predicate {
    /// An atomic check.
    Leaf(Constraint),
    /// Every child must hold, checked in order.
    All(Vec<Predicate>),
    /// The value may be absent or null; if present the inner node must hold.
    Optional(Option<Box<Predicate>>),
    /// The value must be present; the inner node, if any, must also hold.
    Required(Option<Box<Predicate>>),
    /// A structured value whose fields are checked independently.
    Mapping(IndexMap<String, Predicate>),
}

/// Atomic predicate kinds produced by rule resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum Constraint {
    Type(TypeKind),
    /// Strict decimal format, see [`NumericValue`](crate::validate::NumericValue).
    NumericFormat,
    CharClass(CharClass),
    Choice(Vec<String>),
    /// A date; `None` accepts the evaluator's generic date format.
    DateFormat(Option<String>),
    DateTimeFormat,
    EmailFormat,
    UrlFormat,
    PatternMatch(String),
    NotBlank,
    /// Bounds on the length of a string or the element count of an array.
    Length { min: Option<i64>, max: Option<i64> },
    /// Bounds on a numeric value.
    Range { min: Option<i64>, max: Option<i64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum TypeKind {
    Bool,
    Integer,
    Float,
    String,
    Array,
}

/// Character classes for the `alpha*` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum CharClass {
    /// Letters only.
    Alpha,
    /// Letters, digits, `-` and `_`.
    AlphaDash,
    /// Letters and digits.
    AlphaNum,
}

static ALPHA: LazyLock<Regex> = LazyLock::new(|| compile_class(CharClass::Alpha));
static ALPHA_DASH: LazyLock<Regex> = LazyLock::new(|| compile_class(CharClass::AlphaDash));
static ALPHA_NUM: LazyLock<Regex> = LazyLock::new(|| compile_class(CharClass::AlphaNum));

fn compile_class(class: CharClass) -> Regex {
    Regex::new(class.pattern()).expect("character class patterns are valid")
}

impl CharClass {
    /// The anchored regular expression for this class.
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            CharClass::Alpha => r"^[\p{L}\p{M}]+$",
            CharClass::AlphaDash => r"^[\p{L}\p{M}\p{N}_-]+$",
            CharClass::AlphaNum => r"^[\p{L}\p{M}\p{N}]+$",
        }
    }

    /// Whether every character of `input` belongs to the class. Empty input never matches.
    #[must_use]
    pub fn is_match(self, input: &str) -> bool {
        let re: &Regex = match self {
            CharClass::Alpha => &ALPHA,
            CharClass::AlphaDash => &ALPHA_DASH,
            CharClass::AlphaNum => &ALPHA_NUM,
        };
        re.is_match(input)
    }
}

impl Predicate {
    #[must_use]
    pub fn leaf(constraint: Constraint) -> Self {
        Predicate::Leaf(constraint)
    }

    #[must_use]
    pub fn all(children: Vec<Predicate>) -> Self {
        Predicate::All(children)
    }

    #[must_use]
    pub fn optional(inner: Option<Predicate>) -> Self {
        Predicate::Optional(inner.map(Box::new))
    }

    #[must_use]
    pub fn required(inner: Option<Predicate>) -> Self {
        Predicate::Required(inner.map(Box::new))
    }

    /// Collapse a predicate list: none is `None`, one is that node, more is `All`.
    #[must_use]
    pub fn combine(mut predicates: Vec<Predicate>) -> Option<Predicate> {
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Predicate::All(predicates)),
        }
    }

    /// Look up a nested node by dot-path through `Mapping` nodes.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Predicate> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| match node {
            Predicate::Mapping(fields) => fields.get(segment),
            _ => None,
        })
    }
}

impl From<Constraint> for Predicate {
    fn from(c: Constraint) -> Self {
        Predicate::Leaf(c)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Bool => "bool",
            TypeKind::Integer => "integer",
            TypeKind::Float => "float",
            TypeKind::String => "string",
            TypeKind::Array => "array",
        };
        f.write_str(name)
    }
}

fn write_bounds(f: &mut fmt::Formatter<'_>, min: Option<i64>, max: Option<i64>) -> fmt::Result {
    match (min, max) {
        (Some(lo), Some(hi)) => write!(f, "min={lo}, max={hi}"),
        (Some(lo), None) => write!(f, "min={lo}"),
        (None, Some(hi)) => write!(f, "max={hi}"),
        (None, None) => Ok(()),
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Type(kind) => write!(f, "Type({kind})"),
            Constraint::NumericFormat => write!(f, "NumericFormat"),
            Constraint::CharClass(class) => write!(f, "CharClass({class:?})"),
            Constraint::Choice(choices) => write!(f, "Choice({})", choices.join(", ")),
            Constraint::DateFormat(Some(format)) => write!(f, "DateFormat({format})"),
            Constraint::DateFormat(None) => write!(f, "DateFormat"),
            Constraint::DateTimeFormat => write!(f, "DateTimeFormat"),
            Constraint::EmailFormat => write!(f, "EmailFormat"),
            Constraint::UrlFormat => write!(f, "UrlFormat"),
            Constraint::PatternMatch(pattern) => write!(f, "PatternMatch({pattern})"),
            Constraint::NotBlank => write!(f, "NotBlank"),
            Constraint::Length { min, max } => {
                write!(f, "Length(")?;
                write_bounds(f, *min, *max)?;
                write!(f, ")")
            }
            Constraint::Range { min, max } => {
                write!(f, "Range(")?;
                write_bounds(f, *min, *max)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Leaf(c) => write!(f, "{c}"),
            Predicate::All(children) => {
                write!(f, "All[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "]")
            }
            Predicate::Optional(Some(inner)) => write!(f, "Optional({inner})"),
            Predicate::Optional(None) => write!(f, "Optional(null)"),
            Predicate::Required(Some(inner)) => write!(f, "Required({inner})"),
            Predicate::Required(None) => write!(f, "Required(null)"),
            Predicate::Mapping(fields) => {
                write!(f, "Mapping{{")?;
                for (i, (key, node)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {node}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
