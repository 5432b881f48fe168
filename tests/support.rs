#![allow(dead_code)]

//! Small reference evaluators standing in for an external validation engine.

use shorthand::validate::NumericValue;
use shorthand::{Constraint, Predicate, TypeKind, Value, Violation, ViolationCode};

/// Checks types, formats and blankness but ignores range and length bounds.
pub fn type_checks(path: &str, value: &Value, predicate: &Predicate) -> Vec<Violation> {
    let mut out = Vec::new();
    check(path, value, predicate, false, &mut out);
    out
}

/// Like [`type_checks`], also enforcing range and length bounds.
pub fn strict(path: &str, value: &Value, predicate: &Predicate) -> Vec<Violation> {
    let mut out = Vec::new();
    check(path, value, predicate, true, &mut out);
    out
}

fn check(path: &str, value: &Value, predicate: &Predicate, bounds: bool, out: &mut Vec<Violation>) {
    match predicate {
        Predicate::Optional(inner) => {
            match inner {
                Some(inner) if !value.is_null() => check(path, value, inner, bounds, out),
                _ => {}
            }
        }
        Predicate::Required(inner) => {
            if let Some(inner) = inner {
                check(path, value, inner, bounds, out);
            }
        }
        Predicate::All(children) => {
            for child in children {
                check(path, value, child, bounds, out);
            }
        }
        Predicate::Mapping(_) => {}
        Predicate::Leaf(constraint) => out.extend(leaf(path, value, constraint, bounds)),
    }
}

fn custom(path: &str, code: &str, message: &str) -> Option<Violation> {
    Some(Violation::new(path, ViolationCode::Custom(code.into()), message))
}

fn leaf(path: &str, value: &Value, constraint: &Constraint, bounds: bool) -> Option<Violation> {
    match constraint {
        Constraint::Type(kind) => {
            let ok = matches!(
                (kind, value),
                (_, Value::Null)
                    | (TypeKind::Bool, Value::Bool(_))
                    | (TypeKind::Integer, Value::Int(_))
                    | (TypeKind::Float, Value::Float(_))
                    | (TypeKind::String, Value::String(_))
            );
            if ok {
                None
            } else {
                custom(path, "TYPE_ERROR", &format!("This value should be of type {kind}."))
            }
        }
        Constraint::NumericFormat => NumericValue::validate(path, value),
        Constraint::NotBlank => match value {
            Value::Null => custom(path, "IS_BLANK_ERROR", "This value should not be blank."),
            Value::String(s) if s.is_empty() => {
                custom(path, "IS_BLANK_ERROR", "This value should not be blank.")
            }
            _ => None,
        },
        Constraint::Choice(choices) => match value {
            Value::String(s) if !choices.contains(s) => {
                custom(path, "NO_SUCH_CHOICE_ERROR", "The value you selected is not a valid choice.")
            }
            _ => None,
        },
        Constraint::CharClass(class) => match value {
            Value::String(s) if !class.is_match(s) => {
                custom(path, "REGEX_FAILED_ERROR", "This value is not valid.")
            }
            _ => None,
        },
        Constraint::Range { min, max } if bounds => {
            #[allow(clippy::cast_precision_loss)]
            let n = match value {
                Value::Int(n) => *n as f64,
                Value::Float(f) => *f,
                _ => return None,
            };
            #[allow(clippy::cast_precision_loss)]
            let out_of_range =
                min.is_some_and(|lo| n < lo as f64) || max.is_some_and(|hi| n > hi as f64);
            if out_of_range {
                custom(path, "NOT_IN_RANGE_ERROR", "This value is out of range.")
            } else {
                None
            }
        }
        Constraint::Length { min, max } if bounds => {
            let Value::String(s) = value else {
                return None;
            };
            let len = i64::try_from(s.chars().count()).unwrap_or(i64::MAX);
            if min.is_some_and(|lo| len < lo) || max.is_some_and(|hi| len > hi) {
                custom(path, "LENGTH_ERROR", "This value has an invalid length.")
            } else {
                None
            }
        }
        _ => None,
    }
}
