mod document;
mod error;
mod field_rules;
mod predicate;
mod rule;
mod ruleset;
mod value;
mod violation;
mod walk_report;

pub use document::{Document, join_path};
pub use error::{ResolveError, WalkError};
pub use field_rules::{FieldRules, RuleDefinition};
pub use predicate::{CharClass, Constraint, Predicate, TypeKind};
pub use rule::{Rule, RuleName};
pub use ruleset::{RuleItem, RuleSet};
pub use value::Value;
pub use violation::{Violation, ViolationCode};
pub use walk_report::WalkReport;
