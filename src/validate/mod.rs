//! Leaf validators owned by this crate.
//!
//! General-purpose predicates (email, dates, ranges) are evaluated by an
//! external [`Evaluator`](crate::Evaluator); only the strict numeric format
//! check lives here.

mod numeric;

pub use numeric::{NumericValue, is_decimal_string};
