use std::fmt;
use std::time::Duration;

use super::document::Document;
use super::violation::Violation;

/// Outcome of validating a document with a
/// [`FieldValidator`](crate::FieldValidator).
///
/// Holds the rebuilt document (transformed leaves, `null` where a leaf
/// failed), every violation collected along the way, and the wall-clock
/// duration of the walk.
#[derive(Debug, Clone)]
#[must_use]
pub struct WalkReport {
    document: Document,
    violations: Vec<Violation>,
    leaves: usize,
    duration: Duration,
}

impl WalkReport {
    pub(crate) fn new(
        document: Document,
        violations: Vec<Violation>,
        leaves: usize,
        duration: Duration,
    ) -> Self {
        Self {
            document,
            violations,
            leaves,
            duration,
        }
    }

    /// The output document, same shape as the input.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Violations in the order the leaves were visited.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of leaves visited.
    #[must_use]
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "leaves: {}, violations: {}",
            self.leaves,
            self.violations.len()
        )?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
