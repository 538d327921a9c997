//! # Violations
//!
//! A [`Violation`] is a recorded naming defect: a human-readable message
//! plus the offending path. Violations are never raised as errors; the
//! validator collects them in discovery order into a [`ViolationList`].

use std::fmt;

use serde::Serialize;

/// A single naming nonconformance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// What is wrong with the name.
    pub message: String,
    /// The path of the offending directory or file.
    pub path: String,
}

impl Violation {
    /// A violation of `message` at `path`.
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.path)
    }
}

/// Ordered collection of violations.
///
/// Order is discovery order. No deduplication is performed: two defects
/// with identical text on different paths, or two defects on the same
/// path, are both kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationList {
    violations: Vec<Violation>,
}

impl ViolationList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, message: impl Into<String>, path: impl Into<String>) {
        self.violations.push(Violation::new(message, path));
    }

    /// Append every violation from `other`, preserving its order.
    pub fn extend(&mut self, other: ViolationList) {
        self.violations.extend(other.violations);
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Borrow the violations as a slice.
    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
