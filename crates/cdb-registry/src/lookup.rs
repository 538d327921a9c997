//! # Code Set Lookup
//!
//! The common face of registry tables and fixed enumerations.

use cdb_core::CodeValue;

use crate::error::LookupError;

/// A closed set of codes and their canonical names.
pub trait CodeSet {
    /// Short description used in diagnostics (`kind`, `FACC category`).
    fn describe(&self) -> String;

    /// True iff `code` is a member of the set.
    fn contains_code(&self, code: CodeValue) -> bool;

    /// True iff `name` is the label of some member of the set.
    fn contains_name(&self, name: &str) -> bool;

    /// Resolve the canonical name of a member code.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if `code` is not a member. Callers
    /// are expected to check [`CodeSet::contains_code`] first.
    fn name_for_code(&self, code: CodeValue) -> Result<&str, LookupError>;
}
