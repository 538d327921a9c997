//! # Structure Errors
//!
//! Fatal errors only. A naming defect is a [`cdb_core::Violation`] and is
//! never raised through this type; a [`StructureError`] means the check
//! could not produce a trustworthy result at all.

use std::path::PathBuf;

use cdb_registry::LoadError;
use thiserror::Error;

/// A conformance check could not run to completion.
#[derive(Error, Debug)]
pub enum StructureError {
    /// A directory in the dataset could not be listed.
    #[error("cannot list directory '{}': {source}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The code registry is unusable for this check.
    #[error("registry error: {0}")]
    Registry(#[from] LoadError),

    /// A level grammar is itself invalid.
    #[error("invalid grammar for level '{level}': {reason}")]
    Grammar { level: String, reason: String },

    /// A named level does not exist in the hierarchy.
    #[error("unknown level '{level}' in {hierarchy} (expected one of: {known})")]
    UnknownLevel {
        hierarchy: String,
        level: String,
        known: String,
    },
}

/// A check ran and found violations.
///
/// The message is the violation list, one per line, in discovery order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{check} failed with {count} violation(s):\n{message}")]
pub struct ConformanceFailure {
    pub check: String,
    pub count: usize,
    pub message: String,
}
