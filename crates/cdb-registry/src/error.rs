//! # Registry Errors
//!
//! [`LoadError`] is fatal: a registry that cannot be built means no
//! conformance result can be trusted. [`LookupError`] is returned when a
//! caller resolves a code it has not first checked for membership.

use std::path::PathBuf;

use thiserror::Error;

use crate::category::CodeCategory;

/// Reference data could not be turned into a registry.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A reference file or directory could not be read.
    #[error("cannot read reference data at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference document is not valid YAML or does not match the
    /// document shape.
    #[error("invalid reference document '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// The same code appears twice within one category table.
    #[error("duplicate {category} code {code}{} in reference data", scope_suffix(.scope))]
    DuplicateCode {
        category: CodeCategory,
        scope: String,
        code: i64,
    },

    /// An entry has an empty name.
    #[error("{category} code {code} has an empty name")]
    EmptyName { category: CodeCategory, code: i64 },

    /// A category needed by a check has no reference table at all.
    #[error("no reference data loaded for category '{0}'")]
    MissingCategory(CodeCategory),

    /// The reference directory holds no documents.
    #[error("no reference documents found in '{}'", .0.display())]
    Empty(PathBuf),
}

/// A code did not resolve to a name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("code {code} is not registered in {table}{}", scope_suffix(.scope))]
    NotFound {
        table: String,
        scope: String,
        code: String,
    },
}

fn scope_suffix(scope: &str) -> String {
    if scope.is_empty() {
        String::new()
    } else {
        format!(" (scope {scope})")
    }
}
