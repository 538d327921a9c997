//! # Conformance Checks
//!
//! A [`ConformanceCheck`] binds a grammar table to a root directory. Run
//! against a [`CodeRegistry`] it yields a [`CheckReport`]: passed,
//! skipped (the root does not exist), or failed with the accumulated
//! violations. A [`CheckSuite`] runs several checks over one shared
//! registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cdb_core::ViolationList;
use cdb_registry::{CodeCategory, CodeRegistry};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ConformanceFailure, StructureError};
use crate::grammar::LevelGrammar;
use crate::validator::PathValidator;

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    /// The root directory does not exist; the check holds vacuously.
    Skipped,
    Failed,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "PASS"),
            Self::Skipped => write!(f, "SKIP"),
            Self::Failed => write!(f, "FAIL"),
        }
    }
}

/// Which levels a check reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporting {
    AllLevels,
    /// Only the level at this depth. Levels above are walked for context.
    Level(usize),
}

/// One named check over one subtree.
#[derive(Debug, Clone)]
pub struct ConformanceCheck {
    name: String,
    root: PathBuf,
    levels: Arc<Vec<LevelGrammar>>,
    reporting: Reporting,
}

impl ConformanceCheck {
    /// A check over every level of `levels`.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, levels: Arc<Vec<LevelGrammar>>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            levels,
            reporting: Reporting::AllLevels,
        }
    }

    /// Restrict reporting to the level at `depth`.
    pub fn for_level(mut self, name: impl Into<String>, depth: usize) -> Self {
        self.name = name.into();
        self.reporting = Reporting::Level(depth);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn levels(&self) -> &[LevelGrammar] {
        &self.levels
    }

    pub fn reporting(&self) -> Reporting {
        self.reporting
    }

    /// Registry categories this check looks codes up in, sorted.
    pub fn required_categories(&self) -> Vec<CodeCategory> {
        let walked = match self.reporting {
            Reporting::AllLevels => self.levels.len(),
            Reporting::Level(depth) => (depth + 1).min(self.levels.len()),
        };
        let mut categories: Vec<CodeCategory> = self.levels[..walked]
            .iter()
            .flat_map(LevelGrammar::registry_categories)
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Run the check.
    ///
    /// # Errors
    ///
    /// - [`StructureError::Registry`] if the registry lacks a category the
    ///   check needs.
    /// - [`StructureError::Listing`] if a directory cannot be read.
    pub fn run(&self, registry: &CodeRegistry) -> Result<CheckReport, StructureError> {
        let exists = self.root.try_exists().map_err(|source| StructureError::Listing {
            path: self.root.clone(),
            source,
        })?;
        if !exists {
            debug!(check = %self.name, root = %self.root.display(), "root absent, skipping");
            return Ok(CheckReport {
                check: self.name.clone(),
                root: self.root.clone(),
                status: CheckStatus::Skipped,
                violations: ViolationList::new(),
            });
        }

        registry.require(&self.required_categories())?;

        let validator = match self.reporting {
            Reporting::AllLevels => PathValidator::new(&self.levels, registry),
            Reporting::Level(depth) => PathValidator::new(&self.levels, registry).only_level(depth),
        };
        let violations = validator.validate(&self.root)?;

        let status = if violations.is_empty() {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        };
        info!(check = %self.name, %status, violations = violations.len(), "check complete");

        Ok(CheckReport {
            check: self.name.clone(),
            root: self.root.clone(),
            status,
            violations,
        })
    }
}

/// Result of running one [`ConformanceCheck`].
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: String,
    pub root: PathBuf,
    pub status: CheckStatus,
    pub violations: ViolationList,
}

impl CheckReport {
    /// True for passed and skipped checks.
    pub fn passed(&self) -> bool {
        self.status != CheckStatus::Failed
    }

    /// The newline-joined violation list, if the check failed.
    pub fn failure_message(&self) -> Option<String> {
        (self.status == CheckStatus::Failed).then(|| self.violations.to_string())
    }

    /// Turn a failed report into an error carrying its violations.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceFailure`] if the check failed.
    pub fn into_result(self) -> Result<(), ConformanceFailure> {
        match self.failure_message() {
            None => Ok(()),
            Some(message) => Err(ConformanceFailure {
                check: self.check,
                count: self.violations.len(),
                message,
            }),
        }
    }
}

/// Several checks over one shared registry.
#[derive(Debug, Clone)]
pub struct CheckSuite {
    registry: Arc<CodeRegistry>,
    checks: Vec<ConformanceCheck>,
}

impl CheckSuite {
    pub fn new(registry: Arc<CodeRegistry>) -> Self {
        Self {
            registry,
            checks: Vec::new(),
        }
    }

    pub fn add(&mut self, check: ConformanceCheck) {
        self.checks.push(check);
    }

    pub fn extend(&mut self, checks: impl IntoIterator<Item = ConformanceCheck>) {
        self.checks.extend(checks);
    }

    pub fn checks(&self) -> &[ConformanceCheck] {
        &self.checks
    }

    pub fn registry(&self) -> &Arc<CodeRegistry> {
        &self.registry
    }

    /// Run every check in order.
    ///
    /// # Errors
    ///
    /// Stops at the first check that cannot complete.
    pub fn run(&self) -> Result<Vec<CheckReport>, StructureError> {
        self.checks.iter().map(|check| check.run(&self.registry)).collect()
    }
}
