//! # Check Subcommand
//!
//! `cdbc check <CDB_ROOT>` runs the dataset and geometry checks of every
//! enabled hierarchy, or a single level with `--level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{debug, info};

use cdb_registry::CodeRegistry;
use cdb_structure::{CheckReport, CheckStatus, CheckSuite, Hierarchy, StructureError};

use crate::config::ValidatorConfig;
use crate::{EXIT_OK, EXIT_VIOLATIONS};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Root directory of the CDB dataset.
    pub cdb_root: PathBuf,

    /// Directory of YAML reference documents.
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,

    /// Hierarchy to check (repeatable). Defaults to the configured set.
    #[arg(long = "hierarchy")]
    pub hierarchies: Vec<Hierarchy>,

    /// Run one level only (`dataset`, `category`, `lod`, `geometry`, ...).
    #[arg(long)]
    pub level: Option<String>,

    /// Print the reports as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the check subcommand.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded, a level name is
/// unknown, or a check cannot complete. Violations are not errors; they
/// are reported and turned into exit code 1.
pub fn run_check(args: &CheckArgs, config: &ValidatorConfig) -> Result<u8> {
    let reference_dir = args
        .reference_dir
        .clone()
        .unwrap_or_else(|| config.reference_dir.clone());
    let registry = CodeRegistry::load_dir(&reference_dir).with_context(|| {
        format!("failed to load code registry from {}", reference_dir.display())
    })?;
    info!(codes = registry.len(), reference_dir = %reference_dir.display(), "loaded code registry");

    let hierarchies = if args.hierarchies.is_empty() {
        config.hierarchies.clone()
    } else {
        args.hierarchies.clone()
    };

    let mut suite = CheckSuite::new(Arc::new(registry));
    for hierarchy in &hierarchies {
        match &args.level {
            None => suite.extend(hierarchy.checks(&args.cdb_root)?),
            Some(level) => match hierarchy.level_check(&args.cdb_root, level) {
                Ok(check) => suite.add(check),
                Err(StructureError::UnknownLevel { .. }) if hierarchies.len() > 1 => {
                    debug!(%hierarchy, level = %level, "hierarchy has no such level");
                }
                Err(e) => return Err(e.into()),
            },
        }
    }
    if suite.checks().is_empty() {
        if let Some(level) = &args.level {
            bail!("no selected hierarchy has a level named '{level}'");
        }
    }

    let reports = suite.run().context("conformance check could not complete")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", render_text(&reports));
    }

    if reports.iter().all(CheckReport::passed) {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_VIOLATIONS)
    }
}

/// Human-readable report: one status line per check, violations indented.
pub fn render_text(reports: &[CheckReport]) -> String {
    let mut out = String::new();
    let mut counts = [0usize; 3];

    for report in reports {
        out.push_str(&format!("{} {} ({})", report.status, report.check, report.root.display()));
        match report.status {
            CheckStatus::Passed => {
                counts[0] += 1;
                out.push('\n');
            }
            CheckStatus::Skipped => {
                counts[1] += 1;
                out.push_str(": not present\n");
            }
            CheckStatus::Failed => {
                counts[2] += 1;
                out.push_str(&format!(": {} violation(s)\n", report.violations.len()));
                for violation in &report.violations {
                    out.push_str(&format!("  {violation}\n"));
                }
            }
        }
    }

    out.push_str(&format!(
        "{} check(s): {} passed, {} skipped, {} failed\n",
        reports.len(),
        counts[0],
        counts[1],
        counts[2]
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdb_core::ViolationList;

    fn report(check: &str, status: CheckStatus, violations: ViolationList) -> CheckReport {
        CheckReport {
            check: check.to_string(),
            root: PathBuf::from("/cdb/GTModel"),
            status,
            violations,
        }
    }

    #[test]
    fn render_text_lists_every_check() {
        let mut violations = ViolationList::new();
        violations.push("Invalid GTModel dataset code 999", "/cdb/GTModel/999_GTModelGeometry");

        let text = render_text(&[
            report("gtmodel/dataset", CheckStatus::Failed, violations),
            report("mmodel/dataset", CheckStatus::Skipped, ViolationList::new()),
            report("gtmodel/geometry", CheckStatus::Passed, ViolationList::new()),
        ]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "FAIL gtmodel/dataset (/cdb/GTModel): 1 violation(s)",
                "  Invalid GTModel dataset code 999: /cdb/GTModel/999_GTModelGeometry",
                "SKIP mmodel/dataset (/cdb/GTModel): not present",
                "PASS gtmodel/geometry (/cdb/GTModel)",
                "3 check(s): 1 passed, 1 skipped, 1 failed",
            ]
        );
    }

    #[test]
    fn render_text_of_nothing() {
        assert_eq!(render_text(&[]), "0 check(s): 0 passed, 0 skipped, 0 failed\n");
    }
}
