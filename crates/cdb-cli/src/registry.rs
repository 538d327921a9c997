//! # Registry Subcommand
//!
//! Inspect the code tables a check would run against.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use cdb_registry::{CodeCategory, CodeRegistry, RegistryEntry};

use crate::config::ValidatorConfig;
use crate::{EXIT_OK, EXIT_VIOLATIONS};

/// Arguments for the registry subcommand.
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Directory of YAML reference documents.
    #[arg(long, global = true)]
    pub reference_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: RegistryCommand,
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Print every loaded code as `category scope code name`.
    List {
        /// Only this category.
        #[arg(long)]
        category: Option<CodeCategory>,

        /// Print the entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve one code to its registered name.
    Lookup {
        category: CodeCategory,

        #[arg(allow_negative_numbers = true)]
        code: i64,

        /// Scope key for scoped tables (`AA` for feature types under A_Culture/A_Extraction).
        #[arg(long, default_value = "")]
        scope: String,
    },
}

/// Execute the registry subcommand.
///
/// # Errors
///
/// Returns an error if the reference data cannot be loaded.
pub fn run_registry(args: &RegistryArgs, config: &ValidatorConfig) -> Result<u8> {
    let reference_dir = args
        .reference_dir
        .clone()
        .unwrap_or_else(|| config.reference_dir.clone());
    let registry = load(&reference_dir)?;

    match &args.command {
        RegistryCommand::List { category, json } => {
            let entries: Vec<RegistryEntry> = registry
                .entries()
                .into_iter()
                .filter(|e| category.map_or(true, |c| e.category == c))
                .collect();
            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render_entries(&entries));
            }
            Ok(EXIT_OK)
        }
        RegistryCommand::Lookup {
            category,
            code,
            scope,
        } => match registry.table(*category, scope) {
            Some(table) => match table.name_for_code(*code) {
                Some(name) => {
                    println!("{name}");
                    Ok(EXIT_OK)
                }
                None => {
                    println!("{category} code {code} is not registered{}", scope_note(scope));
                    Ok(EXIT_VIOLATIONS)
                }
            },
            None => {
                println!("no {category} table{}", scope_note(scope));
                Ok(EXIT_VIOLATIONS)
            }
        },
    }
}

fn load(reference_dir: &Path) -> Result<CodeRegistry> {
    CodeRegistry::load_dir(reference_dir)
        .with_context(|| format!("failed to load code registry from {}", reference_dir.display()))
}

fn scope_note(scope: &str) -> String {
    if scope.is_empty() {
        String::new()
    } else {
        format!(" under scope {scope}")
    }
}

/// Tab-separated listing, one entry per line. The scope column is `-`
/// for unscoped tables.
pub fn render_entries(entries: &[RegistryEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let scope = if e.scope.is_empty() { "-" } else { e.scope.as_str() };
            format!("{}\t{scope}\t{}\t{}\n", e.category, e.code, e.name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_entries_marks_unscoped() {
        let entries = vec![
            RegistryEntry {
                category: CodeCategory::Kind,
                scope: String::new(),
                code: 1,
                name: "Platform".to_string(),
            },
            RegistryEntry {
                category: CodeCategory::FeatureType,
                scope: "AA".to_string(),
                code: 10,
                name: "Mine".to_string(),
            },
        ];
        assert_eq!(
            render_entries(&entries),
            "kind\t-\t1\tPlatform\nfeature_type\tAA\t10\tMine\n"
        );
    }

    #[test]
    fn scope_note_only_when_scoped() {
        assert_eq!(scope_note(""), "");
        assert_eq!(scope_note("AA"), " under scope AA");
    }
}
