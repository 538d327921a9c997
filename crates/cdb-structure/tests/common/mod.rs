//! Shared helpers for building CDB trees in scratch directories.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cdb_registry::CodeRegistry;
use cdb_structure::{CheckReport, ConformanceCheck};

/// Find the workspace root.
pub fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // workspace root
    dir
}

/// The registry built from the bundled `reference/` directory.
pub fn registry() -> CodeRegistry {
    CodeRegistry::load_dir(repo_root().join("reference")).unwrap()
}

/// Create `rel` (and its parents) as directories under `root`.
pub fn mkdirs(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(&path).unwrap();
    path
}

/// Create an empty file at `rel` under `root`, parents included.
pub fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
    path
}

pub fn run(check: &ConformanceCheck) -> CheckReport {
    check.run(&registry()).unwrap()
}

pub fn messages(report: &CheckReport) -> Vec<String> {
    report.violations.iter().map(|v| v.message.clone()).collect()
}
