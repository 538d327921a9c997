//! # cdb-cli — CDB Conformance Command-Line Interface
//!
//! Library half of the `cdbc` binary. Argument structs and handlers live
//! here so they can be driven from tests without spawning a process.
//!
//! ## Subcommands
//!
//! - `check` — run naming conformance checks over a CDB root
//! - `registry list` / `registry lookup` — inspect the loaded code tables
//!
//! ## Exit Codes
//!
//! - `0` — every check passed or was skipped
//! - `1` — at least one check found violations (or a lookup missed)
//! - `2` — a check could not run: bad config, unusable reference data,
//!   unreadable directory

pub mod check;
pub mod config;
pub mod registry;

/// Exit code for a clean run.
pub const EXIT_OK: u8 = 0;
/// Exit code when violations were found.
pub const EXIT_VIOLATIONS: u8 = 1;
/// Exit code when a check could not complete.
pub const EXIT_FATAL: u8 = 2;
