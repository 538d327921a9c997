//! # cdb-structure — Naming-Grammar Validation for CDB Trees
//!
//! Walks a CDB directory tree and checks every directory and file name
//! against the naming grammar of its level. Findings are accumulated as
//! [`cdb_core::Violation`]s; a check fails only after the whole subtree
//! has been examined.
//!
//! ## Layers
//!
//! - [`grammar`] — declarative [`LevelGrammar`] tables: layout, code
//!   source, named captures, selector/literal/ancestor rules.
//! - [`validator`] — the one recursive-descent engine that runs any
//!   grammar table, threading a [`ParentContext`] down the tree.
//! - [`check`] — [`ConformanceCheck`] binds a table to a root and turns a
//!   run into a [`CheckReport`]; [`CheckSuite`] shares one registry
//!   across many checks.
//! - [`hierarchy`] — the GTModel and MModel tables and the per-level and
//!   whole-subtree checks built from them.
//!
//! ## Crate Policy
//!
//! - Naming defects are data ([`cdb_core::ViolationList`]), never errors.
//! - [`StructureError`] is reserved for conditions that make a result
//!   untrustworthy: unreadable directories, unusable registries, broken
//!   grammar tables.
//! - A check whose root does not exist is skipped, not failed.

pub mod check;
pub mod context;
pub mod error;
pub mod grammar;
pub mod hierarchy;
pub mod validator;

pub use check::{CheckReport, CheckStatus, CheckSuite, ConformanceCheck, Reporting};
pub use context::{ContextEntry, ParentContext};
pub use error::{ConformanceFailure, StructureError};
pub use grammar::{
    AncestorCheck, AncestorField, CodeSource, CompositeField, LevelGrammar, LiteralField, NumericField, Scope,
    SelectorField,
};
pub use hierarchy::Hierarchy;
pub use validator::{check_name, PathValidator};
