//! # cdb-registry — Code Registries
//!
//! Answers three questions for a code category: is this code registered,
//! is this name registered, and what name does this code resolve to.
//!
//! ## Sources
//!
//! - [`CodeRegistry`] — loaded once from YAML reference documents, one
//!   document per [`CodeCategory`]. Tables may be scoped by a parent code
//!   (feature types are registered per FACC category/subcategory pair).
//! - [`FixedEnumeration`] — closed, compiled-in tables for codes the
//!   standard fixes outright (dataset codes, FACC category letters).
//!
//! Both expose the same [`CodeSet`] view, so the structure validator runs
//! one check sequence regardless of where a level's codes come from.
//!
//! ## Crate Policy
//!
//! - Read-only after construction. A loaded registry can be shared behind
//!   an `Arc` across any number of checks without locking.
//! - Bad or absent reference data is a [`LoadError`], never a partial
//!   registry.

pub mod category;
pub mod error;
pub mod fixed;
pub mod lookup;
pub mod registry;

pub use category::CodeCategory;
pub use error::{LoadError, LookupError};
pub use fixed::{FixedEntry, FixedEnumeration, FixedView};
pub use lookup::CodeSet;
pub use registry::{CodeRegistry, CodeTable, ReferenceDocument, RegistryEntry, RegistryView};
