//! # cdb-core — Foundational Types for CDB Structure Conformance
//!
//! This crate holds the lexical layer of the conformance engine. It knows
//! how a single directory or file name splits into tokens, where the code
//! and label live, and how a component selector must be zero-padded. It
//! knows nothing about registries or directory walking.
//!
//! ## Key Types
//!
//! - [`SegmentLayout`] describes the lexical shape of one hierarchy level.
//! - [`PathSegment`] is the immutable result of lexing one name against a
//!   layout, together with the [`SegmentIssue`]s found on the way.
//! - [`CodeValue`] is a parsed code: a number or a single letter.
//! - [`Violation`] / [`ViolationList`] are the nonconformance records the
//!   validator accumulates.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cdb-*` crates (this is the leaf of the DAG).
//! - No filesystem access.
//! - No `panic!()` or `.unwrap()` outside tests.

#![deny(missing_docs)]

pub mod layout;
pub mod padding;
pub mod segment;
pub mod violation;

pub use layout::{CodeField, CodeFormat, EntryKind, LabelRule, SegmentLayout, TokenRule, Width};
pub use padding::{check_selector, expected_leading_zeros, render_selector, SelectorIssue};
pub use segment::{CodeValue, PathSegment, SegmentIssue};
pub use violation::{Violation, ViolationList};
