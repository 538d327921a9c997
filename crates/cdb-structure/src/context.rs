//! # Parent Context
//!
//! What the validator remembers about the directories above the entry it
//! is looking at: one [`ContextEntry`] per ancestor, root-most first.
//! Scoped code sets and ancestor-consistency checks read from here.

use std::collections::BTreeMap;

/// What one ancestor directory contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextEntry {
    /// The directory name as found on disk.
    pub name: String,
    /// The ancestor's code text, prefix removed. `None` when the name was
    /// malformed and no code could be located.
    pub code_literal: Option<String>,
    /// Named captures of a composite name.
    pub fields: BTreeMap<String, String>,
}

/// The chain of ancestors from the check root down to the current entry.
#[derive(Debug, Clone, Default)]
pub struct ParentContext {
    entries: Vec<ContextEntry>,
}

impl ParentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ContextEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<ContextEntry> {
        self.entries.pop()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, depth: usize) -> Option<&ContextEntry> {
        self.entries.get(depth)
    }

    /// The code literal of the ancestor at `depth`.
    pub fn code_at(&self, depth: usize) -> Option<&str> {
        self.get(depth)?.code_literal.as_deref()
    }

    /// A named field of the ancestor at `depth`.
    pub fn field_at(&self, depth: usize, field: &str) -> Option<&str> {
        self.get(depth)?.fields.get(field).map(String::as_str)
    }

    /// Concatenate the code literals at `depths` into a scope key.
    ///
    /// Returns `None` if any of those ancestors has no usable code.
    pub fn scope_key(&self, depths: &[usize]) -> Option<String> {
        depths.iter().map(|d| self.code_at(*d)).collect()
    }
}
