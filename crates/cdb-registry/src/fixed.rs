//! # Fixed Enumerations
//!
//! Compiled-in code tables for codes the standard fixes outright and that
//! never come from reference files: dataset codes, FACC category letters
//! and FACC subcategory letters. An entry may carry a scope (the parent
//! code it is valid under); the empty scope means "everywhere".

use cdb_core::CodeValue;

use crate::error::LookupError;
use crate::lookup::CodeSet;

/// One member of a fixed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntry {
    pub scope: &'static str,
    pub code: CodeValue,
    pub label: &'static str,
}

impl FixedEntry {
    /// An unscoped numeric member.
    pub const fn number(code: i64, label: &'static str) -> Self {
        Self {
            scope: "",
            code: CodeValue::Number(code),
            label,
        }
    }

    /// An unscoped letter member.
    pub const fn letter(code: char, label: &'static str) -> Self {
        Self {
            scope: "",
            code: CodeValue::Letter(code),
            label,
        }
    }

    /// A letter member valid only under `scope`.
    pub const fn scoped_letter(scope: &'static str, code: char, label: &'static str) -> Self {
        Self {
            scope,
            code: CodeValue::Letter(code),
            label,
        }
    }
}

/// A named, closed code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEnumeration {
    name: &'static str,
    entries: &'static [FixedEntry],
}

impl FixedEnumeration {
    pub const fn new(name: &'static str, entries: &'static [FixedEntry]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &'static [FixedEntry] {
        self.entries
    }

    /// View the members valid under `scope`.
    pub fn scoped(&self, scope: impl Into<String>) -> FixedView {
        FixedView {
            enumeration: *self,
            scope: scope.into(),
        }
    }
}

/// The members of a [`FixedEnumeration`] under one scope.
#[derive(Debug, Clone)]
pub struct FixedView {
    enumeration: FixedEnumeration,
    scope: String,
}

impl FixedView {
    fn members(&self) -> impl Iterator<Item = &'static FixedEntry> + '_ {
        self.enumeration
            .entries
            .iter()
            .filter(move |e| e.scope == self.scope)
    }
}

impl CodeSet for FixedView {
    fn describe(&self) -> String {
        if self.scope.is_empty() {
            self.enumeration.name.to_string()
        } else {
            format!("{} (scope {})", self.enumeration.name, self.scope)
        }
    }

    fn contains_code(&self, code: CodeValue) -> bool {
        self.members().any(|e| e.code == code)
    }

    fn contains_name(&self, name: &str) -> bool {
        self.members().any(|e| e.label == name)
    }

    fn name_for_code(&self, code: CodeValue) -> Result<&str, LookupError> {
        self.members()
            .find(|e| e.code == code)
            .map(|e| e.label)
            .ok_or_else(|| LookupError::NotFound {
                table: self.enumeration.name.to_string(),
                scope: self.scope.clone(),
                code: code.to_string(),
            })
    }
}
