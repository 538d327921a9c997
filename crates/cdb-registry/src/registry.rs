//! # Code Registry
//!
//! Loads YAML reference documents into per-category code tables and
//! answers membership and resolution queries against them.
//!
//! ## Document Shape
//!
//! ```yaml
//! category: feature_type
//! entries:
//!   - { scope: AA, code: 10, name: Mine }
//!   - { scope: AL, code: 15, name: Building }
//! ```
//!
//! `scope` is optional and defaults to the empty (global) scope. Within
//! one category and scope a code may appear only once; several documents
//! may contribute to the same category, and the uniqueness rule spans
//! all of them.
//!
//! ## Loading
//!
//! [`CodeRegistry::load_dir`] reads every `*.yaml` / `*.yml` file in a
//! directory, in file-name order. Any unreadable file, malformed document
//! or duplicate code aborts the load with a [`LoadError`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use cdb_core::CodeValue;
use serde::{Deserialize, Serialize};

use crate::category::CodeCategory;
use crate::error::{LoadError, LookupError};
use crate::lookup::CodeSet;

/// One registered code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub category: CodeCategory,
    pub scope: String,
    pub code: i64,
    pub name: String,
}

/// A reference document as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDocument {
    pub category: CodeCategory,
    #[serde(default)]
    pub entries: Vec<DocumentEntry>,
}

/// One entry of a [`ReferenceDocument`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentEntry {
    #[serde(default)]
    pub scope: String,
    pub code: i64,
    pub name: String,
}

/// The codes of one category under one scope.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    by_code: BTreeMap<i64, String>,
    names: BTreeSet<String>,
}

impl CodeTable {
    pub fn contains_code(&self, code: i64) -> bool {
        self.by_code.contains_key(&code)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn name_for_code(&self, code: i64) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.by_code.iter().map(|(c, n)| (*c, n.as_str()))
    }
}

/// All loaded code tables, keyed by category and scope.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    tables: BTreeMap<(CodeCategory, String), CodeTable>,
}

impl CodeRegistry {
    /// An empty registry. Mostly useful for building one up in tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every reference document in `dir`.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Io`] if the directory or a document cannot be read.
    /// - [`LoadError::Parse`] if a document is malformed.
    /// - [`LoadError::DuplicateCode`] / [`LoadError::EmptyName`] for bad entries.
    /// - [`LoadError::Empty`] if the directory holds no documents.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let read = std::fs::read_dir(dir).map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in read {
            let entry = entry.map_err(|source| LoadError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "yaml" || e == "yml");
            if is_yaml && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(LoadError::Empty(dir.to_path_buf()));
        }

        let mut registry = Self::new();
        for path in &files {
            let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            registry.add_yaml(path, &content)?;
        }

        tracing::debug!(
            dir = %dir.display(),
            documents = files.len(),
            tables = registry.tables.len(),
            "loaded code registry"
        );
        Ok(registry)
    }

    /// Parse one YAML document and add its entries. `origin` only labels
    /// errors.
    pub fn add_yaml(&mut self, origin: impl AsRef<Path>, content: &str) -> Result<(), LoadError> {
        let document: ReferenceDocument =
            serde_yaml::from_str(content).map_err(|e| LoadError::Parse {
                path: origin.as_ref().to_path_buf(),
                reason: e.to_string(),
            })?;
        self.add_document(document)
    }

    /// Add every entry of a parsed document.
    pub fn add_document(&mut self, document: ReferenceDocument) -> Result<(), LoadError> {
        let category = document.category;
        // An empty document still registers its category.
        if document.entries.is_empty() {
            self.tables.entry((category, String::new())).or_default();
        }
        for entry in document.entries {
            self.insert(RegistryEntry {
                category,
                scope: entry.scope,
                code: entry.code,
                name: entry.name,
            })?;
        }
        Ok(())
    }

    /// Register one code.
    ///
    /// # Errors
    ///
    /// [`LoadError::DuplicateCode`] if the code is already registered in the
    /// same category and scope; [`LoadError::EmptyName`] for a blank name.
    pub fn insert(&mut self, entry: RegistryEntry) -> Result<(), LoadError> {
        if entry.name.trim().is_empty() {
            return Err(LoadError::EmptyName {
                category: entry.category,
                code: entry.code,
            });
        }
        let table = self
            .tables
            .entry((entry.category, entry.scope.clone()))
            .or_default();
        if table.by_code.contains_key(&entry.code) {
            return Err(LoadError::DuplicateCode {
                category: entry.category,
                scope: entry.scope,
                code: entry.code,
            });
        }
        table.names.insert(entry.name.clone());
        table.by_code.insert(entry.code, entry.name);
        Ok(())
    }

    /// Build a registry from entries, rejecting duplicates.
    pub fn from_entries(
        entries: impl IntoIterator<Item = RegistryEntry>,
    ) -> Result<Self, LoadError> {
        let mut registry = Self::new();
        for entry in entries {
            registry.insert(entry)?;
        }
        Ok(registry)
    }

    /// Fail unless every listed category has at least one table.
    pub fn require(&self, categories: &[CodeCategory]) -> Result<(), LoadError> {
        for category in categories {
            if !self.has_category(*category) {
                return Err(LoadError::MissingCategory(*category));
            }
        }
        Ok(())
    }

    pub fn has_category(&self, category: CodeCategory) -> bool {
        self.tables.keys().any(|(c, _)| *c == category)
    }

    /// True iff `code` is registered in the global scope of `category`.
    pub fn is_valid_code(&self, category: CodeCategory, code: i64) -> bool {
        self.table(category, "")
            .is_some_and(|t| t.contains_code(code))
    }

    /// True iff `name` is registered in the global scope of `category`.
    pub fn is_valid_name(&self, category: CodeCategory, name: &str) -> bool {
        self.table(category, "")
            .is_some_and(|t| t.contains_name(name))
    }

    /// Canonical name of a code in the global scope of `category`.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotFound`] if the code is not registered.
    pub fn name_for_code(&self, category: CodeCategory, code: i64) -> Result<&str, LookupError> {
        self.view(category, "").lookup(code)
    }

    /// The table for one category and scope, if any entries were loaded.
    pub fn table(&self, category: CodeCategory, scope: &str) -> Option<&CodeTable> {
        self.tables.get(&(category, scope.to_string()))
    }

    /// A [`CodeSet`] over one category and scope.
    pub fn view(&self, category: CodeCategory, scope: impl Into<String>) -> RegistryView<'_> {
        RegistryView {
            registry: self,
            category,
            scope: scope.into(),
        }
    }

    /// Every registered entry, ordered by category, scope, then code.
    pub fn entries(&self) -> Vec<RegistryEntry> {
        self.tables
            .iter()
            .flat_map(|((category, scope), table)| {
                table.iter().map(move |(code, name)| RegistryEntry {
                    category: *category,
                    scope: scope.clone(),
                    code,
                    name: name.to_string(),
                })
            })
            .collect()
    }

    /// Total number of registered codes.
    pub fn len(&self) -> usize {
        self.tables.values().map(CodeTable::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One category and scope of a [`CodeRegistry`], seen as a [`CodeSet`].
#[derive(Debug, Clone)]
pub struct RegistryView<'a> {
    registry: &'a CodeRegistry,
    category: CodeCategory,
    scope: String,
}

impl<'a> RegistryView<'a> {
    fn table(&self) -> Option<&'a CodeTable> {
        self.registry.table(self.category, &self.scope)
    }

    fn lookup(&self, code: i64) -> Result<&'a str, LookupError> {
        self.table()
            .and_then(|t| t.name_for_code(code))
            .ok_or_else(|| LookupError::NotFound {
                table: self.category.to_string(),
                scope: self.scope.clone(),
                code: code.to_string(),
            })
    }
}

impl CodeSet for RegistryView<'_> {
    fn describe(&self) -> String {
        if self.scope.is_empty() {
            self.category.to_string()
        } else {
            format!("{} (scope {})", self.category, self.scope)
        }
    }

    fn contains_code(&self, code: CodeValue) -> bool {
        match code.as_number() {
            Some(n) => self.table().is_some_and(|t| t.contains_code(n)),
            None => false,
        }
    }

    fn contains_name(&self, name: &str) -> bool {
        self.table().is_some_and(|t| t.contains_name(name))
    }

    fn name_for_code(&self, code: CodeValue) -> Result<&str, LookupError> {
        match code.as_number() {
            Some(n) => self.lookup(n),
            None => Err(LookupError::NotFound {
                table: self.category.to_string(),
                scope: self.scope.clone(),
                code: code.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: &str = r#"
category: kind
entries:
  - { code: 0, name: Other }
  - { code: 1, name: Platform }
  - { code: 3, name: Life_form }
"#;

    const FEATURES: &str = r#"
category: feature_type
entries:
  - { scope: AA, code: 10, name: Mine }
  - { scope: AL, code: 15, name: Building }
  - { scope: AL, code: 10, name: Facility }
"#;

    fn registry() -> CodeRegistry {
        let mut r = CodeRegistry::new();
        r.add_yaml("kind.yaml", KINDS).unwrap();
        r.add_yaml("feature_type.yaml", FEATURES).unwrap();
        r
    }

    #[test]
    fn global_contract() {
        let r = registry();
        assert!(r.is_valid_code(CodeCategory::Kind, 1));
        assert!(!r.is_valid_code(CodeCategory::Kind, 2));
        assert!(r.is_valid_name(CodeCategory::Kind, "Platform"));
        assert!(!r.is_valid_name(CodeCategory::Kind, "Vehicle"));
        assert_eq!(r.name_for_code(CodeCategory::Kind, 3), Ok("Life_form"));
    }

    #[test]
    fn name_for_unregistered_code_is_not_found() {
        let r = registry();
        let err = r.name_for_code(CodeCategory::Kind, 42).unwrap_err();
        assert!(matches!(err, LookupError::NotFound { ref code, .. } if code == "42"));
    }

    #[test]
    fn unloaded_category_has_no_members() {
        let r = registry();
        assert!(!r.is_valid_code(CodeCategory::Country, 225));
        assert!(!r.has_category(CodeCategory::Country));
        assert!(matches!(
            r.require(&[CodeCategory::Kind, CodeCategory::Country]),
            Err(LoadError::MissingCategory(CodeCategory::Country))
        ));
        assert!(r.require(&[CodeCategory::Kind]).is_ok());
    }

    #[test]
    fn scoped_views() {
        let r = registry();
        let aa = r.view(CodeCategory::FeatureType, "AA");
        assert!(aa.contains_code(CodeValue::Number(10)));
        assert!(!aa.contains_code(CodeValue::Number(15)));
        assert_eq!(aa.name_for_code(CodeValue::Number(10)), Ok("Mine"));

        let al = r.view(CodeCategory::FeatureType, "AL");
        assert_eq!(al.name_for_code(CodeValue::Number(10)), Ok("Facility"));
        assert!(!al.contains_name("Mine"));

        // Scoped tables are invisible to the global contract.
        assert!(!r.is_valid_code(CodeCategory::FeatureType, 10));
    }

    #[test]
    fn letter_codes_are_never_registry_members() {
        let r = registry();
        let kinds = r.view(CodeCategory::Kind, "");
        assert!(!kinds.contains_code(CodeValue::Letter('A')));
        assert!(kinds.name_for_code(CodeValue::Letter('A')).is_err());
    }

    #[test]
    fn duplicate_code_across_documents_is_rejected() {
        let mut r = registry();
        let err = r
            .add_yaml("more.yaml", "category: kind\nentries:\n  - { code: 1, name: Again }\n")
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::DuplicateCode { category: CodeCategory::Kind, code: 1, .. }
        ));
    }

    #[test]
    fn same_code_in_different_scopes_is_allowed() {
        let r = registry();
        assert_eq!(r.table(CodeCategory::FeatureType, "AA").map(CodeTable::len), Some(1));
        assert_eq!(r.table(CodeCategory::FeatureType, "AL").map(CodeTable::len), Some(2));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = CodeRegistry::from_entries([RegistryEntry {
            category: CodeCategory::Domain,
            scope: String::new(),
            code: 1,
            name: "  ".to_string(),
        }])
        .unwrap_err();
        assert!(matches!(err, LoadError::EmptyName { code: 1, .. }));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let mut r = CodeRegistry::new();
        assert!(matches!(
            r.add_yaml("bad.yaml", "category: texture\nentries: []\n"),
            Err(LoadError::Parse { .. })
        ));
        assert!(matches!(
            r.add_yaml("bad.yaml", "category: kind\nentries:\n  - { code: one, name: X }\n"),
            Err(LoadError::Parse { .. })
        ));
        assert!(matches!(
            r.add_yaml("bad.yaml", "category: kind\nrows: []\n"),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn entries_are_ordered() {
        let r = registry();
        let entries = r.entries();
        assert_eq!(entries.len(), r.len());
        assert_eq!(entries[0].category, CodeCategory::Kind);
        assert_eq!(entries[0].code, 0);
        let last = entries.last().unwrap();
        assert_eq!(last.category, CodeCategory::FeatureType);
        assert_eq!(last.scope, "AL");
        assert_eq!(last.code, 15);
    }
}
