//! # Path Validator
//!
//! Recursive descent over a directory tree, one [`LevelGrammar`] per
//! depth. Every entry at depth `d` is checked against `levels[d]`; every
//! directory is then descended into with its own code recorded in the
//! [`ParentContext`] so that deeper levels can be scoped by it and
//! compared against it.
//!
//! ## Check Order Per Entry
//!
//! 1. Entry kind (file vs directory). A mismatch is one violation and the
//!    entry is not examined further.
//! 2. File extension.
//! 3. Lexical issues from [`PathSegment::lex`]. A wrong token count stops
//!    the checks for this entry.
//! 4. Pattern match and field capture for composite names.
//! 5. Code membership: negative, code registered, label registered, and
//!    code/label agreement. All four are evaluated independently.
//! 6. Composite fields, fixed-width numbers, selector padding, literals,
//!    ancestors.
//!
//! Nothing short-circuits across entries: a bad directory is reported and
//! its subtree is still walked. Only an I/O failure while listing a
//! directory aborts the run.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use cdb_core::{check_selector, CodeValue, EntryKind, PathSegment, SegmentIssue, SelectorIssue, ViolationList};
use cdb_registry::{CodeRegistry, CodeSet};
use tracing::{debug, trace};

use crate::context::{ContextEntry, ParentContext};
use crate::error::StructureError;
use crate::grammar::{AncestorField, CodeSource, LevelGrammar, Scope};

/// Walks a tree and accumulates violations.
#[derive(Debug, Clone, Copy)]
pub struct PathValidator<'a> {
    levels: &'a [LevelGrammar],
    registry: &'a CodeRegistry,
    walk: usize,
    report: Option<usize>,
}

impl<'a> PathValidator<'a> {
    /// Validate every level of `levels` and report all of them.
    pub fn new(levels: &'a [LevelGrammar], registry: &'a CodeRegistry) -> Self {
        Self {
            levels,
            registry,
            walk: levels.len(),
            report: None,
        }
    }

    /// Walk down to `depth` and report violations found at that depth only.
    ///
    /// The levels above are still parsed to build context for scoping and
    /// ancestor checks, but their own defects belong to their own check.
    pub fn only_level(mut self, depth: usize) -> Self {
        self.walk = (depth + 1).min(self.levels.len());
        self.report = Some(depth);
        self
    }

    /// Validate the tree below `root`.
    ///
    /// `root` itself is not checked; its children are level 0.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Listing`] if any directory cannot be read.
    pub fn validate(&self, root: &Path) -> Result<ViolationList, StructureError> {
        let mut violations = ViolationList::new();
        let mut context = ParentContext::new();
        self.descend(root, 0, &mut context, &mut violations)?;
        Ok(violations)
    }

    fn reports(&self, depth: usize) -> bool {
        self.report.map_or(true, |d| d == depth)
    }

    fn descend(
        &self,
        dir: &Path,
        depth: usize,
        context: &mut ParentContext,
        out: &mut ViolationList,
    ) -> Result<(), StructureError> {
        if depth >= self.walk {
            return Ok(());
        }
        let Some(grammar) = self.levels.get(depth) else {
            return Ok(());
        };

        let entries = list_sorted(dir)?;
        debug!(dir = %dir.display(), level = grammar.key(), entries = entries.len(), "checking level");

        for entry in entries {
            let shown = entry.path.display().to_string();
            let mut found = ViolationList::new();

            let Some(name) = entry.name.to_str() else {
                found.push(format!("{} name is not valid UTF-8", grammar.name()), shown);
                if self.reports(depth) {
                    out.extend(found);
                }
                continue;
            };

            let actual = if entry.is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            if actual != grammar.entry() {
                found.push(
                    format!("Expected a {} for {}, found a {actual}", grammar.entry(), grammar.name()),
                    shown,
                );
                if self.reports(depth) {
                    out.extend(found);
                }
                continue;
            }

            let recorded = check_name(grammar, name, &shown, context, self.registry, &mut found);
            trace!(
                path = %entry.path.display(),
                level = grammar.key(),
                violations = found.len(),
                "parsed segment"
            );
            if self.reports(depth) {
                out.extend(found);
            }

            if entry.is_dir {
                context.push(recorded);
                let result = self.descend(&entry.path, depth + 1, context, out);
                context.pop();
                result?;
            }
        }
        Ok(())
    }
}

struct Listed {
    path: PathBuf,
    name: OsString,
    is_dir: bool,
}

fn list_sorted(dir: &Path) -> Result<Vec<Listed>, StructureError> {
    let listing = |source: std::io::Error| StructureError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing)? {
        let entry = entry.map_err(listing)?;
        let path = entry.path();
        let stat = |source: std::io::Error| StructureError::Listing {
            path: path.clone(),
            source,
        };
        let mut file_type = entry.file_type().map_err(stat)?;
        if file_type.is_symlink() {
            file_type = fs::metadata(&path).map_err(stat)?.file_type();
        }
        entries.push(Listed {
            is_dir: file_type.is_dir(),
            name: entry.file_name(),
            path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Check one entry name against `grammar`, appending violations to `out`.
///
/// `path` is what violations will carry. Returns what the entry
/// contributes to the context of its children.
pub fn check_name(
    grammar: &LevelGrammar,
    name: &str,
    path: &str,
    context: &ParentContext,
    registry: &CodeRegistry,
    out: &mut ViolationList,
) -> ContextEntry {
    let segment = PathSegment::lex(name, grammar.layout());
    let mut recorded = ContextEntry {
        name: name.to_string(),
        code_literal: None,
        fields: BTreeMap::new(),
    };

    if grammar.entry() == EntryKind::File && !grammar.extensions().is_empty() {
        match segment.extension() {
            None => out.push(format!("Missing {} file extension", grammar.name()), path),
            Some(ext) if !grammar.extensions().contains(&ext) => out.push(
                format!("Invalid {} file extension '.{ext}'", grammar.name()),
                path,
            ),
            Some(_) => {}
        }
    }

    for issue in segment.issues() {
        out.push(issue_message(grammar, issue), path);
    }
    if !segment.is_well_formed() {
        return recorded;
    }
    recorded.code_literal = segment.code_literal().map(str::to_string);

    if let Some(pattern) = grammar.pattern() {
        let Some(captures) = pattern.captures(segment.stem()) else {
            out.push(format!("Invalid {} {} name", grammar.name(), grammar.entry()), path);
            return recorded;
        };
        for capture in pattern.capture_names().flatten() {
            if let Some(value) = captures.name(capture) {
                recorded.fields.insert(capture.to_string(), value.as_str().to_string());
            }
        }
    }

    if let (Some(source), Some(code)) = (grammar.source(), segment.code()) {
        if let Some(set) = resolve(source, registry, context) {
            check_membership(set.as_ref(), grammar.name(), code, segment.label(), path, out);
        }
    }

    check_fields(grammar, &recorded.fields, path, context, registry, out);
    recorded
}

/// The four membership checks, evaluated independently.
///
/// The code/label agreement check needs a registered code and a label.
fn check_membership(
    set: &dyn CodeSet,
    noun: &str,
    code: CodeValue,
    label: Option<&str>,
    path: &str,
    out: &mut ViolationList,
) {
    if code.is_negative() {
        out.push(format!("Invalid {noun} code {code}, cannot be below 0"), path);
    }
    let registered = set.contains_code(code);
    if !registered {
        out.push(format!("Invalid {noun} code {code}"), path);
    }
    let Some(label) = label else {
        return;
    };
    if !set.contains_name(label) {
        out.push(format!("Invalid {noun} name '{label}'"), path);
    }
    if registered {
        if let Ok(canonical) = set.name_for_code(code) {
            if canonical != label {
                out.push(
                    format!("Invalid {noun} code/name combination: {code} is {canonical}, not {label}"),
                    path,
                );
            }
        }
    }
}

fn check_fields(
    grammar: &LevelGrammar,
    fields: &BTreeMap<String, String>,
    path: &str,
    context: &ParentContext,
    registry: &CodeRegistry,
    out: &mut ViolationList,
) {
    for field in grammar.composites() {
        let Some(literal) = fields.get(field.capture) else {
            continue;
        };
        let Ok(value) = literal.parse::<i64>() else {
            out.push(format!("Invalid number format for {}: '{literal}'", field.noun), path);
            continue;
        };
        let code = CodeValue::Number(value);
        if code.is_negative() {
            out.push(format!("Invalid {} code {code}, cannot be below 0", field.noun), path);
        }
        if let Some(set) = resolve(&field.source, registry, context) {
            if !set.contains_code(code) {
                out.push(format!("Invalid {} code {code}", field.noun), path);
            }
        }
    }

    for numeric in grammar.numerics() {
        let Some(literal) = fields.get(numeric.capture) else {
            continue;
        };
        if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
            out.push(format!("Invalid number format for {}: '{literal}'", numeric.noun), path);
        } else if literal.len() != numeric.width {
            out.push(
                format!(
                    "Invalid {} width: expected {} digits, found {}",
                    numeric.noun,
                    numeric.width,
                    literal.len()
                ),
                path,
            );
        }
    }

    for selector in grammar.selectors() {
        let Some(literal) = fields.get(selector.capture) else {
            continue;
        };
        if let Err(issue) = check_selector(literal) {
            out.push(selector_message(selector.noun, literal, &issue), path);
        }
    }

    for literal in grammar.literals() {
        let Some(found) = fields.get(literal.capture) else {
            continue;
        };
        if found != literal.expected {
            out.push(
                format!("{} does not match: expected {}, found {found}", literal.noun, literal.expected),
                path,
            );
        }
    }

    for check in grammar.ancestors() {
        let Some(found) = fields.get(check.capture) else {
            continue;
        };
        let expected = match &check.field {
            AncestorField::Code => context.code_at(check.depth),
            AncestorField::Named(name) => context.field_at(check.depth, name),
        };
        if let Some(expected) = expected {
            if found != expected {
                out.push(
                    format!("{} does not match parent directory: expected {expected}, found {found}", check.noun),
                    path,
                );
            }
        }
    }
}

/// Build the code set a source refers to under the current context.
///
/// `None` when a scoping ancestor has no usable code; that ancestor has
/// already been reported.
fn resolve<'r>(
    source: &CodeSource,
    registry: &'r CodeRegistry,
    context: &ParentContext,
) -> Option<Box<dyn CodeSet + 'r>> {
    let scope = match source.scope() {
        Scope::Global => String::new(),
        Scope::Ancestors(depths) => context.scope_key(depths)?,
    };
    let set: Box<dyn CodeSet + 'r> = match source {
        CodeSource::Registry { category, .. } => Box::new(registry.view(*category, scope)),
        CodeSource::Fixed { enumeration, .. } => Box::new(enumeration.scoped(scope)),
    };
    Some(set)
}

fn issue_message(grammar: &LevelGrammar, issue: &SegmentIssue) -> String {
    let noun = grammar.name();
    match issue {
        SegmentIssue::TokenCount { rule, found } => format!(
            "Wrong number of '{}' separated parts in {noun} name: expected {rule}, found {found}",
            grammar.layout().delimiter
        ),
        SegmentIssue::MissingCode => format!("Missing {noun} code"),
        SegmentIssue::MissingPrefix { prefix } => format!("Missing '{prefix}' prefix on {noun} code"),
        SegmentIssue::InvalidNumber { literal } => {
            format!("Invalid number format for {noun} code: '{literal}'")
        }
        SegmentIssue::WrongWidth { expected, found } => {
            format!("Invalid {noun} code width: expected {expected} digits, found {found}")
        }
        SegmentIssue::InvalidLetter { literal } => {
            format!("Invalid {noun} code '{literal}': expected one upper-case letter")
        }
        SegmentIssue::MissingLabel => format!("Missing {noun} name"),
    }
}

fn selector_message(noun: &str, literal: &str, issue: &SelectorIssue) -> String {
    match issue {
        SelectorIssue::WrongLength { found } => {
            format!("Invalid {noun} '{literal}': expected 3 digits, found {found}")
        }
        SelectorIssue::InvalidNumber => format!("Invalid number format for {noun}: '{literal}'"),
        SelectorIssue::Padding { expected, found } => format!(
            "Incorrect zero padding for {noun} '{literal}': expected {expected} leading zeros, found {found}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdb_core::{CodeField, SegmentLayout, Width};
    use cdb_registry::{CodeCategory, FixedEntry, FixedEnumeration, RegistryEntry};

    const CATEGORIES: FixedEnumeration = FixedEnumeration::new(
        "FACC category",
        &[
            FixedEntry::letter('A', "Culture"),
            FixedEntry::letter('B', "Hydrography"),
        ],
    );

    fn kinds() -> CodeRegistry {
        CodeRegistry::from_entries([
            RegistryEntry {
                category: CodeCategory::Kind,
                scope: String::new(),
                code: 1,
                name: "Platform".to_string(),
            },
            RegistryEntry {
                category: CodeCategory::Kind,
                scope: String::new(),
                code: 2,
                name: "Munition".to_string(),
            },
        ])
        .unwrap()
    }

    fn kind_grammar() -> LevelGrammar {
        LevelGrammar::new(
            "kind",
            "DIS Entity Kind",
            SegmentLayout::coded_directory(CodeField::numeric(Width::Any)),
        )
        .with_source(CodeSource::registry(CodeCategory::Kind))
    }

    fn check(grammar: &LevelGrammar, name: &str) -> Vec<String> {
        let registry = kinds();
        let mut out = ViolationList::new();
        check_name(grammar, name, name, &ParentContext::new(), &registry, &mut out);
        out.iter().map(|v| v.message.clone()).collect()
    }

    #[test]
    fn conforming_name_is_clean() {
        assert!(check(&kind_grammar(), "1_Platform").is_empty());
    }

    #[test]
    fn membership_checks_are_independent() {
        // Valid code, valid name, but they belong to different entries.
        let messages = check(&kind_grammar(), "1_Munition");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("code/name combination"));

        // Negative and unregistered: both reported, plus the bad name.
        let messages = check(&kind_grammar(), "-1_Bogus");
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("cannot be below 0"));
        assert!(messages[1].starts_with("Invalid DIS Entity Kind code -1"));
        assert!(messages[2].contains("name 'Bogus'"));
    }

    #[test]
    fn unparseable_code_still_checks_nothing_else() {
        let messages = check(&kind_grammar(), "x_Platform");
        assert_eq!(messages, vec!["Invalid number format for DIS Entity Kind code: 'x'"]);
    }

    #[test]
    fn fixed_enumeration_source() {
        let grammar = LevelGrammar::new(
            "category",
            "CDB Category",
            SegmentLayout::coded_directory(CodeField::letter()),
        )
        .with_source(CodeSource::fixed(CATEGORIES));
        assert!(check(&grammar, "A_Culture").is_empty());
        assert_eq!(check(&grammar, "B_Culture").len(), 1);
        assert_eq!(check(&grammar, "Z_Culture").len(), 1);
        // Unregistered name, and the registered code names something else.
        assert_eq!(check(&grammar, "A_Bogus").len(), 2);
    }

    #[test]
    fn selector_and_literal_fields() {
        let grammar = LevelGrammar::new("file", "test file", SegmentLayout::composite(EntryKind::File, 2))
            .with_pattern(r"^D(?P<dataset>[^_]+)_S(?P<selector>[^_]+)$")
            .unwrap()
            .with_literal("dataset", "Dataset code", "500")
            .with_selector("selector", "component selector")
            .with_extensions(&["flt"]);

        assert!(check(&grammar, "D500_S001.flt").is_empty());

        let messages = check(&grammar, "D501_S01.txt");
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("extension '.txt'"));
        assert!(messages[1].contains("expected 3 digits"));
        assert!(messages[2].contains("expected 500, found 501"));
    }

    #[test]
    fn pattern_mismatch_stops_field_checks() {
        let grammar = LevelGrammar::new("file", "test file", SegmentLayout::composite(EntryKind::File, 2))
            .with_pattern(r"^D(?P<dataset>\d+)_S(?P<selector>\d+)$")
            .unwrap()
            .with_literal("dataset", "Dataset code", "500");
        assert_eq!(check(&grammar, "X500_S001"), vec!["Invalid test file file name"]);
    }

    #[test]
    fn ancestor_mismatch_uses_literal_text() {
        let grammar = LevelGrammar::new("file", "test file", SegmentLayout::composite(EntryKind::File, 2))
            .with_pattern(r"^(?P<kind>[^_]+)_(?P<rest>[^_]+)$")
            .unwrap()
            .with_ancestor_code("kind", 0, "DIS Entity Kind");

        let registry = kinds();
        let mut context = ParentContext::new();
        context.push(ContextEntry {
            name: "1_Platform".to_string(),
            code_literal: Some("1".to_string()),
            fields: BTreeMap::new(),
        });

        let mut out = ViolationList::new();
        check_name(&grammar, "01_x", "01_x", &context, &registry, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out.as_slice()[0].message.contains("does not match parent directory"));

        let mut out = ViolationList::new();
        check_name(&grammar, "1_x", "1_x", &context, &registry, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn recorded_context_carries_code_and_fields() {
        let registry = kinds();
        let mut out = ViolationList::new();
        let entry = check_name(
            &kind_grammar(),
            "2_Munition",
            "2_Munition",
            &ParentContext::new(),
            &registry,
            &mut out,
        );
        assert_eq!(entry.code_literal.as_deref(), Some("2"));
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn walk_reports_entry_kind_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1_Platform"), "").unwrap();
        fs::create_dir(dir.path().join("2_Munition")).unwrap();

        let levels = vec![kind_grammar()];
        let registry = kinds();
        let violations = PathValidator::new(&levels, &registry).validate(dir.path()).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations.as_slice()[0].message.starts_with("Expected a directory"));
    }

    #[test]
    fn walk_of_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let levels = vec![kind_grammar()];
        let registry = kinds();
        let err = PathValidator::new(&levels, &registry)
            .validate(&dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, StructureError::Listing { .. }));
    }
}
