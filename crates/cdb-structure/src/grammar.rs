//! # Level Grammars
//!
//! A [`LevelGrammar`] is the declarative description of one hierarchy
//! level. The lexical half is a [`SegmentLayout`] from `cdb-core`; the
//! rest says where the level's codes come from and which parts of the
//! name must agree with ancestors, literals, or the selector padding law.
//!
//! Adding a hierarchy means writing a table of these, not new traversal
//! code. See [`crate::hierarchy`] for the tables this crate ships.
//!
//! ## Field Captures
//!
//! Composite names (`D500_S001_T001_L23_AA010_000_Mine.flt`) are split by
//! a regular expression with named groups. Every other rule refers to a
//! field by its capture name, so a grammar stays a plain table.

use cdb_core::{EntryKind, SegmentLayout};
use cdb_registry::{CodeCategory, FixedEnumeration};
use regex::Regex;

use crate::error::StructureError;

/// How a scoped code set finds its scope key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// One table for the whole category.
    Global,
    /// The concatenated code literals of the ancestors at these depths,
    /// e.g. `[0, 1]` turns `A_Culture/A_Extraction` into `AA`.
    Ancestors(Vec<usize>),
}

/// Where a level's codes are looked up.
#[derive(Debug, Clone)]
pub enum CodeSource {
    /// A table in the loaded [`cdb_registry::CodeRegistry`].
    Registry { category: CodeCategory, scope: Scope },
    /// A compiled-in enumeration.
    Fixed {
        enumeration: FixedEnumeration,
        scope: Scope,
    },
}

impl CodeSource {
    /// An unscoped registry table.
    pub fn registry(category: CodeCategory) -> Self {
        Self::Registry {
            category,
            scope: Scope::Global,
        }
    }

    /// An unscoped compiled-in enumeration.
    pub fn fixed(enumeration: FixedEnumeration) -> Self {
        Self::Fixed {
            enumeration,
            scope: Scope::Global,
        }
    }

    /// Scope this source by the ancestors at `depths`.
    pub fn scoped_by(self, depths: &[usize]) -> Self {
        let scope = Scope::Ancestors(depths.to_vec());
        match self {
            Self::Registry { category, .. } => Self::Registry { category, scope },
            Self::Fixed { enumeration, .. } => Self::Fixed { enumeration, scope },
        }
    }

    pub fn scope(&self) -> &Scope {
        match self {
            Self::Registry { scope, .. } | Self::Fixed { scope, .. } => scope,
        }
    }

    /// The registry category this source needs, if any.
    pub fn registry_category(&self) -> Option<CodeCategory> {
        match self {
            Self::Registry { category, .. } => Some(*category),
            Self::Fixed { .. } => None,
        }
    }
}

/// Which part of an ancestor a field is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestorField {
    /// The ancestor's own code literal.
    Code,
    /// A named capture of the ancestor's composite name.
    Named(&'static str),
}

/// A captured field that must equal something recorded for an ancestor.
#[derive(Debug, Clone)]
pub struct AncestorCheck {
    pub capture: &'static str,
    /// Depth of the ancestor below the check root (0 = first level).
    pub depth: usize,
    pub field: AncestorField,
    /// Diagnostic noun, e.g. `DIS Entity Domain`.
    pub noun: &'static str,
}

/// A captured numeric field checked for registry membership.
#[derive(Debug, Clone)]
pub struct CompositeField {
    pub capture: &'static str,
    pub noun: &'static str,
    pub source: CodeSource,
}

/// A captured field that must be a fixed-width decimal number.
#[derive(Debug, Clone)]
pub struct NumericField {
    pub capture: &'static str,
    pub noun: &'static str,
    /// Required digit count, e.g. 3 for `000`.
    pub width: usize,
}

/// A captured component selector, checked against the padding law.
#[derive(Debug, Clone)]
pub struct SelectorField {
    pub capture: &'static str,
    pub noun: &'static str,
}

/// A captured field that must equal a fixed literal.
#[derive(Debug, Clone)]
pub struct LiteralField {
    pub capture: &'static str,
    pub noun: &'static str,
    pub expected: &'static str,
}

/// Declarative description of one hierarchy level.
#[derive(Debug, Clone)]
pub struct LevelGrammar {
    key: &'static str,
    name: &'static str,
    layout: SegmentLayout,
    source: Option<CodeSource>,
    pattern: Option<Regex>,
    composites: Vec<CompositeField>,
    numerics: Vec<NumericField>,
    selectors: Vec<SelectorField>,
    literals: Vec<LiteralField>,
    ancestors: Vec<AncestorCheck>,
    extensions: Vec<&'static str>,
}

impl LevelGrammar {
    /// A grammar with a layout and nothing else.
    ///
    /// `key` selects the level from the command line (`feature-type`);
    /// `name` is the noun used in violation messages (`CDB Feature Type`).
    pub fn new(key: &'static str, name: &'static str, layout: SegmentLayout) -> Self {
        Self {
            key,
            name,
            layout,
            source: None,
            pattern: None,
            composites: Vec::new(),
            numerics: Vec::new(),
            selectors: Vec::new(),
            literals: Vec::new(),
            ancestors: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Look the level's own code up in `source`.
    pub fn with_source(mut self, source: CodeSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Require the stem to match `pattern` and capture its named groups.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] if the pattern does not compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, StructureError> {
        let regex = Regex::new(pattern).map_err(|e| StructureError::Grammar {
            level: self.key.to_string(),
            reason: format!("pattern does not compile: {e}"),
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    pub fn with_composite(mut self, capture: &'static str, noun: &'static str, source: CodeSource) -> Self {
        self.composites.push(CompositeField {
            capture,
            noun,
            source,
        });
        self
    }

    /// Require `capture` to be exactly `width` decimal digits.
    pub fn with_numeric(mut self, capture: &'static str, noun: &'static str, width: usize) -> Self {
        self.numerics.push(NumericField { capture, noun, width });
        self
    }

    pub fn with_selector(mut self, capture: &'static str, noun: &'static str) -> Self {
        self.selectors.push(SelectorField { capture, noun });
        self
    }

    pub fn with_literal(mut self, capture: &'static str, noun: &'static str, expected: &'static str) -> Self {
        self.literals.push(LiteralField {
            capture,
            noun,
            expected,
        });
        self
    }

    /// Compare `capture` with the code literal of the ancestor at `depth`.
    pub fn with_ancestor_code(mut self, capture: &'static str, depth: usize, noun: &'static str) -> Self {
        self.ancestors.push(AncestorCheck {
            capture,
            depth,
            field: AncestorField::Code,
            noun,
        });
        self
    }

    /// Compare `capture` with the same-named field of the ancestor at `depth`.
    pub fn with_ancestor_field(mut self, capture: &'static str, depth: usize, noun: &'static str) -> Self {
        self.ancestors.push(AncestorCheck {
            capture,
            depth,
            field: AncestorField::Named(capture),
            noun,
        });
        self
    }

    pub fn with_extensions(mut self, extensions: &[&'static str]) -> Self {
        self.extensions = extensions.to_vec();
        self
    }

    /// Check the grammar for internal consistency.
    ///
    /// Every capture a rule refers to must exist in the pattern, composite
    /// names need a pattern, and an ancestor check may only look upwards.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] describing the first problem.
    pub fn verify(&self, depth: usize) -> Result<(), StructureError> {
        let fail = |reason: String| StructureError::Grammar {
            level: self.key.to_string(),
            reason,
        };

        if self.layout.code.is_none() && self.pattern.is_none() {
            return Err(fail("a level without a code field needs a pattern".to_string()));
        }
        if self.source.is_some() && self.layout.code.is_none() {
            return Err(fail("a code source needs a code field".to_string()));
        }

        let captures: Vec<&str> = self
            .pattern
            .iter()
            .flat_map(|re| re.capture_names().flatten())
            .collect();
        let referenced = self
            .composites
            .iter()
            .map(|c| c.capture)
            .chain(self.numerics.iter().map(|n| n.capture))
            .chain(self.selectors.iter().map(|s| s.capture))
            .chain(self.literals.iter().map(|l| l.capture))
            .chain(self.ancestors.iter().map(|a| a.capture));
        for capture in referenced {
            if !captures.contains(&capture) {
                return Err(fail(format!("rule refers to unknown capture '{capture}'")));
            }
        }

        if let Some(check) = self.ancestors.iter().find(|a| a.depth >= depth) {
            return Err(fail(format!(
                "ancestor check on '{}' looks at depth {} from depth {depth}",
                check.capture, check.depth
            )));
        }
        Ok(())
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn layout(&self) -> &SegmentLayout {
        &self.layout
    }

    pub fn entry(&self) -> EntryKind {
        self.layout.entry
    }

    pub fn source(&self) -> Option<&CodeSource> {
        self.source.as_ref()
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn composites(&self) -> &[CompositeField] {
        &self.composites
    }

    pub fn numerics(&self) -> &[NumericField] {
        &self.numerics
    }

    pub fn selectors(&self) -> &[SelectorField] {
        &self.selectors
    }

    pub fn literals(&self) -> &[LiteralField] {
        &self.literals
    }

    pub fn ancestors(&self) -> &[AncestorCheck] {
        &self.ancestors
    }

    pub fn extensions(&self) -> &[&'static str] {
        &self.extensions
    }

    /// Registry categories this level looks codes up in.
    pub fn registry_categories(&self) -> impl Iterator<Item = CodeCategory> + '_ {
        self.source
            .iter()
            .chain(self.composites.iter().map(|c| &c.source))
            .filter_map(CodeSource::registry_category)
    }
}
