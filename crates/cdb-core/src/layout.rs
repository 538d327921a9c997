//! # Segment Layouts
//!
//! The lexical half of a level grammar: which entry kind is expected, how
//! the name splits into tokens, where the code sits and what it looks
//! like, and whether a label follows it.

use serde::Serialize;

/// Whether a hierarchy level holds directories or files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A directory entry.
    Directory,
    /// A regular file.
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// How many delimiter-separated tokens a name must split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// Exactly `n` tokens.
    Exactly(usize),
    /// At least `n` tokens; the label usually absorbs the remainder.
    AtLeast(usize),
}

impl TokenRule {
    /// Whether `count` tokens satisfy the rule.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for TokenRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Digit-count rule for a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Any number of digits.
    Any,
    /// Exactly this many characters, e.g. `500` or `010`.
    Exact(usize),
}

/// The textual form a code takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormat {
    /// A signed decimal integer, optionally width-constrained.
    Numeric(Width),
    /// A single ASCII upper-case letter.
    Letter,
}

/// Location and shape of the code inside a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeField {
    /// Token index holding the code.
    pub position: usize,
    /// Literal character preceding the code inside its token (`L` in `L23`).
    pub prefix: Option<char>,
    /// Number or letter.
    pub format: CodeFormat,
}

impl CodeField {
    /// A leading numeric code with no prefix: `600_MModelGeometry`.
    pub const fn numeric(width: Width) -> Self {
        Self {
            position: 0,
            prefix: None,
            format: CodeFormat::Numeric(width),
        }
    }

    /// A leading letter code: `A_Culture`.
    pub const fn letter() -> Self {
        Self {
            position: 0,
            prefix: None,
            format: CodeFormat::Letter,
        }
    }

    /// A leading numeric code behind a literal prefix: `L23`.
    pub const fn prefixed(prefix: char, width: Width) -> Self {
        Self {
            position: 0,
            prefix: Some(prefix),
            format: CodeFormat::Numeric(width),
        }
    }
}

/// Whether a label follows the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// The segment carries no label.
    None,
    /// All tokens after the code, re-joined with the delimiter.
    Remainder,
}

/// Lexical description of one hierarchy level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLayout {
    /// Expected entry kind.
    pub entry: EntryKind,
    /// Token separator, `_` for every CDB level.
    pub delimiter: char,
    /// Allowed token count.
    pub tokens: TokenRule,
    /// The level's own code, if it has one.
    pub code: Option<CodeField>,
    /// Whether a label follows the code.
    pub label: LabelRule,
}

impl SegmentLayout {
    /// The common `<code>_<Label>` directory shape.
    pub fn coded_directory(code: CodeField) -> Self {
        Self {
            entry: EntryKind::Directory,
            delimiter: '_',
            tokens: TokenRule::AtLeast(1),
            code: Some(code),
            label: LabelRule::Remainder,
        }
    }

    /// A directory whose name is a bare code (`L23`).
    pub fn bare_directory(code: CodeField) -> Self {
        Self {
            entry: EntryKind::Directory,
            delimiter: '_',
            tokens: TokenRule::Exactly(1),
            code: Some(code),
            label: LabelRule::None,
        }
    }

    /// A fixed-arity name with no single code, checked field by field.
    pub fn composite(entry: EntryKind, tokens: usize) -> Self {
        Self {
            entry,
            delimiter: '_',
            tokens: TokenRule::Exactly(tokens),
            code: None,
            label: LabelRule::None,
        }
    }
}
