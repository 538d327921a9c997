//! # Path Segments
//!
//! Lexes one directory or file name against a [`SegmentLayout`]. Lexing
//! never fails: every lexical problem is recorded as a [`SegmentIssue`]
//! on the returned [`PathSegment`] so that the caller can report all of
//! them and keep scanning.
//!
//! The code literal is kept verbatim next to the parsed [`CodeValue`].
//! Ancestor consistency is judged on the literal text (`05` is not `5`),
//! registry membership on the parsed value.

use serde::Serialize;

use crate::layout::{CodeFormat, EntryKind, LabelRule, SegmentLayout, TokenRule, Width};

/// A parsed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CodeValue {
    /// A decimal code such as `225` or `-1`.
    Number(i64),
    /// A FACC letter code such as `A`.
    Letter(char),
}

impl CodeValue {
    /// The numeric value, if this is a numeric code.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Letter(_) => None,
        }
    }

    /// True for numeric codes below zero.
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Number(n) if *n < 0)
    }
}

impl std::fmt::Display for CodeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Letter(c) => write!(f, "{c}"),
        }
    }
}

/// A lexical problem found while splitting a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentIssue {
    /// Wrong number of delimiter-separated tokens. Lexing stops here.
    TokenCount {
        /// The rule the layout imposes.
        rule: TokenRule,
        /// Tokens actually present.
        found: usize,
    },
    /// The token that should hold the code does not exist.
    MissingCode,
    /// The code token lacks its literal prefix.
    MissingPrefix {
        /// The expected prefix character.
        prefix: char,
    },
    /// The code is not a decimal integer.
    InvalidNumber {
        /// The offending text.
        literal: String,
    },
    /// The code parsed but has the wrong number of characters.
    WrongWidth {
        /// Required character count.
        expected: usize,
        /// Actual character count.
        found: usize,
    },
    /// A letter code is not a single upper-case ASCII letter.
    InvalidLetter {
        /// The offending text.
        literal: String,
    },
    /// No label follows the code.
    MissingLabel,
}

impl SegmentIssue {
    /// Issues after which no further checks are meaningful.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::TokenCount { .. })
    }
}

/// One lexed directory or file name. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    raw: String,
    stem: String,
    extension: Option<String>,
    tokens: Vec<String>,
    code_literal: Option<String>,
    code: Option<CodeValue>,
    label: Option<String>,
    issues: Vec<SegmentIssue>,
}

impl PathSegment {
    /// Lex `raw` against `layout`.
    pub fn lex(raw: &str, layout: &SegmentLayout) -> Self {
        let (stem, extension) = match layout.entry {
            EntryKind::File => split_extension(raw),
            EntryKind::Directory => (raw.to_string(), None),
        };
        let tokens: Vec<String> = stem.split(layout.delimiter).map(str::to_string).collect();

        let mut segment = Self {
            raw: raw.to_string(),
            stem,
            extension,
            tokens,
            code_literal: None,
            code: None,
            label: None,
            issues: Vec::new(),
        };

        if !layout.tokens.accepts(segment.tokens.len()) {
            segment.issues.push(SegmentIssue::TokenCount {
                rule: layout.tokens,
                found: segment.tokens.len(),
            });
            return segment;
        }

        let mut label_start = 0;
        if let Some(field) = layout.code {
            label_start = field.position + 1;
            match segment.tokens.get(field.position).cloned() {
                None => segment.issues.push(SegmentIssue::MissingCode),
                Some(token) => {
                    let literal = match field.prefix {
                        Some(prefix) => match token.strip_prefix(prefix) {
                            Some(rest) => Some(rest.to_string()),
                            None => {
                                segment.issues.push(SegmentIssue::MissingPrefix { prefix });
                                None
                            }
                        },
                        None => Some(token),
                    };
                    if let Some(literal) = literal {
                        segment.code = lex_code(&literal, field.format, &mut segment.issues);
                        segment.code_literal = Some(literal);
                    }
                }
            }
        }

        if layout.label == LabelRule::Remainder {
            let rest = segment.tokens.get(label_start..).unwrap_or(&[]);
            let joined = rest.join(layout.delimiter.to_string().as_str());
            if joined.is_empty() {
                segment.issues.push(SegmentIssue::MissingLabel);
            } else {
                segment.label = Some(joined);
            }
        }

        segment
    }

    /// The name exactly as found on disk.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The name without its extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// The text after the last `.`, for file levels.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// The stem split on the layout's delimiter.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The code text as written, prefix removed.
    pub fn code_literal(&self) -> Option<&str> {
        self.code_literal.as_deref()
    }

    /// The parsed code, when it lexed cleanly.
    pub fn code(&self) -> Option<CodeValue> {
        self.code
    }

    /// Tokens after the code, re-joined.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Everything lexing found wrong, in order.
    pub fn issues(&self) -> &[SegmentIssue] {
        &self.issues
    }

    /// False when the token structure was wrong and lexing stopped early.
    pub fn is_well_formed(&self) -> bool {
        !self.issues.iter().any(SegmentIssue::is_structural)
    }
}

fn lex_code(literal: &str, format: CodeFormat, issues: &mut Vec<SegmentIssue>) -> Option<CodeValue> {
    match format {
        CodeFormat::Numeric(width) => match literal.parse::<i64>() {
            Ok(value) => {
                if let Width::Exact(expected) = width {
                    let found = literal.chars().count();
                    if found != expected {
                        issues.push(SegmentIssue::WrongWidth { expected, found });
                    }
                }
                Some(CodeValue::Number(value))
            }
            Err(_) => {
                issues.push(SegmentIssue::InvalidNumber {
                    literal: literal.to_string(),
                });
                None
            }
        },
        CodeFormat::Letter => {
            let mut chars = literal.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => Some(CodeValue::Letter(c)),
                _ => {
                    issues.push(SegmentIssue::InvalidLetter {
                        literal: literal.to_string(),
                    });
                    None
                }
            }
        }
    }
}

/// Split at the last `.`; a leading dot (hidden file) is not an extension.
fn split_extension(raw: &str) -> (String, Option<String>) {
    match raw.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_string())),
        _ => (raw.to_string(), None),
    }
}
