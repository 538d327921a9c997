//! # Component Selector Padding
//!
//! Component selectors (`S001`, `T002`) are always rendered as exactly
//! three digits. Values below 10 carry two leading zeros, values in
//! `[10, 100)` carry one, values of 100 and above carry none.
//!
//! A selector with the right length but the wrong padding (`+07`) is a
//! different defect from a selector of the wrong length (`07`), and the
//! two are reported separately.

/// Characters in a rendered component selector.
pub const SELECTOR_WIDTH: usize = 3;

/// A component selector that breaks the rendering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorIssue {
    /// Not exactly three characters.
    WrongLength {
        /// Characters present.
        found: usize,
    },
    /// Three characters, but not a decimal integer.
    InvalidNumber,
    /// Three characters and a number, but padded for the wrong magnitude.
    Padding {
        /// Leading zeros the value calls for.
        expected: usize,
        /// Leading zeros present.
        found: usize,
    },
}

/// Leading zeros required for a selector value.
pub fn expected_leading_zeros(value: i64) -> usize {
    match value {
        v if v < 10 => 2,
        v if v < 100 => 1,
        _ => 0,
    }
}

/// Canonical three-digit rendering of a selector value.
pub fn render_selector(value: i64) -> String {
    format!("{value:03}")
}

/// Check a selector literal, returning its value when it is well rendered.
pub fn check_selector(literal: &str) -> Result<i64, SelectorIssue> {
    let found = literal.chars().count();
    if found != SELECTOR_WIDTH {
        return Err(SelectorIssue::WrongLength { found });
    }
    let value = literal
        .parse::<i64>()
        .map_err(|_| SelectorIssue::InvalidNumber)?;
    if value < 0 {
        return Err(SelectorIssue::InvalidNumber);
    }

    let leading = literal.chars().take_while(|c| *c == '0').count();
    let expected = expected_leading_zeros(value);
    // `000` has three zeros but only two of them are padding.
    let found = if value == 0 { leading.saturating_sub(1) } else { leading };
    if found != expected {
        return Err(SelectorIssue::Padding { expected, found });
    }
    Ok(value)
}
