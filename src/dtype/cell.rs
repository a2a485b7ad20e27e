//! Tagged cell values and numeric-like coercion

use super::CellKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Numeric literal: optional sign, digits with optional fraction, optional exponent,
/// or the NaN/Inf spellings produced by float formatting and spreadsheet exports.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|(?i:nan|inf|infinity))\s*$",
    )
    .expect("numeric literal pattern is valid")
});

/// Returns true if `text` reads as a numeric literal
pub fn is_numeric_like(text: &str) -> bool {
    NUMERIC_LITERAL.is_match(text)
}

/// Parse a numeric-like string into an `f64`
///
/// Returns `None` when the text does not match the numeric literal pattern.
pub fn parse_numeric(text: &str) -> Option<f64> {
    if !is_numeric_like(text) {
        return None;
    }
    let trimmed = text.trim();
    let (negative, body) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = match body.to_ascii_lowercase().as_str() {
        "nan" => f64::NAN,
        "inf" | "infinity" => f64::INFINITY,
        digits => digits.parse::<f64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// A single matrix slot
///
/// Replaces dynamically typed storage with an explicit tag; every numeric
/// coercion is a pattern match that either yields an `f64` or reports why not.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    /// Double-precision number
    Number(f64),
    /// Text value
    Text(String),
    /// Unset slot; coerces to `0.0`
    #[default]
    Empty,
}

impl Cell {
    /// Kind this cell naturally belongs to
    ///
    /// `Empty` reports `Numeric` since it coerces to zero.
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Number(_) | Cell::Empty => CellKind::Numeric,
            Cell::Text(_) => CellKind::Text,
        }
    }

    /// Coerce to `f64`
    ///
    /// Text cells are parsed with [`parse_numeric`]; `None` means the text is
    /// not numeric-like.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => parse_numeric(s),
            Cell::Empty => Some(0.0),
        }
    }

    /// Returns true if the cell coerces to a number
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Returns true for unset cells
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => fmt::Display::fmt(v, f),
            Cell::Text(s) => f.pad(s),
            Cell::Empty => f.pad(""),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}
