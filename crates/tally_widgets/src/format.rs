//! Number formatting for counter labels
//!
//! Integer counters abbreviate large values with `K` and `M` suffixes,
//! decimal counters always show two fractional digits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CountError;

/// How a counter renders its current value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayKind {
    /// Whole numbers, abbreviated above 9999 (`12.5 K`, `2 M`)
    #[default]
    Integer,
    /// Two fractional digits (`3.14`)
    Decimal,
}

impl DisplayKind {
    pub fn name(self) -> &'static str {
        match self {
            DisplayKind::Integer => "integer",
            DisplayKind::Decimal => "decimal",
        }
    }
}

impl fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayKind {
    type Err = CountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(DisplayKind::Integer),
            "decimal" | "float" => Ok(DisplayKind::Decimal),
            _ => Err(CountError::UnknownDisplayKind(s.to_string())),
        }
    }
}

/// Render `value` the way a label of the given kind displays it
pub fn format_value(value: f32, kind: DisplayKind) -> String {
    match kind {
        DisplayKind::Integer => abbreviate(value),
        DisplayKind::Decimal => format!("{:.2}", value),
    }
}

/// Render a whole number, abbreviating thousands and millions
///
/// Thresholds are strict: 9999 and 999999 render in full, and negative
/// values are never abbreviated.
pub fn abbreviate(number: f32) -> String {
    let number = number as f64;

    if number > 9_999.0 && number < 999_999.0 {
        return scaled(number / 1_000.0, "K");
    }

    if number > 999_999.0 {
        return scaled(number / 1_000_000.0, "M");
    }

    format!("{:.0}", number)
}

/// One fractional digit, dropped when it is zero
fn scaled(value: f64, suffix: &str) -> String {
    let text = format!("{:.1}", value);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{} {}", text, suffix)
}
