//! Easing curves
//!
//! Maps linear progress (0.0 to 1.0) onto an eased fraction. All curves share
//! the same fixed exponent, [`VELOCITY`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Exponent shared by the ease-in and ease-out curves
pub const VELOCITY: f32 = 3.0;

/// Easing curve applied to a counter's progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant rate of change
    #[default]
    Linear,
    /// Starts slow, accelerates towards the end
    EaseIn,
    /// Starts fast, decelerates towards the end
    EaseOut,
}

impl Easing {
    /// All supported curves
    pub const ALL: [Easing; 3] = [Easing::Linear, Easing::EaseIn, Easing::EaseOut];

    /// Apply easing to a progress value in `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t.powf(VELOCITY),
            Easing::EaseOut => 1.0 - (1.0 - t).powf(VELOCITY),
        }
    }

    /// Kebab-case name, as accepted by [`Easing::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unrecognized easing name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown easing '{0}' (expected linear, ease-in or ease-out)")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Ok(Easing::Linear),
            "ease-in" | "easein" => Ok(Easing::EaseIn),
            "ease-out" | "easeout" => Ok(Easing::EaseOut),
            _ => Err(UnknownEasing(s.to_string())),
        }
    }
}
