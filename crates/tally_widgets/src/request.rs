//! Counter requests read from config files or command lines

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tally_animation::Easing;

use crate::error::{CountError, Result};
use crate::format::DisplayKind;

/// Parameters for one `start_counting` call, with the duration in seconds
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct CountRequest {
    #[serde(default)]
    pub from: f32,
    pub to: f32,
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub display: DisplayKind,
}

fn default_duration() -> f32 {
    1.0
}

impl CountRequest {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::default(),
            display: DisplayKind::default(),
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn display(mut self, display: DisplayKind) -> Self {
        self.display = display;
        self
    }

    /// Reject values the counting label cannot animate
    pub fn validate(&self) -> Result<()> {
        if !self.from.is_finite() {
            return Err(CountError::NonFiniteBound {
                name: "from",
                value: self.from,
            });
        }
        if !self.to.is_finite() {
            return Err(CountError::NonFiniteBound {
                name: "to",
                value: self.to,
            });
        }
        self.duration().map(|_| ())
    }

    /// Validated duration
    ///
    /// Rejects negative, non-finite, and values too large for [`Duration`].
    pub fn duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f32(self.duration)
            .map_err(|_| CountError::InvalidDuration(self.duration))
    }
}
