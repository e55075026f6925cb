//! Counter session state
//!
//! A [`CounterSession`] is created by every `start_counting` call and holds the
//! fixed animation parameters plus the progress clock.

use std::time::{Duration, Instant};
use tally_animation::{Easing, Interpolate};

use crate::format::DisplayKind;

/// Lifecycle of a counting label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterState {
    /// Nothing has been counted yet
    #[default]
    Idle,
    /// A tick callback is advancing the session
    Running,
    /// The end value has been rendered; no ticks are scheduled
    Completed,
}

/// Animation state of one counting run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterSession {
    pub start_value: f32,
    pub end_value: f32,
    pub duration: Duration,
    pub easing: Easing,
    pub display_kind: DisplayKind,
    /// Always within `[0, duration]`
    elapsed: Duration,
    last_tick: Instant,
    /// Whether a tick callback is scheduled for this session
    pub active: bool,
}

impl CounterSession {
    pub fn new(
        start_value: f32,
        end_value: f32,
        duration: Duration,
        easing: Easing,
        display_kind: DisplayKind,
        now: Instant,
    ) -> Self {
        Self {
            start_value,
            end_value,
            duration,
            easing,
            display_kind,
            elapsed: Duration::ZERO,
            last_tick: now,
            active: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Advance the progress clock to `now` and return the new value
    ///
    /// A timestamp earlier than the previous tick advances nothing.
    pub fn advance(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = self.last_tick.max(now);
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.current_value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress, `elapsed / duration`
    pub fn progress(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Interpolated value for the current progress
    ///
    /// Lands exactly on `end_value` once finished.
    pub fn current_value(&self) -> f32 {
        if self.is_finished() {
            return self.end_value;
        }
        let eased = self.easing.apply(self.progress());
        self.start_value.lerp(&self.end_value, eased)
    }
}
