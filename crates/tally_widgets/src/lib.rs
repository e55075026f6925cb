//! Tally Widgets
//!
//! Animated counting labels for Tally hosts.
//!
//! A [`CountLabel`] counts from a start value to an end value over a fixed
//! duration, easing its progress and rendering each step through
//! [`format_value`]. Ticks come from any [`tally_animation::TickSource`],
//! usually a [`tally_animation::SchedulerHandle`].

pub mod count_label;
pub mod display;
pub mod error;
pub mod format;
pub mod request;
pub mod session;

pub use count_label::{CountLabel, TICK_PERIOD};
pub use display::{SharedText, TextDisplay};
pub use error::{CountError, Result};
pub use format::{abbreviate, format_value, DisplayKind};
pub use request::CountRequest;
pub use session::{CounterSession, CounterState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::count_label::CountLabel;
    pub use crate::display::{SharedText, TextDisplay};
    pub use crate::format::DisplayKind;
    pub use crate::request::CountRequest;
    pub use crate::session::CounterState;
    pub use tally_animation::{AnimationScheduler, Easing, SchedulerHandle};
}
