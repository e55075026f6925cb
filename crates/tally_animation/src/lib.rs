//! Tally Animation
//!
//! The small animation toolkit behind Tally's counting widgets.
//!
//! # Features
//!
//! - **Easing**: Linear, cubic ease-in, and cubic ease-out curves
//! - **Clocks**: Wall-clock and manually advanced time sources
//! - **Tick Scheduler**: Repeating, cancelable callbacks driven manually or
//!   from a background thread
//! - **Interpolation**: Linear interpolation for animated numeric values

pub mod clock;
pub mod easing;
pub mod scheduler;
pub mod values;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use easing::{Easing, UnknownEasing, VELOCITY};
pub use scheduler::{
    AnimationScheduler, SchedulerHandle, TickCallback, TickCallbackId, TickFlow, TickSource,
    DEFAULT_TARGET_FPS,
};
pub use values::Interpolate;
