//! Counting label
//!
//! A text label that counts from one number to another over a fixed duration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use tally_animation::{AnimationScheduler, Easing};
//! use tally_widgets::{CountLabel, DisplayKind, SharedText};
//!
//! let mut scheduler = AnimationScheduler::new();
//! scheduler.start_background();
//!
//! let text = SharedText::new();
//! let label = CountLabel::new(scheduler.handle(), text.clone());
//! label.start_counting(0.0, 2_500_000.0, Duration::from_secs(2), Easing::EaseOut, DisplayKind::Integer);
//! // text.get() walks through "0" ... "999 K" ... "2.5 M"
//! ```

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tally_animation::{
    Easing, SchedulerHandle, SharedClock, SystemClock, TickCallbackId, TickFlow, TickSource,
};
use tracing::{debug, trace, warn};

use crate::display::TextDisplay;
use crate::error::Result;
use crate::format::{format_value, DisplayKind};
use crate::request::CountRequest;
use crate::session::{CounterSession, CounterState};

/// Interval between label ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(10);

/// State shared between the label and its tick callback
struct LabelInner {
    display: Box<dyn TextDisplay>,
    session: Option<CounterSession>,
    state: CounterState,
    /// Bumped by every `start_counting`; callbacks from older sessions stop
    generation: u64,
    tick_id: Option<TickCallbackId>,
}

impl LabelInner {
    fn render(&mut self, value: f32, kind: DisplayKind) {
        self.display.set_text(format_value(value, kind));
    }

    fn tick(&mut self, generation: u64, now: Instant) -> TickFlow {
        if generation != self.generation {
            return TickFlow::Stop;
        }
        let Some(mut session) = self.session else {
            return TickFlow::Stop;
        };

        let value = session.advance(now);
        trace!(value, elapsed = ?session.elapsed(), "count label tick");
        self.render(value, session.display_kind);

        let flow = if session.is_finished() {
            debug!(end = session.end_value, "count label completed");
            session.active = false;
            self.state = CounterState::Completed;
            self.tick_id = None;
            TickFlow::Stop
        } else {
            TickFlow::Continue
        };
        self.session = Some(session);
        flow
    }
}

/// A label that animates its text between two numbers
///
/// Ticks every [`TICK_PERIOD`] through the given [`TickSource`]. Dropping the
/// label cancels its tick.
pub struct CountLabel<S: TickSource = SchedulerHandle> {
    source: S,
    clock: SharedClock,
    inner: Arc<Mutex<LabelInner>>,
}

impl<S: TickSource> CountLabel<S> {
    /// Create an idle label that renders into `display`
    pub fn new(source: S, display: impl TextDisplay) -> Self {
        Self::with_clock(source, display, SystemClock::shared())
    }

    /// Create an idle label that measures progress with `clock`
    pub fn with_clock(source: S, display: impl TextDisplay, clock: SharedClock) -> Self {
        Self {
            source,
            clock,
            inner: Arc::new(Mutex::new(LabelInner {
                display: Box::new(display),
                session: None,
                state: CounterState::Idle,
                generation: 0,
                tick_id: None,
            })),
        }
    }

    /// Count from `from` to `to` over `duration`
    ///
    /// Supersedes any animation already in flight. A zero duration renders
    /// the end value immediately without scheduling a tick, as does a tick
    /// source that can no longer schedule callbacks.
    pub fn start_counting(
        &self,
        from: f32,
        to: f32,
        duration: Duration,
        easing: Easing,
        kind: DisplayKind,
    ) {
        let now = self.clock.now();
        let mut inner = self.inner.lock().unwrap();

        if let Some(id) = inner.tick_id.take() {
            debug!("count label restarted, cancelling previous tick");
            self.source.cancel(id);
        }
        inner.generation = inner.generation.wrapping_add(1);

        let mut session = CounterSession::new(from, to, duration, easing, kind, now);

        if duration.is_zero() {
            inner.session = Some(session);
            inner.state = CounterState::Completed;
            inner.render(to, kind);
            return;
        }

        debug!(from, to, ?duration, %easing, %kind, "count label started");

        let generation = inner.generation;
        let weak = Arc::downgrade(&self.inner);
        let clock = Arc::clone(&self.clock);
        let tick_id = self.source.schedule_repeating(
            TICK_PERIOD,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return TickFlow::Stop;
                };
                let mut inner = inner.lock().unwrap();
                inner.tick(generation, clock.now())
            }),
        );

        let Some(tick_id) = tick_id else {
            warn!("tick source is gone, jumping count label to its end value");
            inner.session = Some(session);
            inner.state = CounterState::Completed;
            inner.render(to, kind);
            return;
        };
        session.active = true;
        inner.session = Some(session);
        inner.state = CounterState::Running;
        inner.tick_id = Some(tick_id);
    }

    /// Validate `request` and start counting with it
    pub fn start(&self, request: &CountRequest) -> Result<()> {
        let duration = request.duration()?;
        self.start_counting(
            request.from,
            request.to,
            duration,
            request.easing,
            request.display,
        );
        Ok(())
    }

    pub fn state(&self) -> CounterState {
        self.inner.lock().unwrap().state
    }

    /// Check if a tick is scheduled
    pub fn is_animating(&self) -> bool {
        self.inner.lock().unwrap().tick_id.is_some()
    }

    /// Snapshot of the current session, if one was ever started
    pub fn session(&self) -> Option<CounterSession> {
        self.inner.lock().unwrap().session
    }

    /// Value shown by the most recent render
    pub fn current_value(&self) -> Option<f32> {
        self.session().map(|s| s.current_value())
    }

    /// Linear progress of the current session (0.0 when idle)
    pub fn progress(&self) -> f32 {
        self.session().map(|s| s.progress()).unwrap_or(0.0)
    }

    /// Id of the scheduled tick, if any
    pub fn tick_id(&self) -> Option<TickCallbackId> {
        self.inner.lock().unwrap().tick_id
    }
}

impl<S: TickSource> Drop for CountLabel<S> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(id) = inner.tick_id.take() {
                self.source.cancel(id);
            }
            // A callback already past its upgrade must not render
            inner.generation = inner.generation.wrapping_add(1);
            inner.session = None;
        }
    }
}
