//! Tick scheduler
//!
//! Owns every repeating tick callback and fires them as time passes.
//! Callbacks are registered through [`TickSource`], implemented by both the
//! scheduler and its weak [`SchedulerHandle`]:
//! - `schedule_repeating` - Fire a callback every `period` until it stops
//! - `cancel` - Remove a callback; it will not fire again
//!
//! The scheduler is driven either manually via [`AnimationScheduler::tick`] or
//! from a background thread via [`AnimationScheduler::start_background`].

use crate::clock::{SharedClock, SystemClock};
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Background tick rate when none is configured (one tick every 10ms)
pub const DEFAULT_TARGET_FPS: u32 = 100;

new_key_type! {
    /// Handle to a registered repeating callback
    pub struct TickCallbackId;
}

/// Returned by a tick callback to say whether it wants to keep firing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

/// A repeating tick callback
pub type TickCallback = Box<dyn FnMut() -> TickFlow + Send>;

/// Anything that can schedule a repeating callback and cancel it again
pub trait TickSource {
    /// Fire `callback` every `period` until it returns [`TickFlow::Stop`] or
    /// is cancelled
    ///
    /// Returns `None` if the source can no longer schedule callbacks.
    fn schedule_repeating(&self, period: Duration, callback: TickCallback)
        -> Option<TickCallbackId>;

    /// Cancel a callback. Unknown or already finished ids are ignored.
    fn cancel(&self, id: TickCallbackId);
}

struct TickEntry {
    period: Duration,
    accumulated: Duration,
    /// Taken out while the callback is executing
    callback: Option<TickCallback>,
}

/// Internal state of the tick scheduler
struct SchedulerInner {
    callbacks: SlotMap<TickCallbackId, TickEntry>,
    last_frame: Instant,
}

impl SchedulerInner {
    fn insert(&mut self, period: Duration, callback: TickCallback) -> TickCallbackId {
        self.callbacks.insert(TickEntry {
            period,
            accumulated: Duration::ZERO,
            callback: Some(callback),
        })
    }
}

/// Advance every callback by the time since the previous tick and fire the
/// ones that are due
///
/// Callbacks run without the scheduler lock held, so they may schedule or
/// cancel other callbacks. Returns true while callbacks remain registered.
fn run_tick(inner: &Mutex<SchedulerInner>, clock: &SharedClock) -> bool {
    let due: Vec<(TickCallbackId, TickCallback)> = {
        let mut inner = inner.lock().unwrap();
        let now = clock.now();
        let dt = now.saturating_duration_since(inner.last_frame);
        inner.last_frame = now;

        let mut due = Vec::new();
        for (id, entry) in inner.callbacks.iter_mut() {
            entry.accumulated += dt;
            if entry.accumulated < entry.period {
                continue;
            }
            // Fire at most once per tick, keeping the remainder
            entry.accumulated = remainder(entry.accumulated, entry.period);
            if let Some(callback) = entry.callback.take() {
                due.push((id, callback));
            }
        }
        due
    };

    for (id, mut callback) in due {
        let flow = callback();
        let mut inner = inner.lock().unwrap();
        match flow {
            // A callback cancelled while it was running has lost its slot
            TickFlow::Continue => {
                if let Some(entry) = inner.callbacks.get_mut(id) {
                    entry.callback = Some(callback);
                }
            }
            TickFlow::Stop => {
                inner.callbacks.remove(id);
            }
        }
    }

    !inner.lock().unwrap().callbacks.is_empty()
}

fn remainder(accumulated: Duration, period: Duration) -> Duration {
    if period.is_zero() {
        return Duration::ZERO;
    }
    let rem = accumulated.as_nanos() % period.as_nanos();
    Duration::from_nanos(rem as u64)
}

/// The scheduler that fires all repeating tick callbacks
///
/// Hand out [`SchedulerHandle`]s to widgets; they register their callbacks
/// through it without keeping the scheduler alive.
///
/// # Background Thread Mode
///
/// ```ignore
/// let mut scheduler = AnimationScheduler::new();
/// scheduler.start_background(); // Ticks at 100fps in a background thread
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    clock: SharedClock,
    target_fps: u32,
    /// Stop signal for background thread
    stop_flag: Arc<AtomicBool>,
    /// Background thread handle (if running)
    thread_handle: Option<JoinHandle<()>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::shared())
    }

    /// Create a scheduler that measures time with `clock`
    pub fn with_clock(clock: SharedClock) -> Self {
        let now = clock.now();
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                callbacks: SlotMap::with_key(),
                last_frame: now,
            })),
            clock,
            target_fps: DEFAULT_TARGET_FPS,
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Set the background tick rate. Takes effect on the next `start_background`.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    /// Start ticking on a background thread at the target FPS
    pub fn start_background(&mut self) {
        if self.thread_handle.is_some() {
            return; // Already running
        }

        let inner = Arc::clone(&self.inner);
        let clock = Arc::clone(&self.clock);
        let stop_flag = Arc::clone(&self.stop_flag);
        let frame_duration = Duration::from_micros(1_000_000 / self.target_fps as u64);

        tracing::debug!(
            "AnimationScheduler: starting background thread at {}fps",
            self.target_fps
        );

        self.thread_handle = Some(thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let start = Instant::now();

                run_tick(&inner, &clock);

                // Sleep for remaining frame time
                let elapsed = start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        }));
    }

    /// Stop the background thread
    pub fn stop_background(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            tracing::debug!("AnimationScheduler: background thread stopped");
        }
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    /// Check if the background thread is running
    pub fn is_background_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Get a handle to this scheduler for passing to widgets
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Fire every callback that is due
    ///
    /// Returns true if any callbacks are still registered (need another tick).
    pub fn tick(&self) -> bool {
        run_tick(&self.inner, &self.clock)
    }

    /// Check if any callbacks are still registered
    pub fn has_active_callbacks(&self) -> bool {
        !self.inner.lock().unwrap().callbacks.is_empty()
    }

    /// Get the number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.inner.lock().unwrap().callbacks.len()
    }

    /// Check whether `id` is still registered
    pub fn is_scheduled(&self, id: TickCallbackId) -> bool {
        self.inner.lock().unwrap().callbacks.contains_key(id)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        // Stop background thread when scheduler is dropped
        self.stop_background();
    }
}

impl TickSource for AnimationScheduler {
    fn schedule_repeating(
        &self,
        period: Duration,
        callback: TickCallback,
    ) -> Option<TickCallbackId> {
        Some(self.inner.lock().unwrap().insert(period, callback))
    }

    fn cancel(&self, id: TickCallbackId) {
        self.inner.lock().unwrap().callbacks.remove(id);
    }
}

/// A weak handle to the tick scheduler
///
/// This is passed to widgets that need to register tick callbacks.
/// It won't prevent the scheduler from being dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check whether `id` is still registered
    pub fn is_scheduled(&self, id: TickCallbackId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().callbacks.contains_key(id))
            .unwrap_or(false)
    }
}

impl TickSource for SchedulerHandle {
    fn schedule_repeating(
        &self,
        period: Duration,
        callback: TickCallback,
    ) -> Option<TickCallbackId> {
        let inner = self.inner.upgrade()?;
        let id = inner.lock().unwrap().insert(period, callback);
        Some(id)
    }

    fn cancel(&self, id: TickCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().callbacks.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::atomic::AtomicUsize;

    fn counting_callback(counter: &Arc<AtomicUsize>, flow: TickFlow) -> TickCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            flow
        })
    }

    #[test]
    fn test_callback_fires_once_period_elapsed() {
        let clock = ManualClock::new();
        let scheduler = AnimationScheduler::with_clock(clock.shared());
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.schedule_repeating(
            Duration::from_millis(10),
            counting_callback(&fired, TickFlow::Continue),
        );

        clock.advance(Duration::from_millis(4));
        assert!(scheduler.tick());
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        clock.advance(Duration::from_millis(6));
        scheduler.tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // A long gap fires once, not once per missed period
        clock.advance(Duration::from_millis(55));
        scheduler.tick();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stop_removes_callback() {
        let clock = ManualClock::new();
        let scheduler = AnimationScheduler::with_clock(clock.shared());
        let fired = Arc::new(AtomicUsize::new(0));

        let id = scheduler
            .schedule_repeating(
                Duration::from_millis(10),
                counting_callback(&fired, TickFlow::Stop),
            )
            .unwrap();

        clock.advance(Duration::from_millis(10));
        assert!(!scheduler.tick());
        assert!(!scheduler.is_scheduled(id));

        clock.advance(Duration::from_millis(10));
        scheduler.tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel() {
        let clock = ManualClock::new();
        let scheduler = AnimationScheduler::with_clock(clock.shared());
        let fired = Arc::new(AtomicUsize::new(0));

        let id = scheduler
            .schedule_repeating(
                Duration::from_millis(10),
                counting_callback(&fired, TickFlow::Continue),
            )
            .unwrap();
        assert_eq!(scheduler.callback_count(), 1);

        scheduler.cancel(id);
        assert_eq!(scheduler.callback_count(), 0);
        assert!(!scheduler.has_active_callbacks());

        clock.advance(Duration::from_millis(20));
        scheduler.tick();
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        // Cancelling twice is harmless
        scheduler.cancel(id);
    }

    #[test]
    fn test_callback_cancelled_while_running_is_not_rearmed() {
        let clock = ManualClock::new();
        let scheduler = AnimationScheduler::with_clock(clock.shared());
        let handle = scheduler.handle();
        let own_id: Arc<Mutex<Option<TickCallbackId>>> = Arc::new(Mutex::new(None));

        let cb_handle = handle.clone();
        let cb_id = Arc::clone(&own_id);
        let id = handle
            .schedule_repeating(
                Duration::from_millis(10),
                Box::new(move || {
                    if let Some(id) = *cb_id.lock().unwrap() {
                        cb_handle.cancel(id);
                    }
                    TickFlow::Continue
                }),
            )
            .unwrap();
        *own_id.lock().unwrap() = Some(id);

        clock.advance(Duration::from_millis(10));
        scheduler.tick();

        assert!(!handle.is_scheduled(id));
        assert_eq!(scheduler.callback_count(), 0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, operations should safely no-op
        assert!(handle
            .schedule_repeating(Duration::from_millis(10), Box::new(|| TickFlow::Continue))
            .is_none());
    }

    #[test]
    fn test_background_thread_fires_callbacks() {
        let mut scheduler = AnimationScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.schedule_repeating(
            Duration::from_millis(1),
            counting_callback(&fired, TickFlow::Continue),
        );

        scheduler.start_background();
        assert!(scheduler.is_background_running());

        let deadline = Instant::now() + Duration::from_secs(2);
        while fired.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        scheduler.stop_background();
        assert!(!scheduler.is_background_running());
        assert!(fired.load(Ordering::SeqCst) > 0);
    }
}
