//! Trackers: per-transaction recording state machines owned by a watcher.
//!
//! A tracker is started by its owning watcher, receives the same activity
//! and pre-step value snapshot the watcher does on every subsequent
//! notification, and eventually marks itself finished so the watcher can
//! retire it. `finished` is monotonic — once true, a tracker is never
//! revived.

use crate::watcher::NotifyContext;

/// Per-instance state every [`Tracker`] implementation embeds.
///
/// Keeping this as a field on the implementing struct (rather than a class
/// attribute, as the original Python base class used) is what makes
/// per-tracker state structural instead of accidentally shared.
#[derive(Debug, Default, Clone)]
pub struct TrackerState {
    finished: bool,
    trigger_count: u64,
}

impl TrackerState {
    /// Creates fresh, not-yet-triggered tracker state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once this tracker has recorded a completed transaction.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Marks this tracker finished. Idempotent.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Number of times [`Tracker::update`] has run for this tracker.
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count
    }

    /// Increments the trigger count. Called once per `update`.
    pub fn record_trigger(&mut self) {
        self.trigger_count += 1;
    }
}

/// A transaction-recording state machine.
///
/// Implementors hold a [`TrackerState`] field and expose it through
/// [`Tracker::state`]/[`Tracker::state_mut`]; [`Tracker::finished`] has a
/// default body built on top of that accessor.
pub trait Tracker {
    /// Returns a shared reference to this tracker's state.
    fn state(&self) -> &TrackerState;

    /// Returns a mutable reference to this tracker's state.
    fn state_mut(&mut self) -> &mut TrackerState;

    /// Whether this tracker has finished recording and should be retired.
    fn finished(&self) -> bool {
        self.state().is_finished()
    }

    /// Called once per notification the owning watcher passes through,
    /// with the same activity/value snapshot the watcher received.
    fn update(&mut self, ctx: &NotifyContext);
}
