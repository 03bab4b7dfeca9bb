//! The change engine: the per-timestep change buffer, the persistent
//! watched-values store, and the timestep commit protocol that notifies
//! watchers.

use std::collections::HashMap;

use crate::idcode::IdCode;
use crate::symbol::SymbolTable;
use crate::value::Value;
use crate::watcher::{NotifyContext, Watcher};
use vcdwatch_common::Logic;

/// Owns the change buffer and the persistent watched-values store, and
/// drives the timestep commit protocol.
#[derive(Default)]
pub struct ChangeEngine {
    /// Changes recorded since the last commit, keyed by identifier code.
    /// Last write for a given id within a timestep wins.
    changes: HashMap<IdCode, Value>,
    /// The persistent, pre-step value of every signal any watcher watches.
    watched: HashMap<IdCode, Value>,
    now: u64,
    then: u64,
}

impl ChangeEngine {
    /// Creates an empty change engine at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current simulation time (the time of the most recent `#<n>`
    /// token processed).
    pub fn now(&self) -> u64 {
        self.now
    }

    /// The simulation time before the current timestep began.
    pub fn then(&self) -> u64 {
        self.then
    }

    /// Records a value change for `id` in the current timestep's change
    /// buffer, overwriting any earlier value recorded for the same id this
    /// timestep.
    pub fn record(&mut self, id: IdCode, value: Value) {
        self.changes.insert(id, value);
    }

    /// Initializes the watched-values store for every id in `ids` to
    /// `Scalar(X)`, if not already present. Called once at
    /// `$enddefinitions` for every watcher's watch set.
    pub fn init_watched<I: IntoIterator<Item = IdCode>>(&mut self, ids: I) {
        for id in ids {
            self.watched.entry(id).or_insert(Value::Scalar(Logic::X));
        }
    }

    /// Runs the timestep commit protocol for `next_time`:
    ///
    /// 1. For each watcher, in registration order, compute its activity
    ///    (sensitivity-list ids that changed this timestep). If activity is
    ///    non-empty, compute a pre-step snapshot of its watch set from the
    ///    persistent store and notify it.
    /// 2. Once every watcher has been notified, advance the persistent
    ///    store from the change buffer (only for ids already in the store)
    ///    and clear the change buffer.
    /// 3. Advance `then`/`now`.
    pub fn commit_timestep(
        &mut self,
        next_time: u64,
        watchers: &mut [Option<Box<dyn Watcher>>],
        symbols: &SymbolTable,
    ) {
        for watcher in watchers.iter_mut().filter_map(|w| w.as_mut()) {
            let sensitive_ids = watcher.state().sensitive_ids().to_vec();
            let mut activity = HashMap::new();
            for id in &sensitive_ids {
                if let Some(v) = self.changes.get(id) {
                    activity.insert(id.clone(), v.clone());
                }
            }
            if activity.is_empty() {
                continue;
            }

            let watching_ids = watcher.state().watching_ids().to_vec();
            let mut values = HashMap::new();
            for id in &watching_ids {
                if let Some(v) = self.watched.get(id) {
                    values.insert(id.clone(), v.clone());
                }
            }

            let ctx = NotifyContext {
                time: self.now,
                activity: &activity,
                values: &values,
                symbols,
            };
            watcher.notify(&ctx);
        }

        for (id, value) in &self.changes {
            if self.watched.contains_key(id) {
                self.watched.insert(id.clone(), value.clone());
            }
        }

        self.changes.clear();
        self.then = self.now;
        self.now = next_time;
    }

    /// Commits any changes recorded since the last `#<n>` token, as if one
    /// more timestep boundary occurred at the current time. A VCD file is
    /// not required to close its simulation section with a trailing `#`, so
    /// without this the last value change in the file would sit in the
    /// buffer forever and never reach a watcher. No-op if nothing is
    /// pending.
    pub fn flush(&mut self, watchers: &mut [Option<Box<dyn Watcher>>], symbols: &SymbolTable) {
        if self.changes.is_empty() {
            return;
        }
        let now = self.now;
        self.commit_timestep(now, watchers, symbols);
    }
}
