//! Watchers: registered observers notified whenever a signal on their
//! sensitivity list changes, carrying forward a set of watched signals and
//! an ordered list of live trackers.

use std::collections::HashMap;

use crate::error::VcdError;
use crate::idcode::IdCode;
use crate::symbol::SymbolTable;
use crate::tracker::Tracker;
use crate::value::Value;

/// The activity (changed, sensitivity-list signals) and pre-step value
/// snapshot (all watched signals) a watcher or tracker sees on one
/// notification, plus read access to the symbol table for XMR lookups.
pub struct NotifyContext<'a> {
    /// The simulation time of the timestep being committed.
    pub time: u64,
    /// Sensitivity-list signals that changed this timestep, keyed by
    /// identifier code.
    pub activity: &'a HashMap<IdCode, Value>,
    /// Every watched signal's value as of *before* this timestep's changes
    /// were applied.
    pub values: &'a HashMap<IdCode, Value>,
    /// The file's symbol table, for resolving XMRs not already on the watch
    /// set.
    pub symbols: &'a SymbolTable,
}

impl<'a> NotifyContext<'a> {
    /// Resolves a dotted XMR against the symbol table and looks its current
    /// pre-step value up in `values`.
    ///
    /// This is the explicit accessor capability that replaces dynamic
    /// attribute access on watched signals: `ctx.get("top.m1.clk")` instead
    /// of a magic attribute lookup.
    pub fn get(&self, xmr: &str) -> Result<&Value, VcdError> {
        let id = self.symbols.get_id(xmr)?;
        self.values.get(&id).ok_or_else(|| VcdError::UnknownIdCode {
            id: id.as_str().to_string(),
        })
    }
}

/// Per-instance state every [`Watcher`] implementation embeds.
///
/// Building the sensitivity and watch lists here, as plain `Vec` fields on
/// the implementing struct, is what keeps them per-instance: nothing is
/// shared across watcher instances by construction.
pub struct WatcherState {
    hierarchy: String,
    sensitive: Vec<String>,
    watching: Vec<String>,
    sensitive_ids: Vec<IdCode>,
    watching_ids: Vec<IdCode>,
    trackers: Vec<Box<dyn Tracker>>,
}

impl WatcherState {
    /// Creates watcher state rooted at the given default hierarchy prefix.
    pub fn new(hierarchy: impl Into<String>) -> Self {
        Self {
            hierarchy: hierarchy.into(),
            sensitive: Vec::new(),
            watching: Vec::new(),
            sensitive_ids: Vec::new(),
            watching_ids: Vec::new(),
            trackers: Vec::new(),
        }
    }

    /// Adds `signal` (relative to the default hierarchy) to both the
    /// sensitivity list and the watch list — the sensitivity list is always
    /// a subset of the watch list, so sensitivity implies watching.
    pub fn add_sensitive(&mut self, signal: &str) {
        let xmr = format!("{}.{signal}", self.hierarchy);
        self.sensitive.push(xmr.clone());
        self.watching.push(xmr);
    }

    /// Adds `signal` (relative to the default hierarchy) to the watch list
    /// only.
    pub fn add_watching(&mut self, signal: &str) {
        self.watching.push(format!("{}.{signal}", self.hierarchy));
    }

    /// Resolves every sensitivity/watch XMR into an identifier code. Must be
    /// called once the symbol table is complete (at `$enddefinitions`).
    pub fn resolve_ids(&mut self, symbols: &SymbolTable) -> Result<(), VcdError> {
        self.sensitive_ids = self
            .sensitive
            .iter()
            .map(|xmr| symbols.get_id(xmr))
            .collect::<Result<_, _>>()?;
        self.watching_ids = self
            .watching
            .iter()
            .map(|xmr| symbols.get_id(xmr))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Resolved sensitivity-list identifier codes.
    pub fn sensitive_ids(&self) -> &[IdCode] {
        &self.sensitive_ids
    }

    /// Resolved watch-list identifier codes.
    pub fn watching_ids(&self) -> &[IdCode] {
        &self.watching_ids
    }
}

/// A registered observer of a VCD value-change stream.
///
/// Implementors embed a [`WatcherState`] and expose it through
/// [`Watcher::state`]/[`Watcher::state_mut`]. The default [`Watcher::notify`]
/// and [`Watcher::manage_trackers`] bodies implement the three-phase
/// tracker lifecycle (start, update, retire) in terms of that state and the
/// two required hooks, [`Watcher::start_tracker`] and
/// [`Watcher::create_tracker`].
pub trait Watcher {
    /// Returns a shared reference to this watcher's state.
    fn state(&self) -> &WatcherState;

    /// Returns a mutable reference to this watcher's state.
    fn state_mut(&mut self) -> &mut WatcherState;

    /// Whether a new tracker should be started this notification. Called
    /// once per notification, before any existing tracker is updated.
    fn start_tracker(&self, _ctx: &NotifyContext) -> bool {
        false
    }

    /// Constructs a fresh tracker instance when [`Watcher::start_tracker`]
    /// returns true.
    fn create_tracker(&self) -> Box<dyn Tracker>;

    /// Whether this notification should run the tracker lifecycle at all.
    ///
    /// Overriding this is how a watcher implements gating (e.g. only
    /// managing trackers on a clock edge, or suppressing tracker updates
    /// while a reset signal is asserted) without touching the default
    /// three-phase lifecycle itself.
    fn should_manage_trackers(&mut self, _ctx: &NotifyContext) -> bool {
        true
    }

    /// Entry point called by the change engine once per timestep this
    /// watcher has sensitivity-list activity.
    fn notify(&mut self, ctx: &NotifyContext) {
        if self.should_manage_trackers(ctx) {
            self.manage_trackers(ctx);
        }
    }

    /// Runs the start/update/retire phases over this watcher's live
    /// trackers.
    ///
    /// Retirement happens in its own pass, after every live tracker has
    /// been updated, so a tracker that finishes mid-update is never removed
    /// from the list while it is still being iterated.
    fn manage_trackers(&mut self, ctx: &NotifyContext) {
        if self.start_tracker(ctx) {
            let tracker = self.create_tracker();
            self.state_mut().trackers.push(tracker);
        }

        for tracker in self.state_mut().trackers.iter_mut() {
            tracker.update(ctx);
        }

        self.state_mut().trackers.retain(|t| !t.finished());
    }

    /// The watcher's currently live trackers, in start order.
    fn trackers(&self) -> &[Box<dyn Tracker>] {
        &self.state().trackers
    }
}
