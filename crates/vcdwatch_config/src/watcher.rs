//! The generic watcher every `[[watcher]]` table in a [`crate::WatchConfig`]
//! becomes: reports its activity on every notification, starts no tracker.

use std::cell::RefCell;
use std::rc::Rc;

use vcdwatch_core::{NotifyContext, Tracker, TrackerState, Watcher, WatcherState};

use crate::types::WatcherSpec;

/// A tracker that is never started by [`ConfiguredWatcher`]; it exists only
/// to satisfy [`Watcher::create_tracker`]'s signature.
struct NoopTracker {
    state: TrackerState,
}

impl Tracker for NoopTracker {
    fn state(&self) -> &TrackerState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut TrackerState {
        &mut self.state
    }
    fn update(&mut self, _ctx: &NotifyContext) {}
}

/// A watcher built from a `[[watcher]]` TOML table: reports every timestep
/// its sensitivity list fires, with no programmatic tracker.
///
/// Trackers are a programmatic capability; a TOML table has no way to
/// describe a transaction-recording state machine, so a configured watcher
/// never starts one.
pub struct ConfiguredWatcher {
    state: WatcherState,
    reports: Rc<RefCell<Vec<String>>>,
}

impl ConfiguredWatcher {
    /// Builds a watcher from one `[[watcher]]` table. Call
    /// [`vcdwatch_core::WatcherState::resolve_ids`] (via the parser, at
    /// `$enddefinitions`) before the first notification.
    ///
    /// The returned watcher is typically boxed and moved into a parser's
    /// registry immediately; keep the sink handle from
    /// [`ConfiguredWatcher::report_sink`] (taken before the move) to read its
    /// report lines back afterward.
    pub fn from_spec(spec: &WatcherSpec) -> Self {
        let mut state = WatcherState::new(spec.hierarchy.clone());
        for signal in &spec.sensitive {
            state.add_sensitive(signal);
        }
        for signal in &spec.watching {
            state.add_watching(signal);
        }
        Self {
            state,
            reports: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A shared handle onto this watcher's report buffer, for reading its
    /// lines back after the watcher itself has been moved into a parser's
    /// registry.
    pub fn report_sink(&self) -> Rc<RefCell<Vec<String>>> {
        self.reports.clone()
    }

    /// Every report line produced so far, in notification order.
    pub fn reports(&self) -> Vec<String> {
        self.reports.borrow().clone()
    }
}

impl Watcher for ConfiguredWatcher {
    fn state(&self) -> &WatcherState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut WatcherState {
        &mut self.state
    }
    fn create_tracker(&self) -> Box<dyn Tracker> {
        Box::new(NoopTracker {
            state: TrackerState::new(),
        })
    }
    fn notify(&mut self, ctx: &NotifyContext) {
        let mut ids: Vec<_> = ctx.activity.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let mut parts = vec![format!("t={}", ctx.time)];
        for id in ids {
            if let (Ok(xmr), Some(value)) = (ctx.symbols.get_xmr(&id), ctx.activity.get(&id)) {
                parts.push(format!("{xmr}={value:?}"));
            }
        }
        self.reports.borrow_mut().push(parts.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use vcdwatch_core::{IdCode, SymbolTable, Value};
    use vcdwatch_common::Logic;

    fn spec() -> WatcherSpec {
        WatcherSpec {
            hierarchy: "top".into(),
            sensitive: vec!["clk".into()],
            watching: vec!["data".into()],
        }
    }

    #[test]
    fn from_spec_resolves_sensitive_and_watching_xmrs() {
        let mut symbols = SymbolTable::new();
        symbols.declare(
            IdCode::new("!"),
            vcdwatch_core::VarDecl {
                var_type: "wire".into(),
                width: 1,
                path: vec!["top".into(), "clk".into()],
                bit_range: None,
            },
        );
        symbols.declare(
            IdCode::new("\""),
            vcdwatch_core::VarDecl {
                var_type: "wire".into(),
                width: 1,
                path: vec!["top".into(), "data".into()],
                bit_range: None,
            },
        );
        let mut watcher = ConfiguredWatcher::from_spec(&spec());
        watcher.state_mut().resolve_ids(&symbols).unwrap();
        assert_eq!(watcher.state().sensitive_ids(), &[IdCode::new("!")]);
    }

    #[test]
    fn notify_records_one_report_line_per_call() {
        let mut symbols = SymbolTable::new();
        symbols.declare(
            IdCode::new("!"),
            vcdwatch_core::VarDecl {
                var_type: "wire".into(),
                width: 1,
                path: vec!["top".into(), "clk".into()],
                bit_range: None,
            },
        );
        let mut watcher = ConfiguredWatcher::from_spec(&spec());

        let mut activity = HashMap::new();
        activity.insert(IdCode::new("!"), Value::Scalar(Logic::One));
        let values = HashMap::new();
        let ctx = NotifyContext {
            time: 5,
            activity: &activity,
            values: &values,
            symbols: &symbols,
        };
        watcher.notify(&ctx);
        let reports = watcher.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("top.clk"));
    }

    #[test]
    fn report_sink_reads_back_after_watcher_is_boxed() {
        let mut symbols = SymbolTable::new();
        symbols.declare(
            IdCode::new("!"),
            vcdwatch_core::VarDecl {
                var_type: "wire".into(),
                width: 1,
                path: vec!["top".into(), "clk".into()],
                bit_range: None,
            },
        );
        let watcher = ConfiguredWatcher::from_spec(&spec());
        let sink = watcher.report_sink();
        let mut boxed: Box<dyn vcdwatch_core::Watcher> = Box::new(watcher);

        let mut activity = HashMap::new();
        activity.insert(IdCode::new("!"), Value::Scalar(Logic::One));
        let values = HashMap::new();
        let ctx = NotifyContext {
            time: 1,
            activity: &activity,
            values: &values,
            symbols: &symbols,
        };
        boxed.notify(&ctx);

        assert_eq!(sink.borrow().len(), 1);
    }
}
