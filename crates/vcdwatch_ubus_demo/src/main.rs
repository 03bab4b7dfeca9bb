//! Worked example: a watcher/tracker pair that recognises completed UBUS
//! transactions in a VCD dump.
//!
//! UBUS is the small arbitrated bus protocol traditionally used to teach
//! transaction-level watchers: one master drives `sig_request`/`sig_addr`,
//! the arbiter drives `sig_grant`, and a completed read or write is bounded
//! by `sig_start` going high and `sig_wait` going low. The watcher gates the
//! whole tracker lifecycle on two conditions the original example hard-coded
//! in its `update` method: no tracker activity while `sig_reset` is high, and
//! trackers only advance on the rising edge of `sig_clock`.

use std::cell::RefCell;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::rc::Rc;

use vcdwatch_core::{decode, NotifyContext, Parser, Tracker, TrackerState, Value, Watcher, WatcherState};
use vcdwatch_common::Logic;

const HIERARCHY: &str = "ubus_tb_top.vif";

const WATCHED: &[&str] = &[
    "sig_request",
    "sig_grant",
    "sig_addr",
    "sig_size",
    "sig_read",
    "sig_write",
    "sig_start",
    "sig_bip",
    "sig_data",
    "sig_data_out",
    "sig_wait",
    "sig_error",
];

fn is_one(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Scalar(Logic::One)))
}

/// The transaction-recording state machine for one UBUS read or write.
///
/// `sig_start` going high opens the transaction and latches address,
/// direction and size; the tracker then waits out `sig_wait`, and on the
/// first cycle `sig_wait` is low it reads the data bus (`sig_data` for a
/// write, `sig_data_out` for a read) and finishes.
struct UbusTracker {
    state: TrackerState,
    phase: Phase,
    addr: Option<u128>,
    is_write: bool,
    log: Rc<RefCell<Vec<String>>>,
}

#[derive(PartialEq)]
enum Phase {
    Started,
    WaitingOnBus,
}

impl UbusTracker {
    fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            state: TrackerState::new(),
            phase: Phase::Started,
            addr: None,
            is_write: false,
            log,
        }
    }
}

impl Tracker for UbusTracker {
    fn state(&self) -> &TrackerState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut TrackerState {
        &mut self.state
    }
    fn update(&mut self, ctx: &NotifyContext) {
        self.state.record_trigger();

        if self.phase == Phase::Started {
            self.is_write = is_one(ctx.get("ubus_tb_top.vif.sig_write").ok());
            self.addr = ctx
                .get("ubus_tb_top.vif.sig_addr")
                .ok()
                .and_then(|v| decode::to_integer(v).ok());
            self.phase = Phase::WaitingOnBus;
            return;
        }

        let waiting = is_one(ctx.get("ubus_tb_top.vif.sig_wait").ok());
        if waiting {
            return;
        }

        let data_xmr = if self.is_write {
            "ubus_tb_top.vif.sig_data"
        } else {
            "ubus_tb_top.vif.sig_data_out"
        };
        let data = ctx.get(data_xmr).ok().and_then(|v| decode::to_integer(v).ok());

        let kind = if self.is_write { "WRITE" } else { "READ" };
        let line = match (self.addr, data) {
            (Some(addr), Some(data)) => format!("{kind} addr=0x{addr:x} data=0x{data:x}"),
            (Some(addr), None) => format!("{kind} addr=0x{addr:x} data=<x>"),
            _ => format!("{kind} addr=<x> data=<x>"),
        };
        println!("{line}");
        self.log.borrow_mut().push(line);
        self.state.finish();
    }
}

/// Watches a UBUS-style interface, gated by reset and the rising clock edge.
struct UbusWatcher {
    state: WatcherState,
    in_reset: bool,
    log: Rc<RefCell<Vec<String>>>,
}

impl UbusWatcher {
    fn new() -> Self {
        let mut state = WatcherState::new(HIERARCHY);
        state.add_sensitive("sig_clock");
        state.add_sensitive("sig_reset");
        for signal in WATCHED {
            state.add_watching(signal);
        }
        Self {
            state,
            in_reset: false,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A shared handle onto every completed transaction line this watcher's
    /// trackers have recorded, in completion order. Kept readable after the
    /// watcher itself is boxed and registered with a [`Parser`].
    fn log(&self) -> Rc<RefCell<Vec<String>>> {
        self.log.clone()
    }
}

impl Watcher for UbusWatcher {
    fn state(&self) -> &WatcherState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut WatcherState {
        &mut self.state
    }
    fn create_tracker(&self) -> Box<dyn Tracker> {
        self.log.borrow_mut().push("tracker started".to_string());
        Box::new(UbusTracker::new(self.log.clone()))
    }
    fn start_tracker(&self, ctx: &NotifyContext) -> bool {
        is_one(ctx.get("ubus_tb_top.vif.sig_start").ok())
    }
    fn should_manage_trackers(&mut self, ctx: &NotifyContext) -> bool {
        // Reset and clock are both on the sensitivity list, so their
        // just-changed value for this notification lives in `activity`, not
        // in the pre-step `values` snapshot — reading `ctx.get` here would
        // see last cycle's value instead of the edge that triggered us.
        if let Ok(reset_id) = ctx.symbols.get_id("ubus_tb_top.vif.sig_reset") {
            match ctx.activity.get(&reset_id) {
                Some(Value::Scalar(Logic::One)) => self.in_reset = true,
                Some(Value::Scalar(Logic::Zero)) => self.in_reset = false,
                _ => {}
            }
        }
        if self.in_reset {
            return false;
        }
        let clock_is_one = ctx
            .symbols
            .get_id("ubus_tb_top.vif.sig_clock")
            .ok()
            .and_then(|id| ctx.activity.get(&id))
            .map(|v| matches!(v, Value::Scalar(Logic::One)))
            .unwrap_or(false);
        clock_is_one
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1).ok_or("usage: vcdwatch_ubus_demo <file.vcd>")?;

    let mut parser = Parser::new();
    parser.register_watcher(Box::new(UbusWatcher::new()));

    let file = File::open(&path)?;
    parser.parse(BufReader::new(file))?;

    Ok(())
}
