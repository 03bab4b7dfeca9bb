//! Streaming parser and watcher/tracker runtime for Value Change Dump (VCD)
//! files, per IEEE 1800-2009 §21.7.
//!
//! A VCD file has two sections: a header declaring the scope hierarchy and
//! every signal's identifier code, and a simulation section of timestamped
//! value changes. This crate tokenises the file once, builds a symbol table
//! from the header, and streams the simulation section through a set of
//! registered watchers, each with a sensitivity list (signals that trigger a
//! notification) and a watch list (signals whose pre-step values it can
//! read). Watchers own trackers, per-transaction state machines started and
//! retired across a sequence of notifications.
//!
//! # Usage
//!
//! ```ignore
//! use vcdwatch_core::Parser;
//!
//! let mut parser = Parser::new();
//! parser.parse(reader)?;
//! for xmr in parser.show_nets()? {
//!     println!("{xmr}");
//! }
//! ```
//!
//! # Modules
//!
//! - `error` — parse and lookup failure types
//! - `idcode` — the opaque simulator-assigned identifier code
//! - `value` — the four-state scalar/vector value model
//! - `decode` — arithmetic decode helpers, the one place values are interpreted
//! - `token` — the streaming word tokeniser
//! - `symbol` — the identifier-code-to-declaration symbol table
//! - `header` — the declaration-section parser
//! - `tracker` — per-transaction recording state machines
//! - `watcher` — sensitivity-list-driven observers that own trackers
//! - `engine` — the change buffer and timestep commit protocol
//! - `parser` — the top-level entry point tying every module together

#![warn(missing_docs)]

pub mod decode;
pub mod engine;
pub mod error;
pub mod header;
pub mod idcode;
pub mod parser;
pub mod symbol;
pub mod token;
pub mod tracker;
pub mod value;
pub mod watcher;

pub use error::VcdError;
pub use idcode::IdCode;
pub use parser::{Parser, WatcherId};
pub use symbol::{SymbolTable, VarDecl};
pub use tracker::{Tracker, TrackerState};
pub use value::{Value, VectorValue};
pub use watcher::{NotifyContext, Watcher, WatcherState};
