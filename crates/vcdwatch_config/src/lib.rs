//! TOML-driven watch configuration: a list of watchers to register before
//! parsing a VCD file, read from a `[[watcher]]`-table file.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;
pub mod watcher;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{WatchConfig, WatcherSpec};
pub use watcher::ConfiguredWatcher;
