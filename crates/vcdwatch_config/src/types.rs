//! Configuration types deserialized from a watch configuration file.

use serde::Deserialize;

/// A TOML-driven set of watchers to register before parsing a VCD file.
///
/// ```toml
/// [[watcher]]
/// hierarchy = "ubus_tb_top.vif"
/// sensitive = ["sig_clock"]
/// watching = ["sig_addr", "sig_data"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct WatchConfig {
    /// One entry per watcher to register, in file order.
    #[serde(default, rename = "watcher")]
    pub watchers: Vec<WatcherSpec>,
}

/// One `[[watcher]]` table: a default hierarchy prefix plus sensitivity and
/// watch lists, relative to that prefix.
#[derive(Debug, Deserialize)]
pub struct WatcherSpec {
    /// Default hierarchy prefix every signal name in `sensitive`/`watching`
    /// is resolved against.
    pub hierarchy: String,
    /// Signal names (relative to `hierarchy`) that trigger a notification
    /// when they change.
    #[serde(default)]
    pub sensitive: Vec<String>,
    /// Signal names (relative to `hierarchy`) whose pre-step values are
    /// visible on notification, in addition to `sensitive`.
    #[serde(default)]
    pub watching: Vec<String>,
}
