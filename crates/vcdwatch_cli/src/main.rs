//! vcdwatch CLI — inspect and watch Value Change Dump (VCD) files.
//!
//! Provides `vcdwatch nets` for listing every signal declared in a VCD file,
//! and `vcdwatch watch` for registering a TOML-configured set of watchers and
//! streaming their activity reports as the file is parsed.

#![warn(missing_docs)]

mod nets;
mod watch;

use std::process;

use clap::{Parser, Subcommand};

/// vcdwatch — a streaming VCD parser and watcher/tracker runtime.
#[derive(Parser, Debug)]
#[command(name = "vcdwatch", version, about = "VCD inspection and watching")]
pub struct Cli {
    /// Suppress non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every XMR declared in a VCD file.
    Nets(NetsArgs),
    /// Register configured watchers and stream their activity reports.
    Watch(WatchArgs),
}

/// Arguments for the `vcdwatch nets` subcommand.
#[derive(Parser, Debug)]
pub struct NetsArgs {
    /// Path to the VCD file.
    pub file: String,
}

/// Arguments for the `vcdwatch watch` subcommand.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Path to the VCD file.
    pub file: String,

    /// Path to a watch configuration TOML file. Without it, no watcher is
    /// registered and the file is simply validated.
    #[arg(long)]
    pub config: Option<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalArgs { quiet: cli.quiet };

    let result = match cli.command {
        Command::Nets(ref args) => nets::run(args, &global),
        Command::Watch(ref args) => watch::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_nets() {
        let cli = Cli::parse_from(["vcdwatch", "nets", "dump.vcd"]);
        match cli.command {
            Command::Nets(ref args) => assert_eq!(args.file, "dump.vcd"),
            _ => panic!("expected Nets command"),
        }
    }

    #[test]
    fn parse_watch_without_config() {
        let cli = Cli::parse_from(["vcdwatch", "watch", "dump.vcd"]);
        match cli.command {
            Command::Watch(ref args) => {
                assert_eq!(args.file, "dump.vcd");
                assert!(args.config.is_none());
            }
            _ => panic!("expected Watch command"),
        }
    }

    #[test]
    fn parse_watch_with_config() {
        let cli = Cli::parse_from(["vcdwatch", "watch", "dump.vcd", "--config", "watch.toml"]);
        match cli.command {
            Command::Watch(ref args) => {
                assert_eq!(args.config.as_deref(), Some("watch.toml"));
            }
            _ => panic!("expected Watch command"),
        }
    }

    #[test]
    fn parse_quiet_flag() {
        let cli = Cli::parse_from(["vcdwatch", "--quiet", "nets", "dump.vcd"]);
        assert!(cli.quiet);
    }
}
