//! `vcdwatch watch` — register TOML-configured watchers and stream their
//! activity reports while parsing a VCD file.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use vcdwatch_config::{load_config, ConfiguredWatcher, WatchConfig};
use vcdwatch_core::Parser;

use crate::{GlobalArgs, WatchArgs};

/// Runs the `vcdwatch watch` command.
pub fn run(args: &WatchArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => load_config(std::path::Path::new(path))?,
        None => WatchConfig::default(),
    };

    if !global.quiet {
        eprintln!(
            "   Watching {} with {} configured watcher(s)",
            args.file,
            config.watchers.len()
        );
    }

    let mut parser = Parser::new();
    let mut sinks = Vec::with_capacity(config.watchers.len());
    for spec in &config.watchers {
        let watcher = ConfiguredWatcher::from_spec(spec);
        sinks.push(watcher.report_sink());
        parser.register_watcher(Box::new(watcher));
    }

    let file = File::open(&args.file)?;
    parser.parse(BufReader::new(file))?;

    for sink in &sinks {
        for line in sink.borrow().iter() {
            println!("{line}");
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VCD: &str = "\
$timescale 1 ns $end
$scope module top $end
$var wire 1 ! clk $end
$var wire 8 \" data $end
$upscope $end
$enddefinitions $end
#0
x!
b00000000 \"
#5
1!
b00000001 \"
#10
0!
";

    fn write_vcd() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(VCD.as_bytes()).unwrap();
        f
    }

    #[test]
    fn watch_without_config_just_validates() {
        let f = write_vcd();
        let args = WatchArgs {
            file: f.path().to_str().unwrap().to_string(),
            config: None,
        };
        let global = GlobalArgs { quiet: true };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn watch_with_config_reports_activity() {
        let f = write_vcd();
        let mut cfg = tempfile::NamedTempFile::new().unwrap();
        cfg.write_all(
            b"[[watcher]]\nhierarchy = \"top\"\nsensitive = [\"clk\"]\nwatching = [\"data\"]\n",
        )
        .unwrap();

        let args = WatchArgs {
            file: f.path().to_str().unwrap().to_string(),
            config: Some(cfg.path().to_str().unwrap().to_string()),
        };
        let global = GlobalArgs { quiet: true };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn missing_vcd_file_is_error() {
        let args = WatchArgs {
            file: "/nonexistent/dump.vcd".to_string(),
            config: None,
        };
        let global = GlobalArgs { quiet: true };
        assert!(run(&args, &global).is_err());
    }

    #[test]
    fn missing_config_file_is_error() {
        let f = write_vcd();
        let args = WatchArgs {
            file: f.path().to_str().unwrap().to_string(),
            config: Some("/nonexistent/watch.toml".to_string()),
        };
        let global = GlobalArgs { quiet: true };
        assert!(run(&args, &global).is_err());
    }
}
