//! `vcdwatch nets` — list every XMR declared in a VCD file.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;

use vcdwatch_core::Parser;

use crate::{GlobalArgs, NetsArgs};

/// Runs the `vcdwatch nets` command.
pub fn run(args: &NetsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    if !global.quiet {
        eprintln!("   Parsing header of {}", args.file);
    }

    let file = File::open(&args.file)?;
    let mut parser = Parser::new();
    parser.parse_header_only(BufReader::new(file))?;

    for xmr in parser.show_nets()? {
        println!("{xmr}");
    }

    Ok(0)
}
