//! mica-parse CLI - parse mica source and inspect the resulting trees
//!
//! Examples:
//!   mica-parse program.mica              # s-expression dump
//!   mica-parse --format json -e "x = 1"  # JSON dump of a snippet
//!   mica-parse -L -e "if x then y end"   # per-node source-map bands
//!   mica-parse -E -e "x + 1"             # narrate tokenization

use anyhow::Context;
use clap::Parser;
use mica_parse::mica::runner::{Options, Runner};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = Options::parse();
    let code = Runner::new(options)
        .run()
        .context("mica-parse failed")?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
