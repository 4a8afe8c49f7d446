//! Keystream diagnostics (`pontifex keystream`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pontifex::KeyGenerator;

use crate::cli::utils::load_deck;

/// Arguments for `pontifex keystream`.
#[derive(Args, Debug)]
pub struct KeystreamArgs {
    /// Key file holding the deck ordering.
    #[arg(short = 'd', long = "deck")]
    pub deck: PathBuf,
    /// Number of key values to print.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,
}

/// Execute `pontifex keystream`.
pub fn handle(args: KeystreamArgs) -> Result<()> {
    let mut keys = KeyGenerator::new(load_deck(&args.deck)?);
    let values: Vec<String> = keys
        .keystream(args.count)
        .iter()
        .map(u8::to_string)
        .collect();
    println!("{}", values.join(" "));
    Ok(())
}
