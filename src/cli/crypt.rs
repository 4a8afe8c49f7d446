//! Message transforms (`pontifex encrypt` / `pontifex decrypt`).

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use pontifex::Cipher;

use crate::cli::utils::{load_deck, read_text_arg, write_output};

/// Arguments for `pontifex encrypt`.
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Key file holding the deck ordering.
    #[arg(short = 'd', long = "deck")]
    pub deck: PathBuf,
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Write output to a file (`-` for stdout; default prints to stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for `pontifex decrypt`.
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Key file holding the deck ordering.
    #[arg(short = 'd', long = "deck")]
    pub deck: PathBuf,
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Write output to a file (`-` for stdout; default prints to stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute `pontifex encrypt`.
pub fn encrypt(args: EncryptArgs) -> Result<()> {
    let message = read_text_arg(args.text, args.from)?;
    let mut cipher = Cipher::new(load_deck(&args.deck)?);
    emit(cipher.encrypt(&message), args.output.as_deref())
}

/// Execute `pontifex decrypt`.
pub fn decrypt(args: DecryptArgs) -> Result<()> {
    let message = read_text_arg(args.text, args.from)?;
    let mut cipher = Cipher::new(load_deck(&args.deck)?);
    emit(cipher.decrypt(&message), args.output.as_deref())
}

fn emit(result: String, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_output(path, &(result + "\n")),
        None => {
            println!("{result}");
            Ok(())
        }
    }
}
