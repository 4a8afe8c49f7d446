//! Command-line interface wiring for the `pontifex` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod crypt;
pub mod deck;
pub mod keystream;
pub mod utils;

/// Parsed CLI entrypoint for the `pontifex` binary.
#[derive(Parser, Debug)]
#[command(
    name = "pontifex",
    version,
    about = "Solitaire (Pontifex) 28-card stream cipher"
)]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Deck(deck::DeckCommand),
    /// Encrypt a message with a deck from a key file.
    Encrypt(crypt::EncryptArgs),
    /// Decrypt a message with a deck from a key file.
    Decrypt(crypt::DecryptArgs),
    /// Print upcoming key values from a key file's deck.
    Keystream(keystream::KeystreamArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Deck(cmd) => deck::handle(cmd),
        Command::Encrypt(args) => crypt::encrypt(args),
        Command::Decrypt(args) => crypt::decrypt(args),
        Command::Keystream(args) => keystream::handle(args),
    }
}
