//! Deck lifecycle commands (`pontifex deck ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pontifex::{Deck, KeyFile};

use crate::cli::utils::load_deck;

/// Supported `pontifex deck` subcommands.
#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    /// Generate a new randomly shuffled key file.
    New(DeckNewArgs),
    /// Import a plain card list into a key file with metadata.
    Import(DeckImportArgs),
    /// Show key file metadata and fingerprint.
    Info(DeckInfoArgs),
    /// Print the deck's circular order from the top card.
    Show(DeckShowArgs),
}

/// Arguments for `pontifex deck new`.
#[derive(Args, Debug)]
pub struct DeckNewArgs {
    /// Output key file path.
    pub path: PathBuf,
    /// Optional label stored in the header.
    #[arg(short = 'l', long)]
    pub label: Option<String>,
    /// Write the plain integer format instead of JSON.
    #[arg(long)]
    pub plain: bool,
}

/// Arguments for `pontifex deck import`.
#[derive(Args, Debug)]
pub struct DeckImportArgs {
    /// Plain card list to import (28 whitespace-separated values).
    pub source: PathBuf,
    /// Output key file.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Optional label stored in the header.
    #[arg(short = 'l', long)]
    pub label: Option<String>,
}

/// Arguments for `pontifex deck info`.
#[derive(Args, Debug)]
pub struct DeckInfoArgs {
    /// Key file to inspect.
    pub path: PathBuf,
}

/// Arguments for `pontifex deck show`.
#[derive(Args, Debug)]
pub struct DeckShowArgs {
    /// Key file to render.
    pub path: PathBuf,
}

/// Execute a deck command.
pub fn handle(command: DeckCommand) -> Result<()> {
    match command {
        DeckCommand::New(args) => new(args),
        DeckCommand::Import(args) => import(args),
        DeckCommand::Info(args) => info(args),
        DeckCommand::Show(args) => show(args),
    }
}

fn new(args: DeckNewArgs) -> Result<()> {
    let deck = Deck::new_and_shuffled(&mut rand::rng());
    let mut keyfile = KeyFile::new(&deck, args.label.clone());
    keyfile.log_action("deck new");
    if args.plain {
        keyfile.save_plain(&args.path)?;
    } else {
        keyfile.save(&args.path)?;
    }
    println!(
        "Created deck {} (fingerprint {})",
        args.path.display(),
        keyfile.fingerprint()
    );
    Ok(())
}

fn import(args: DeckImportArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.source)
        .with_context(|| format!("failed to read {}", args.source.display()))?;
    let parsed = KeyFile::parse_plain(&contents)
        .with_context(|| format!("failed to parse {}", args.source.display()))?;
    let deck = parsed
        .to_deck()
        .with_context(|| format!("invalid deck in {}", args.source.display()))?;
    let mut keyfile = KeyFile::new(&deck, args.label.clone());
    keyfile.log_action(format!("import from {}", args.source.display()));
    keyfile.save(&args.output)?;
    println!(
        "Imported {} into {} (fingerprint {})",
        args.source.display(),
        args.output.display(),
        keyfile.fingerprint()
    );
    Ok(())
}

fn info(args: DeckInfoArgs) -> Result<()> {
    let keyfile = KeyFile::load(&args.path)?;
    keyfile
        .to_deck()
        .with_context(|| format!("invalid deck in {}", args.path.display()))?;
    println!("Key file: {}", args.path.display());
    println!("Cards: {}", keyfile.cards.len());
    println!("Created: {}", keyfile.header.created_at);
    if let Some(label) = &keyfile.header.label {
        println!("Label: {}", label);
    }
    println!("Fingerprint: {}", keyfile.fingerprint());
    println!("History entries: {}", keyfile.header.history.len());
    Ok(())
}

fn show(args: DeckShowArgs) -> Result<()> {
    let deck = load_deck(&args.path)?;
    println!("{deck}");
    println!("rear: {}", deck.rear_value());
    Ok(())
}
