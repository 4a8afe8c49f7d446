//! Key files: persisted deck orderings with metadata.
//!
//! Two on-disk shapes are accepted: a JSON document carrying a header
//! (version, creation time, label, audit history) next to the card order,
//! and the bare whitespace-separated integer list that older tooling
//! understands. Loading sniffs the shape from the first byte.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::deck::{DECK_SIZE, Deck, InvalidDeckError};

const KEYFILE_VERSION: u8 = 1;

/// Per-file metadata stored next to the card order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyFileHeader {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub history: Vec<AuditEvent>,
}

impl KeyFileHeader {
    /// Create a fresh header with an optional label.
    pub fn new(label: Option<String>) -> Self {
        Self {
            version: KEYFILE_VERSION,
            created_at: Utc::now(),
            label,
            history: Vec::new(),
        }
    }
}

/// Describes how the key file has changed over time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: String,
}

impl AuditEvent {
    /// Create an audit entry using the OS user (if available).
    pub fn new<S: Into<String>>(action: S) -> Self {
        let actor = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            timestamp: Utc::now(),
            actor,
            action: action.into(),
        }
    }
}

/// In-memory representation of a key file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFile {
    pub header: KeyFileHeader,
    /// Card order from the top card down to the rear.
    pub cards: Vec<u8>,
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl KeyFile {
    /// Capture the current order of `deck` under a fresh header.
    pub fn new(deck: &Deck, label: Option<String>) -> Self {
        Self {
            header: KeyFileHeader::new(label),
            cards: deck.cards_from_top().to_vec(),
            path: None,
        }
    }

    /// Load a key file, accepting either the JSON format or a plain
    /// whitespace-separated card list.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to open key file {}", path.display()))?;
        let mut keyfile = if contents.trim_start().starts_with('{') {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse key file {}", path.display()))?
        } else {
            Self::parse_plain(&contents)
                .with_context(|| format!("failed to parse key file {}", path.display()))?
        };
        keyfile.path = Some(path.to_path_buf());
        Ok(keyfile)
    }

    /// Parse the plain format: card values separated by whitespace.
    ///
    /// The plain format carries no metadata, so the header is synthesized
    /// at parse time.
    pub fn parse_plain(contents: &str) -> Result<Self> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for token in contents.split_whitespace() {
            let value: u8 = token
                .parse()
                .map_err(|_| anyhow!("'{}' is not a card value", token))?;
            cards.push(value);
        }
        Ok(Self {
            header: KeyFileHeader::new(None),
            cards,
            path: None,
        })
    }

    /// Save in the JSON format.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize key file")?;
        fs::write(path, json + "\n")
            .with_context(|| format!("failed to write key file {}", path.display()))?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save in the plain format.
    pub fn save_plain(&self, path: &Path) -> Result<()> {
        fs::write(path, self.plain_encoding() + "\n")
            .with_context(|| format!("failed to write key file {}", path.display()))
    }

    /// Validate the stored order and build the deck it describes.
    pub fn to_deck(&self) -> Result<Deck, InvalidDeckError> {
        Deck::from_cards(&self.cards)
    }

    /// Canonical plain encoding: card values from the top, space separated.
    pub fn plain_encoding(&self) -> String {
        self.cards
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// SHA-256 hex digest of the canonical plain encoding, for comparing
    /// deck orderings without printing them.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.plain_encoding().as_bytes());
        let digest = hasher.finalize();
        format!("{digest:02x}")
    }

    /// Append an audit log entry.
    pub fn log_action<S: Into<String>>(&mut self, action: S) {
        self.header.history.push(AuditEvent::new(action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered_deck() -> Deck {
        let cards: Vec<u8> = (1..=28).collect();
        Deck::from_cards(&cards).unwrap()
    }

    #[test]
    fn parse_plain_accepts_spaces_and_newlines() {
        let text = "1 2 3 4 5 6 7\n8 9 10 11 12 13 14\n15 16 17 18 19 20 21\n22 23 24 25 26 27 28\n";
        let keyfile = KeyFile::parse_plain(text).unwrap();
        assert_eq!(keyfile.cards, (1..=28).collect::<Vec<u8>>());
        assert!(keyfile.to_deck().is_ok());
    }

    #[test]
    fn parse_plain_rejects_bad_tokens() {
        assert!(KeyFile::parse_plain("1 2 three 4").is_err());
    }

    #[test]
    fn to_deck_rejects_duplicates() {
        let keyfile = KeyFile::parse_plain("1 1 3").unwrap();
        assert_eq!(
            keyfile.to_deck().unwrap_err(),
            InvalidDeckError::WrongCardCount(3)
        );
        let mut values: Vec<String> = (1..=27).map(|v| v.to_string()).collect();
        values.push("27".to_string());
        let keyfile = KeyFile::parse_plain(&values.join(" ")).unwrap();
        assert_eq!(
            keyfile.to_deck().unwrap_err(),
            InvalidDeckError::DuplicateCard(27)
        );
    }

    #[test]
    fn json_round_trips_header_and_cards() {
        let mut keyfile = KeyFile::new(&ordered_deck(), Some("field kit".into()));
        keyfile.log_action("deck new");
        let json = serde_json::to_string(&keyfile).unwrap();
        let parsed: KeyFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.header, keyfile.header);
        assert_eq!(parsed.cards, keyfile.cards);
    }

    #[test]
    fn plain_encoding_is_canonical() {
        let keyfile = KeyFile::new(&ordered_deck(), None);
        assert_eq!(
            keyfile.plain_encoding(),
            "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28"
        );
    }

    #[test]
    fn fingerprint_is_stable_for_an_ordering() {
        let keyfile = KeyFile::new(&ordered_deck(), None);
        assert_eq!(
            keyfile.fingerprint(),
            "ae5f64b5ab1e6f85ba62a53f79dcbc94514dffca449d52864f817923b4d00fe1"
        );
    }
}
