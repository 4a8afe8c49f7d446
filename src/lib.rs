//! Solitaire (Pontifex) stream cipher over a 28-card deck.
//!
//! The deck is a circular permutation of the values 1..=28; cards 27 and 28
//! are the jokers. Four shuffle steps — joker A, joker B, triple cut, count
//! cut — advance the deck and yield one key value in 1..=26 per letter, and
//! the cipher adds keys to letters mod 26 (subtracts to decrypt).
//!
//! # Examples
//!
//! Encrypt and decrypt with two sessions sharing a deck ordering:
//!
//! ```
//! use pontifex::{Cipher, Deck};
//!
//! let cards: Vec<u8> = (1..=28).collect();
//!
//! let mut encrypter = Cipher::new(Deck::from_cards(&cards).unwrap());
//! let ciphertext = encrypter.encrypt("Hello, World!");
//!
//! let mut decrypter = Cipher::new(Deck::from_cards(&cards).unwrap());
//! assert_eq!(decrypter.decrypt(&ciphertext), "HELLOWORLD");
//! ```

mod cipher;
mod deck;
mod keyfile;
mod keystream;

pub use cipher::Cipher;
pub use deck::{DECK_SIZE, Deck, InvalidDeckError, JOKER_A, JOKER_B, is_joker};
pub use keyfile::{AuditEvent, KeyFile, KeyFileHeader};
pub use keystream::KeyGenerator;

/// Encrypts `message` with a one-shot cipher session seeded from `deck`.
pub fn encrypt_message(deck: Deck, message: &str) -> String {
    Cipher::new(deck).encrypt(message)
}

/// Decrypts `message` with a one-shot cipher session seeded from `deck`.
pub fn decrypt_message(deck: Deck, message: &str) -> String {
    Cipher::new(deck).decrypt(message)
}
