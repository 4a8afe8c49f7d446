//! Letter transforms built on the keystream.

use crate::deck::Deck;
use crate::keystream::KeyGenerator;

/// One encrypt/decrypt session owning the deck state.
///
/// Encrypt and decrypt are exact inverses only when both sessions start
/// from the same deck ordering: every processed letter consumes one key and
/// permanently advances the deck, so interleaving two messages against one
/// session silently corrupts both keystreams.
pub struct Cipher {
    keys: KeyGenerator,
}

impl Cipher {
    pub fn new(deck: Deck) -> Self {
        Self {
            keys: KeyGenerator::new(deck),
        }
    }

    /// Read-only view of the session's deck.
    pub fn deck(&self) -> &Deck {
        self.keys.deck()
    }

    /// Encrypts the letters of `message`.
    ///
    /// Case folds to uppercase; anything that is not an ASCII letter is
    /// dropped from the output and does not consume a key. A message with
    /// no letters yields an empty string.
    pub fn encrypt(&mut self, message: &str) -> String {
        self.transform(message, |d, k| {
            let sum = d + k;
            if sum > 26 { sum - 26 } else { sum }
        })
    }

    /// Decrypts a message produced by [`encrypt`](Cipher::encrypt) from the
    /// same starting deck ordering.
    pub fn decrypt(&mut self, message: &str) -> String {
        self.transform(message, |d, k| {
            let d = if d <= k { d + 26 } else { d };
            d - k
        })
    }

    fn transform(&mut self, message: &str, combine: impl Fn(u8, u8) -> u8) -> String {
        let mut out = String::new();
        for ch in message.chars() {
            let Some(d) = letter_value(ch) else { continue };
            let key = self.keys.next_key();
            out.push(letter_for(combine(d, key)));
        }
        out
    }
}

/// 1-based alphabet position of an ASCII letter, case folded; `None` for
/// everything else.
fn letter_value(ch: char) -> Option<u8> {
    ch.is_ascii_alphabetic()
        .then(|| ch.to_ascii_uppercase() as u8 - b'A' + 1)
}

fn letter_for(value: u8) -> char {
    debug_assert!((1..=26).contains(&value));
    (b'A' + value - 1) as char
}
