//! Key value generation: the four shuffle steps composed in fixed order.

use crate::deck::{Deck, JOKER_A, JOKER_B, is_joker};

/// Produces the keystream for one cipher session.
///
/// Each call to [`next_key`](KeyGenerator::next_key) permanently advances
/// the deck it owns; there is no reset between letters.
pub struct KeyGenerator {
    deck: Deck,
}

impl KeyGenerator {
    pub fn new(deck: Deck) -> Self {
        Self { deck }
    }

    /// Read-only view of the current deck state.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Consumes the generator and returns its deck.
    pub fn into_deck(self) -> Deck {
        self.deck
    }

    /// Returns the next key value, always in 1..=26.
    ///
    /// Applies joker A, joker B, triple cut and count cut, then counts down
    /// from the top by the top card's value (28 counts as 27, no card is
    /// modified) and reads the card after that position. A joker candidate
    /// is discarded and the whole four-step round runs again from the
    /// already advanced deck. Termination rests on the step composition not
    /// cycling through joker candidates forever; no bound is proven for it.
    pub fn next_key(&mut self) -> u8 {
        loop {
            self.deck.joker_a();
            self.deck.joker_b();
            self.deck.triple_cut();
            self.deck.count_cut();
            let mut count = self.deck.top_value();
            if count == JOKER_B {
                count = JOKER_A;
            }
            let candidate = self.deck.card_at(count as usize);
            if !is_joker(candidate) {
                return candidate;
            }
        }
    }

    /// Next `n` key values, for diagnostics.
    pub fn keystream(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.next_key()).collect()
    }
}
