use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 28;
/// Card value of joker A, moved forward one position per round.
pub const JOKER_A: u8 = 27;
/// Card value of joker B, moved forward two positions per round.
pub const JOKER_B: u8 = 28;

/// Returns true for the two joker values.
pub fn is_joker(value: u8) -> bool {
    value == JOKER_A || value == JOKER_B
}

fn other_joker(value: u8) -> u8 {
    if value == JOKER_A { JOKER_B } else { JOKER_A }
}

/// A card sequence that is not a permutation of 1..=28.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidDeckError {
    #[error("deck must contain exactly 28 cards (got {0})")]
    WrongCardCount(usize),
    #[error("card value {0} is outside 1..=28")]
    CardOutOfRange(u8),
    #[error("card value {0} appears more than once")]
    DuplicateCard(u8),
}

/// The 28-card circular deck that is the entire cipher state.
///
/// Cards live in a fixed ring of slots; `rear` is the slot index of the
/// bottom card, and the top card sits in the next slot around the ring.
/// Shuffle steps move cards by swapping values between adjacent slots, so
/// a joker move never invalidates the rear slot index: when the rear card
/// swaps forward, the incoming card simply lands in the rear slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    ring: [u8; DECK_SIZE],
    rear: usize,
}

impl Deck {
    /// Builds a deck from an explicit ordering, top card first.
    ///
    /// The last listed card becomes the rear, as when dealing values one by
    /// one onto the bottom of the deck. Rejects any sequence that is not a
    /// permutation of 1..=28; no partially built deck escapes.
    pub fn from_cards(cards: &[u8]) -> Result<Self, InvalidDeckError> {
        if cards.len() != DECK_SIZE {
            return Err(InvalidDeckError::WrongCardCount(cards.len()));
        }
        let mut seen = [false; DECK_SIZE + 1];
        for &card in cards {
            if card == 0 || card as usize > DECK_SIZE {
                return Err(InvalidDeckError::CardOutOfRange(card));
            }
            if seen[card as usize] {
                return Err(InvalidDeckError::DuplicateCard(card));
            }
            seen[card as usize] = true;
        }
        let mut ring = [0u8; DECK_SIZE];
        ring.copy_from_slice(cards);
        Ok(Self {
            ring,
            rear: DECK_SIZE - 1,
        })
    }

    /// Creates a deck holding a uniformly random permutation of 1..=28.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut ring = [0u8; DECK_SIZE];
        for (i, slot) in ring.iter_mut().enumerate() {
            *slot = (i + 1) as u8;
        }
        ring.shuffle(rng);
        Self {
            ring,
            rear: DECK_SIZE - 1,
        }
    }

    /// Value of the rear (bottom) card.
    pub fn rear_value(&self) -> u8 {
        self.ring[self.rear]
    }

    /// Value of the top card, the rear's circular successor.
    pub fn top_value(&self) -> u8 {
        self.card_at(0)
    }

    /// Value `offset` positions after the top card (offset 0 is the top,
    /// offset 27 the rear).
    pub fn card_at(&self, offset: usize) -> u8 {
        self.ring[(self.rear + 1 + offset % DECK_SIZE) % DECK_SIZE]
    }

    /// 0-based offset of `value` from the top card.
    pub fn position_of(&self, value: u8) -> usize {
        let slot = self.slot_of(value);
        (slot + DECK_SIZE - self.rear - 1) % DECK_SIZE
    }

    /// Cards in order from the top down to the rear.
    pub fn cards_from_top(&self) -> [u8; DECK_SIZE] {
        let mut out = [0u8; DECK_SIZE];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.card_at(i);
        }
        out
    }

    /// Moves the card holding `value` forward by `steps` positions, one
    /// adjacent swap at a time.
    pub fn rotate_forward(&mut self, value: u8, steps: usize) {
        let mut slot = self.slot_of(value);
        for _ in 0..steps {
            let next = (slot + 1) % DECK_SIZE;
            self.ring.swap(slot, next);
            slot = next;
        }
    }

    /// Step 1: moves joker A forward one position.
    pub fn joker_a(&mut self) {
        self.rotate_forward(JOKER_A, 1);
        debug_assert!(self.is_permutation());
    }

    /// Step 2: moves joker B forward two positions.
    pub fn joker_b(&mut self) {
        self.rotate_forward(JOKER_B, 2);
        debug_assert!(self.is_permutation());
    }

    /// Step 3: swaps the run of cards above the first joker with the run
    /// below the second joker, leaving the jokers and everything between
    /// them in place.
    ///
    /// When one of the swapped runs is empty the cut degenerates to a pure
    /// rear-marker move: no card changes its circular neighbour.
    pub fn triple_cut(&mut self) {
        let top = self.top_value();
        let rear = self.rear_value();
        match (is_joker(top), is_joker(rear)) {
            // Jokers already sit at both circle boundaries.
            (true, true) => {}
            // Empty leading run: the second joker becomes the rear.
            (true, false) => self.rear = self.slot_of(other_joker(top)),
            // Empty trailing run: the rear moves to just above the other joker.
            (false, true) => {
                let slot = self.slot_of(other_joker(rear));
                self.rear = (slot + DECK_SIZE - 1) % DECK_SIZE;
            }
            (false, false) => {
                let order = self.cards_from_top();
                let first = order
                    .iter()
                    .position(|&c| is_joker(c))
                    .expect("deck holds two jokers");
                let second = order
                    .iter()
                    .rposition(|&c| is_joker(c))
                    .expect("deck holds two jokers");
                let mut next = [0u8; DECK_SIZE];
                let reordered = order[second + 1..]
                    .iter()
                    .chain(&order[first..=second])
                    .chain(&order[..first]);
                for (slot, &card) in next.iter_mut().zip(reordered) {
                    *slot = card;
                }
                self.set_order_from_top(next);
            }
        }
        debug_assert!(self.is_permutation());
    }

    /// Step 4: cuts the top `n` cards, where `n` is the rear card's value,
    /// to just above the rear. The rear keeps its position; a joker at the
    /// rear never counts its cut, leaving the deck untouched.
    pub fn count_cut(&mut self) {
        let count = self.rear_value();
        if is_joker(count) {
            return;
        }
        let count = count as usize;
        let order = self.cards_from_top();
        let mut next = [0u8; DECK_SIZE];
        let reordered = order[count..DECK_SIZE - 1]
            .iter()
            .chain(&order[..count])
            .chain(std::iter::once(&order[DECK_SIZE - 1]));
        for (slot, &card) in next.iter_mut().zip(reordered) {
            *slot = card;
        }
        self.set_order_from_top(next);
        debug_assert!(self.is_permutation());
    }

    fn slot_of(&self, value: u8) -> usize {
        self.ring
            .iter()
            .position(|&c| c == value)
            .expect("card missing from deck")
    }

    fn set_order_from_top(&mut self, order: [u8; DECK_SIZE]) {
        self.ring = order;
        self.rear = DECK_SIZE - 1;
    }

    fn is_permutation(&self) -> bool {
        let mut seen = [false; DECK_SIZE + 1];
        for &card in &self.ring {
            if card == 0 || card as usize > DECK_SIZE || seen[card as usize] {
                return false;
            }
            seen[card as usize] = true;
        }
        true
    }
}

impl fmt::Display for Deck {
    /// Renders the circular order from the top card, comma separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards_from_top().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deck(cards: &[u8]) -> Deck {
        Deck::from_cards(cards).unwrap()
    }

    fn ordered() -> Deck {
        let cards: Vec<u8> = (1..=28).collect();
        deck(&cards)
    }

    #[test]
    fn rejects_short_deck() {
        let cards: Vec<u8> = (1..=27).collect();
        assert_eq!(
            Deck::from_cards(&cards),
            Err(InvalidDeckError::WrongCardCount(27))
        );
    }

    #[test]
    fn rejects_duplicate_card() {
        let mut cards: Vec<u8> = (1..=28).collect();
        cards[27] = 3;
        assert_eq!(
            Deck::from_cards(&cards),
            Err(InvalidDeckError::DuplicateCard(3))
        );
    }

    #[test]
    fn rejects_out_of_range_card() {
        let mut cards: Vec<u8> = (1..=28).collect();
        cards[0] = 29;
        assert_eq!(
            Deck::from_cards(&cards),
            Err(InvalidDeckError::CardOutOfRange(29))
        );
        cards[0] = 0;
        assert_eq!(
            Deck::from_cards(&cards),
            Err(InvalidDeckError::CardOutOfRange(0))
        );
    }

    #[test]
    fn positional_reads() {
        let d = ordered();
        assert_eq!(d.top_value(), 1);
        assert_eq!(d.rear_value(), 28);
        assert_eq!(d.card_at(3), 4);
        assert_eq!(d.card_at(27), 28);
        assert_eq!(d.position_of(1), 0);
        assert_eq!(d.position_of(28), 27);
    }

    #[test]
    fn joker_a_swaps_past_the_rear() {
        // Worked example: [1..26,27,28] with rear 28; joker A swaps with the
        // rear card and becomes the new rear.
        let mut d = ordered();
        d.joker_a();
        let mut expected: Vec<u8> = (1..=26).collect();
        expected.extend([28, 27]);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 27);
    }

    #[test]
    fn joker_a_at_rear_wraps_to_top() {
        let mut cards: Vec<u8> = (1..=26).collect();
        cards.extend([28, 27]);
        let mut d = deck(&cards);
        d.joker_a();
        let mut expected = vec![27];
        expected.extend(2..=26);
        expected.extend([28, 1]);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 1);
    }

    #[test]
    fn joker_b_moves_two_positions() {
        // Worked example: [27,28,1,2,3,...,26] with rear 26; joker B passes
        // over 1 and 2, rear unchanged.
        let mut cards = vec![27, 28];
        cards.extend(1..=26);
        let mut d = deck(&cards);
        d.joker_b();
        let mut expected = vec![27, 1, 2, 28];
        expected.extend(3..=26);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 26);
    }

    #[test]
    fn joker_b_wraps_past_the_rear() {
        // From [1..26,28,27] (rear 27) joker B crosses the rear; the old top
        // becomes the new rear.
        let mut cards: Vec<u8> = (1..=26).collect();
        cards.extend([28, 27]);
        let mut d = deck(&cards);
        d.joker_b();
        let mut expected = vec![28];
        expected.extend(2..=26);
        expected.extend([27, 1]);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 1);
    }

    #[test]
    fn triple_cut_swaps_outer_runs() {
        let head = [5u8, 27, 3, 9, 28];
        let mut cards = head.to_vec();
        cards.extend((1..=28).filter(|v| !head.contains(v)));
        let mut d = deck(&cards);
        d.triple_cut();
        let mut expected = vec![1u8, 2, 4, 6, 7, 8];
        expected.extend(10..=26);
        expected.extend([27, 3, 9, 28, 5]);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 5);
    }

    #[test]
    fn triple_cut_noop_with_jokers_at_both_boundaries() {
        let mut cards = vec![27];
        cards.extend(1..=26);
        cards.push(28);
        let mut d = deck(&cards);
        let before = d.clone();
        d.triple_cut();
        assert_eq!(d, before);
    }

    #[test]
    fn triple_cut_with_joker_on_top_moves_rear_to_other_joker() {
        let mut cards = vec![28];
        cards.extend(2..=26);
        cards.extend([27, 1]);
        let mut d = deck(&cards);
        d.triple_cut();
        let mut expected = vec![1, 28];
        expected.extend(2..=26);
        expected.push(27);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 27);
    }

    #[test]
    fn triple_cut_with_joker_at_rear_moves_rear_above_other_joker() {
        let mut cards: Vec<u8> = (1..=13).collect();
        cards.push(27);
        cards.extend(14..=26);
        cards.push(28);
        let mut d = deck(&cards);
        d.triple_cut();
        let mut expected = vec![27];
        expected.extend(14..=26);
        expected.push(28);
        expected.extend(1..=13);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 13);
    }

    #[test]
    fn count_cut_moves_prefix_above_rear() {
        // Rear card 5: the top five cards slide to just above the rear.
        let mut cards: Vec<u8> = (1..=28).filter(|&v| v != 5).collect();
        cards.push(5);
        let mut d = deck(&cards);
        d.count_cut();
        let mut expected: Vec<u8> = (7..=28).collect();
        expected.extend([1, 2, 3, 4, 6, 5]);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 5);
    }

    #[test]
    fn count_cut_with_maximum_plain_rear() {
        let mut cards: Vec<u8> = (1..=25).collect();
        cards.extend([27, 28, 26]);
        let mut d = deck(&cards);
        d.count_cut();
        let mut expected = vec![28];
        expected.extend(1..=25);
        expected.extend([27, 26]);
        assert_eq!(d.cards_from_top().to_vec(), expected);
        assert_eq!(d.rear_value(), 26);
    }

    #[test]
    fn count_cut_noop_on_joker_rear() {
        let mut cards: Vec<u8> = (1..=27).collect();
        cards.push(28);
        let mut d = deck(&cards);
        let before = d.clone();
        d.count_cut();
        assert_eq!(d, before);
    }

    #[test]
    fn steps_preserve_the_permutation() {
        let mut d = ordered();
        for _ in 0..50 {
            d.joker_a();
            d.joker_b();
            d.triple_cut();
            d.count_cut();
            let mut sorted = d.cards_from_top().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (1..=28).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn display_renders_circular_order() {
        let d = ordered();
        assert_eq!(
            d.to_string(),
            "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28"
        );
    }
}
