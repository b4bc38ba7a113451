//! Card ranks and the fixed deck composition.
//!
//! Ranks are strictly ordered by value; the derived `Ord` follows the
//! discriminant, so `Card::Guard < Card::Princess`.

use serde::{Deserialize, Serialize};

/// Total number of cards in a Love Letter deck.
pub const DECK_SIZE: usize = 16;

/// A card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Card {
    Guard = 1,
    Priest = 2,
    Baron = 3,
    Handmaid = 4,
    Prince = 5,
    King = 6,
    Countess = 7,
    Princess = 8,
}

impl Card {
    /// Every rank, lowest first.
    pub const ALL: [Card; 8] = [
        Card::Guard,
        Card::Priest,
        Card::Baron,
        Card::Handmaid,
        Card::Prince,
        Card::King,
        Card::Countess,
        Card::Princess,
    ];

    /// Ranks a Guard may name.
    pub const GUESSABLE: [Card; 7] = [
        Card::Priest,
        Card::Baron,
        Card::Handmaid,
        Card::Prince,
        Card::King,
        Card::Countess,
        Card::Princess,
    ];

    /// Face value (1-8).
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Copies of this rank in the deck.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Card::Guard => 5,
            Card::Priest | Card::Baron | Card::Handmaid | Card::Prince => 2,
            Card::King | Card::Countess | Card::Princess => 1,
        }
    }

    /// Dense index `0..8`, for per-rank tallies.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Does playing this card name a target seat?
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(
            self,
            Card::Guard | Card::Priest | Card::Baron | Card::Prince | Card::King
        )
    }

    /// Can this card's effect be aimed at its own player?
    ///
    /// Only the Prince has a real self-target; the other targeted ranks fall
    /// back to self (with no effect) when every opponent is out of reach.
    #[must_use]
    pub const fn may_target_self(self) -> bool {
        matches!(self, Card::Prince)
    }

    /// Countess must be played when held alongside one of these.
    #[must_use]
    pub const fn forces_countess(self) -> bool {
        matches!(self, Card::King | Card::Prince)
    }

    /// The full 16-card deck, sorted by rank.
    #[must_use]
    pub fn deck() -> Vec<Card> {
        Card::ALL
            .iter()
            .flat_map(|&card| std::iter::repeat(card).take(card.count()))
            .collect()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Card::Guard => "Guard",
            Card::Priest => "Priest",
            Card::Baron => "Baron",
            Card::Handmaid => "Handmaid",
            Card::Prince => "Prince",
            Card::King => "King",
            Card::Countess => "Countess",
            Card::Princess => "Princess",
        };
        f.write_str(name)
    }
}

/// Per-rank card counts.
///
/// Used for unseen-card bookkeeping where a `Vec<Card>` would need sorting to
/// compare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardCounts([u8; 8]);

impl CardCounts {
    /// Counts of a full deck.
    #[must_use]
    pub fn full_deck() -> Self {
        let mut counts = Self::default();
        for card in Card::ALL {
            counts.0[card.index()] = card.count() as u8;
        }
        counts
    }

    /// Count every card in `cards`.
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut counts = Self::default();
        for &card in cards {
            counts.add(card);
        }
        counts
    }

    /// Copies of `card`.
    #[must_use]
    pub fn get(&self, card: Card) -> usize {
        self.0[card.index()] as usize
    }

    /// Add one copy.
    pub fn add(&mut self, card: Card) {
        self.0[card.index()] += 1;
    }

    /// Remove one copy. Returns false if none was left.
    pub fn remove(&mut self, card: Card) -> bool {
        let slot = &mut self.0[card.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    /// Expand into a card list, sorted by rank.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        Card::ALL
            .iter()
            .flat_map(|&card| std::iter::repeat(card).take(self.get(card)))
            .collect()
    }

    /// True when no rank exceeds its deck multiplicity.
    #[must_use]
    pub fn within_deck(&self) -> bool {
        Card::ALL.iter().all(|&card| self.get(card) <= card.count())
    }
}
