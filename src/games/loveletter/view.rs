//! A seat's masked snapshot of a round.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Card, CardCounts, PlayerId, PlayerMap};
use crate::rules::RoundState;

/// What one seat can observe: its own hand, opponents' hands it has seen,
/// and everything public.
///
/// Owned, so agents can keep it between turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    viewer: PlayerId,

    /// Own hand, plus opponent hands learned through Priest, Baron or King.
    hands: PlayerMap<Option<Card>>,

    discards: PlayerMap<Vector<Card>>,
    eliminated: PlayerMap<bool>,
    protected: PlayerMap<bool>,
    scores: PlayerMap<u32>,
    deck_size: usize,
    has_set_aside: bool,
    next_player: PlayerId,
    round_over: bool,
}

impl PlayerView {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        viewer: PlayerId,
        hands: PlayerMap<Option<Card>>,
        discards: PlayerMap<Vector<Card>>,
        eliminated: PlayerMap<bool>,
        protected: PlayerMap<bool>,
        scores: PlayerMap<u32>,
        deck_size: usize,
        has_set_aside: bool,
        next_player: PlayerId,
        round_over: bool,
    ) -> Self {
        Self {
            viewer,
            hands,
            discards,
            eliminated,
            protected,
            scores,
            deck_size,
            has_set_aside,
            next_player,
            round_over,
        }
    }

    /// The observing seat.
    #[must_use]
    pub fn viewer(&self) -> PlayerId {
        self.viewer
    }

    /// Is the face-down set-aside card still out of play?
    #[must_use]
    pub fn has_set_aside(&self) -> bool {
        self.has_set_aside
    }

    /// Live opponents whose hand the viewer knows.
    pub fn known_opponents(&self) -> impl Iterator<Item = (PlayerId, Card)> + '_ {
        self.hands
            .iter()
            .filter(move |&(p, _)| p != self.viewer && !self.eliminated[p])
            .filter_map(|(p, card)| card.map(|c| (p, c)))
    }
}

impl RoundState for PlayerView {
    fn num_players(&self) -> usize {
        self.hands.player_count()
    }

    fn next_player(&self) -> PlayerId {
        self.next_player
    }

    fn eliminated(&self, player: PlayerId) -> bool {
        self.eliminated[player]
    }

    fn handmaid_protected(&self, player: PlayerId) -> bool {
        self.protected[player]
    }

    fn deck_size(&self) -> usize {
        self.deck_size
    }

    fn card(&self, player: PlayerId) -> Option<Card> {
        self.hands[player]
    }

    fn discards(&self, player: PlayerId) -> &Vector<Card> {
        &self.discards[player]
    }

    fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    fn round_over(&self) -> bool {
        self.round_over
    }

    /// Full deck minus own hand, all discards and known opponent hands.
    ///
    /// A card drawn this turn is still counted here; callers holding one
    /// remove it themselves.
    fn unseen_cards(&self) -> Vec<Card> {
        let mut counts = CardCounts::full_deck();
        if let Some(own) = self.hands[self.viewer] {
            counts.remove(own);
        }
        for pile in self.discards.values() {
            for &card in pile {
                counts.remove(card);
            }
        }
        for (_, card) in self.known_opponents() {
            counts.remove(card);
        }
        counts.to_vec()
    }
}
