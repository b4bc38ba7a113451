//! Authoritative round state.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::view::PlayerView;
use crate::core::{
    Action, Card, CardCounts, GameRng, PlayerId, PlayerMap, DECK_SIZE, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::error::{Error, Result};
use crate::rules::{RoundEngine, RoundState};

/// Draw pile, top card last. Never outgrows the deck, so it stays inline.
pub type DrawPile = SmallVec<[Card; DECK_SIZE]>;

/// Full state of one round of Love Letter.
///
/// Cloning is cheap: the pile lives inline and discard histories are
/// persistent vectors, so sibling search branches never share mutable data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    player_count: usize,

    /// Face-down draw pile, top card last.
    deck: DrawPile,

    /// Card removed face down at the start; drawn by a Prince victim when the
    /// pile is empty.
    set_aside: Option<Card>,

    /// Each seat's single hand card (`None` once eliminated).
    hands: PlayerMap<Option<Card>>,

    discards: PlayerMap<Vector<Card>>,
    eliminated: PlayerMap<bool>,
    protected: PlayerMap<bool>,

    /// `known[viewer][seat]`: what `viewer` has seen in `seat`'s hand.
    known: PlayerMap<PlayerMap<Option<Card>>>,

    scores: PlayerMap<u32>,
    next_player: PlayerId,

    /// Turns played so far.
    turn: u32,

    over: bool,
    winners: Vec<PlayerId>,
}

/// Builder for dealing a fresh round.
pub struct RoundBuilder {
    player_count: usize,
    first_player: PlayerId,
    scores: Option<Vec<u32>>,
}

impl Default for RoundBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            first_player: PlayerId::new(0),
            scores: None,
        }
    }
}

impl RoundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&count),
            "Player count must be 2-4"
        );
        self.player_count = count;
        self
    }

    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Carry tallies over from earlier rounds of a match.
    pub fn scores(mut self, scores: &[u32]) -> Self {
        self.scores = Some(scores.to_vec());
        self
    }

    /// Shuffle, set one card aside and deal one card to every seat.
    pub fn deal(self, rng: &mut GameRng) -> Round {
        let n = self.player_count;
        let mut cards = Card::deck();
        rng.shuffle(&mut cards);

        let mut deck: DrawPile = cards.into_iter().collect();
        let set_aside = deck.pop();
        let mut hands = PlayerMap::with_value(n, None);
        for player in PlayerId::all(n) {
            hands[player] = deck.pop();
        }

        let scores = match self.scores {
            Some(s) => PlayerMap::new(n, |p| s.get(p.index()).copied().unwrap_or(0)),
            None => PlayerMap::with_value(n, 0),
        };

        Round {
            player_count: n,
            deck,
            set_aside,
            hands,
            discards: PlayerMap::with_default(n),
            eliminated: PlayerMap::with_value(n, false),
            protected: PlayerMap::with_value(n, false),
            known: PlayerMap::new(n, |_| PlayerMap::with_value(n, None)),
            scores,
            next_player: self.first_player,
            turn: 0,
            over: false,
            winners: Vec::new(),
        }
    }
}

/// Every location of a hypothetical round, for [`Round::from_parts`].
#[derive(Clone, Debug)]
pub struct RoundParts {
    /// Draw pile, top card last.
    pub deck: Vec<Card>,
    pub set_aside: Option<Card>,
    pub hands: PlayerMap<Option<Card>>,
    pub discards: PlayerMap<Vector<Card>>,
    pub eliminated: PlayerMap<bool>,
    pub protected: PlayerMap<bool>,
    pub known: PlayerMap<PlayerMap<Option<Card>>>,
    pub next_player: PlayerId,
}

impl Round {
    /// Assemble a round from explicit parts. Tallies start at zero.
    ///
    /// Fails if the parts do not account for exactly one deck, or if a live
    /// seat has no hand (or an eliminated one still holds a card).
    pub fn from_parts(parts: RoundParts) -> Result<Self> {
        let n = parts.hands.player_count();
        let round = Round {
            player_count: n,
            deck: parts.deck.into_iter().collect(),
            set_aside: parts.set_aside,
            hands: parts.hands,
            discards: parts.discards,
            eliminated: parts.eliminated,
            protected: parts.protected,
            known: parts.known,
            scores: PlayerMap::with_value(n, 0),
            next_player: parts.next_player,
            turn: 0,
            over: false,
            winners: Vec::new(),
        };

        let accounted = round.accounted_cards();
        if accounted != CardCounts::full_deck() {
            return Err(Error::MalformedDeterminization(format!(
                "{} cards accounted for, expected one full deck of {}",
                accounted.total(),
                DECK_SIZE
            )));
        }
        for player in PlayerId::all(n) {
            if round.eliminated[player] == round.hands[player].is_some() {
                return Err(Error::MalformedDeterminization(format!(
                    "{} hand does not match its elimination flag",
                    player
                )));
            }
        }
        Ok(round)
    }

    /// Masked snapshot of what `viewer` can see.
    #[must_use]
    pub fn view(&self, viewer: PlayerId) -> PlayerView {
        let hands = PlayerMap::new(self.player_count, |p| {
            if p == viewer {
                self.hands[p]
            } else {
                self.known[viewer][p].filter(|_| !self.eliminated[p])
            }
        });

        PlayerView::new(
            viewer,
            hands,
            self.discards.clone(),
            self.eliminated.clone(),
            self.protected.clone(),
            self.scores.clone(),
            self.deck.len(),
            self.set_aside.is_some(),
            self.next_player,
            self.over,
        )
    }

    /// Seats that won the round (empty while it is running).
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    /// What `viewer` knows about `player`'s hand.
    #[must_use]
    pub fn known_card(&self, viewer: PlayerId, player: PlayerId) -> Option<Card> {
        self.known[viewer][player]
    }

    /// Turns played this round.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The set-aside card, if still unused.
    #[must_use]
    pub fn set_aside(&self) -> Option<Card> {
        self.set_aside
    }

    /// Draw pile, top card last.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Counts of every card in a known location: pile, set-aside, hands,
    /// discards. Between a draw and its play, the drawn card is missing.
    #[must_use]
    pub fn accounted_cards(&self) -> CardCounts {
        let mut counts = CardCounts::from_cards(self.deck.iter());
        if let Some(card) = self.set_aside {
            counts.add(card);
        }
        for hand in self.hands.values().flatten() {
            counts.add(*hand);
        }
        for pile in self.discards.values() {
            for &card in pile {
                counts.add(card);
            }
        }
        counts
    }

    // === Effects ===

    fn resolve(&mut self, action: &Action) -> Result<()> {
        let actor = action.player();
        match *action {
            Action::Guard { target, guess, .. } => {
                if target != actor && self.hands[target] == Some(guess) {
                    self.eliminate(target);
                }
            }
            Action::Priest { target, .. } => {
                if target != actor {
                    self.known[actor][target] = self.hands[target];
                }
            }
            Action::Baron { target, .. } => {
                if target != actor {
                    self.baron(actor, target);
                }
            }
            Action::Handmaid { .. } => {
                self.protected[actor] = true;
            }
            Action::Prince { target, .. } => {
                self.prince(target)?;
            }
            Action::King { target, .. } => {
                if target != actor {
                    self.king(actor, target);
                }
            }
            Action::Countess { .. } => {}
            Action::Princess { .. } => {
                self.eliminate(actor);
            }
        }
        Ok(())
    }

    fn baron(&mut self, actor: PlayerId, target: PlayerId) {
        let (Some(mine), Some(theirs)) = (self.hands[actor], self.hands[target]) else {
            return;
        };
        self.known[actor][target] = Some(theirs);
        self.known[target][actor] = Some(mine);

        if mine < theirs {
            self.eliminate(actor);
        } else if theirs < mine {
            self.eliminate(target);
        }
    }

    fn prince(&mut self, target: PlayerId) -> Result<()> {
        let Some(discarded) = self.hands[target].take() else {
            return Ok(());
        };
        self.discards[target].push_back(discarded);
        self.forget(target);

        if discarded == Card::Princess {
            self.eliminated[target] = true;
            self.protected[target] = false;
            return Ok(());
        }

        let replacement = self.deck.pop().or_else(|| self.set_aside.take());
        match replacement {
            Some(card) => {
                self.hands[target] = Some(card);
                Ok(())
            }
            None => Err(Error::EmptyDeck),
        }
    }

    fn king(&mut self, actor: PlayerId, target: PlayerId) {
        self.hands.swap(actor, target);
        for viewer in PlayerId::all(self.player_count) {
            if viewer != actor && viewer != target {
                self.known[viewer].swap(actor, target);
            }
        }
        self.known[actor][target] = self.hands[target];
        self.known[target][actor] = self.hands[actor];
    }

    fn eliminate(&mut self, player: PlayerId) {
        self.eliminated[player] = true;
        self.protected[player] = false;
        if let Some(card) = self.hands[player].take() {
            self.discards[player].push_back(card);
        }
        self.forget(player);
    }

    /// Nobody knows `player`'s hand any more.
    fn forget(&mut self, player: PlayerId) {
        for viewer in PlayerId::all(self.player_count) {
            self.known[viewer][player] = None;
        }
    }

    fn finish_turn(&mut self, actor: PlayerId) {
        let live = self.live_players();
        if live.len() <= 1 || self.deck.is_empty() {
            self.end_round(live);
            return;
        }

        let mut next = actor.next(self.player_count);
        while self.eliminated[next] {
            next = next.next(self.player_count);
        }
        self.next_player = next;
    }

    fn end_round(&mut self, live: Vec<PlayerId>) {
        self.over = true;

        let winners = if live.len() <= 1 {
            live
        } else {
            let hand_value = |p: PlayerId| self.hands[p].map_or(0, Card::value);
            let discard_value =
                |p: PlayerId| self.discards[p].iter().map(|c| c.value() as u32).sum::<u32>();

            let best = live.iter().map(|&p| hand_value(p)).max().unwrap_or(0);
            let contenders: Vec<_> = live.into_iter().filter(|&p| hand_value(p) == best).collect();
            let best_discards = contenders.iter().map(|&p| discard_value(p)).max().unwrap_or(0);
            contenders
                .into_iter()
                .filter(|&p| discard_value(p) == best_discards)
                .collect()
        };

        for &winner in &winners {
            self.scores[winner] += 1;
        }
        self.winners = winners;
    }
}

impl RoundState for Round {
    fn num_players(&self) -> usize {
        self.player_count
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
        self.deck.len()
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
        self.over
    }

    /// The face-down pool: draw pile plus the set-aside card.
    fn unseen_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.to_vec();
        cards.extend(self.set_aside);
        cards
    }
}

impl RoundEngine for Round {
    fn draw_card(&mut self) -> Result<Card> {
        if self.over {
            return Err(Error::RoundOver);
        }
        self.deck.pop().ok_or(Error::EmptyDeck)
    }

    /// Illegal actions are rejected before any mutation.
    fn update(&mut self, action: &Action, drawn: Card) -> Result<()> {
        if self.over {
            return Err(Error::RoundOver);
        }
        if !self.legal_action(action, drawn) {
            return Err(Error::IllegalAction(action.to_string()));
        }

        let actor = action.player();
        let played = action.card();
        let held = self.hands[actor].ok_or(Error::RoundOver)?;

        self.protected[actor] = false;
        if played != drawn {
            self.hands[actor] = Some(drawn);
            if held != drawn {
                self.forget(actor);
            }
        }
        self.discards[actor].push_back(played);
        self.turn += 1;

        self.resolve(action)?;
        self.finish_turn(actor);
        Ok(())
    }
}
