//! MCTS policies for selection and playouts.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: which of a node's two children to descend into (UCB1)
//! - `PlayoutPolicy`: how every seat picks an action during expansion and
//!   rollouts (uniform rejection sampling)

use crate::core::{Action, Card, GameRng, PlayerId};
use crate::error::{Error, Result};

use super::config::MCTSConfig;
use super::node::Arm;

/// Legality predicate handed to playout policies.
pub type Legality<'a> = &'a dyn Fn(&Action) -> bool;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child index from `arms`.
    ///
    /// Returns `None` when every arm is pruned.
    fn select(&self, parent_visits: u32, arms: &[Arm], config: &MCTSConfig) -> Option<usize>;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: score / visits + c * sqrt(ln(N) / visits).
/// An unvisited arm is taken immediately (the first one, if several);
/// ties between scored arms favour the earlier arm.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, parent_visits: u32, arms: &[Arm], config: &MCTSConfig) -> Option<usize> {
        let ln_parent = (parent_visits.max(1) as f64).ln();
        let mut best: Option<(usize, f64)> = None;

        for (i, arm) in arms.iter().enumerate() {
            if arm.pruned {
                continue;
            }
            if arm.visits == 0 {
                return Some(i);
            }
            let value = arm.mean()
                + config.exploration_constant * (ln_parent / arm.visits as f64).sqrt();
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((i, value)),
            }
        }

        best.map(|(i, _)| i)
    }
}

// =============================================================================
// Playout Policy
// =============================================================================

/// Policy producing one legal action for a seat.
pub trait PlayoutPolicy: Send + Sync {
    /// Pick an action from the two cards in hand.
    fn choose(
        &self,
        player: PlayerId,
        player_count: usize,
        drawn: Card,
        held: Card,
        legal: Legality<'_>,
        rng: &mut GameRng,
    ) -> Result<Action>;

    /// Pick an action that plays exactly `card`.
    fn choose_specific(
        &self,
        player: PlayerId,
        player_count: usize,
        card: Card,
        legal: Legality<'_>,
        rng: &mut GameRng,
    ) -> Result<Action>;
}

/// Uniform random rejection sampler.
///
/// Proposes a card (coin flip between drawn and held), a uniform target seat
/// and a uniform non-Guard guess, and returns the first proposal the legality
/// predicate accepts. The Princess is never proposed by `choose`.
#[derive(Clone, Debug)]
pub struct UniformRandom {
    max_attempts: u32,
}

impl Default for UniformRandom {
    fn default() -> Self {
        Self::new(MCTSConfig::default().max_policy_attempts)
    }
}

impl UniformRandom {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    #[must_use]
    pub fn from_config(config: &MCTSConfig) -> Self {
        Self::new(config.max_policy_attempts)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn propose(player: PlayerId, player_count: usize, card: Card, rng: &mut GameRng) -> Option<Action> {
        let target = PlayerId::new(rng.gen_index(player_count) as u8);
        let guess = Card::GUESSABLE[rng.gen_index(Card::GUESSABLE.len())];
        Action::play(card, player, Some(target), Some(guess), player_count).ok()
    }
}

impl PlayoutPolicy for UniformRandom {
    fn choose(
        &self,
        player: PlayerId,
        player_count: usize,
        drawn: Card,
        held: Card,
        legal: Legality<'_>,
        rng: &mut GameRng,
    ) -> Result<Action> {
        for _ in 0..self.max_attempts {
            let card = if rng.coin_flip() { drawn } else { held };
            if card == Card::Princess {
                continue;
            }
            if let Some(action) = Self::propose(player, player_count, card, rng) {
                if legal(&action) {
                    return Ok(action);
                }
            }
        }
        Err(Error::NoLegalAction {
            card: drawn,
            attempts: self.max_attempts,
        })
    }

    fn choose_specific(
        &self,
        player: PlayerId,
        player_count: usize,
        card: Card,
        legal: Legality<'_>,
        rng: &mut GameRng,
    ) -> Result<Action> {
        for _ in 0..self.max_attempts {
            if let Some(action) = Self::propose(player, player_count, card, rng) {
                if legal(&action) {
                    return Ok(action);
                }
            }
        }
        Err(Error::NoLegalAction {
            card,
            attempts: self.max_attempts,
        })
    }
}
