//! Uniform random agent.

use crate::core::{Action, Card, GameRng};
use crate::error::{Error, Result};
use crate::games::loveletter::PlayerView;
use crate::mcts::{PlayoutPolicy, UniformRandom};
use crate::rules::RoundState;

use super::Agent;

/// Plays uniformly among legal actions, never discarding the Princess
/// voluntarily.
pub struct RandomAgent {
    policy: UniformRandom,
    rng: GameRng,
    view: Option<PlayerView>,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            policy: UniformRandom::default(),
            rng: GameRng::new(seed),
            view: None,
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn new_round(&mut self, view: PlayerView) {
        self.view = Some(view);
    }

    fn see(&mut self, _action: &Action, view: PlayerView) {
        self.view = Some(view);
    }

    fn play_card(&mut self, drawn: Card) -> Result<Action> {
        let view = self.view.as_ref().ok_or(Error::NoRound)?;
        let me = view.viewer();
        let held = view.card(me).ok_or(Error::NoRound)?;
        self.policy.choose(
            me,
            view.num_players(),
            drawn,
            held,
            &|a| view.legal_action(a, drawn),
            &mut self.rng,
        )
    }

    fn play_specific_card(&mut self, card: Card) -> Result<Action> {
        let view = self.view.as_ref().ok_or(Error::NoRound)?;
        self.policy.choose_specific(
            view.viewer(),
            view.num_players(),
            card,
            &|a| view.legal_action(a, card),
            &mut self.rng,
        )
    }
}
