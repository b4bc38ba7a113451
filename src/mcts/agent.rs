//! The search wrapped behind the [`Agent`] contract.

use tracing::debug;

use crate::agents::{informed_guard, Agent};
use crate::core::{Action, Card, GameRng};
use crate::error::{Error, Result};
use crate::games::loveletter::PlayerView;
use crate::rules::RoundState;

use super::config::MCTSConfig;
use super::policy::{PlayoutPolicy, UniformRandom};
use super::search::MCTSSearch;

/// Picks the card with [`MCTSSearch`], then chooses targets for it.
///
/// A Guard names a known opponent card when there is one; otherwise targets
/// and guesses are uniform among legal choices.
pub struct MCTSAgent {
    search: MCTSSearch,
    targeting: UniformRandom,
    rng: GameRng,
    view: Option<PlayerView>,
}

impl MCTSAgent {
    pub fn new(config: MCTSConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        Self {
            targeting: UniformRandom::from_config(&config),
            search: MCTSSearch::new(config),
            rng: rng.fork(),
            view: None,
        }
    }

    /// The underlying search, for its statistics.
    #[must_use]
    pub fn search(&self) -> &MCTSSearch {
        &self.search
    }
}

impl Agent for MCTSAgent {
    fn name(&self) -> &str {
        "MCTS"
    }

    fn new_round(&mut self, view: PlayerView) {
        self.view = Some(view);
    }

    fn see(&mut self, _action: &Action, view: PlayerView) {
        self.view = Some(view);
    }

    fn play_card(&mut self, drawn: Card) -> Result<Action> {
        let view = self.view.as_ref().ok_or(Error::NoRound)?;
        let card = self.search.decide(view, drawn)?;
        debug!(
            player = %view.viewer(),
            %card,
            determinizations = self.search.stats().determinizations,
            "search picked card"
        );
        self.play_specific_card(card)
    }

    fn play_specific_card(&mut self, card: Card) -> Result<Action> {
        let view = self.view.as_ref().ok_or(Error::NoRound)?;
        if card == Card::Guard {
            if let Some(action) = informed_guard(view, card, None) {
                return Ok(action);
            }
        }
        self.targeting.choose_specific(
            view.viewer(),
            view.num_players(),
            card,
            &|a| view.legal_action(a, card),
            &mut self.rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RandomAgent;
    use crate::core::PlayerId;
    use crate::games::loveletter::RoundBuilder;
    use crate::rules::{forced_play, RoundEngine};

    #[test]
    fn test_plays_legal_action() {
        let config = MCTSConfig::default()
            .with_determinizations(5)
            .with_iterations(5)
            .with_seed(9);
        let mut rng = GameRng::new(9);
        let mut round = RoundBuilder::new().player_count(3).deal(&mut rng);

        let mut agent = MCTSAgent::new(config);
        let view = round.view(PlayerId::new(0));
        let held = view.card(PlayerId::new(0)).unwrap();
        agent.new_round(view);
        let drawn = round.draw_card().unwrap();
        let action = agent.play_card(drawn).unwrap();

        assert!(round.legal_action(&action, drawn));
        assert_eq!(action.player(), PlayerId::new(0));
        if forced_play(drawn, held).is_none() {
            assert_eq!(agent.search().stats().determinizations, 5);
        }
    }

    #[test]
    fn test_searches_every_free_turn_of_a_round() {
        let config = MCTSConfig::default()
            .with_determinizations(6)
            .with_iterations(6)
            .with_seed(17);
        let me = PlayerId::new(0);
        let mut searched_turns = 0;

        for seed in 0..4 {
            let mut rng = GameRng::new(seed);
            let mut round = RoundBuilder::new().player_count(3).deal(&mut rng);
            let mut agent = MCTSAgent::new(config.clone().with_seed(seed));
            let mut opponents = [RandomAgent::new(seed + 1), RandomAgent::new(seed + 2)];
            agent.new_round(round.view(me));
            for (i, opponent) in opponents.iter_mut().enumerate() {
                opponent.new_round(round.view(PlayerId::new(i as u8 + 1)));
            }

            while !round.round_over() {
                let actor = round.next_player();
                let held = round.card(actor).unwrap();
                let drawn = round.draw_card().unwrap();

                let action = if actor == me {
                    let action = agent.play_card(drawn).unwrap();
                    if forced_play(drawn, held).is_none() {
                        assert_eq!(agent.search().stats().determinizations, 6);
                        searched_turns += 1;
                    }
                    action
                } else {
                    opponents[actor.index() - 1].play_card(drawn).unwrap()
                };
                assert!(round.legal_action(&action, drawn), "{action}");
                round.update(&action, drawn).unwrap();

                agent.see(&action, round.view(me));
                for (i, opponent) in opponents.iter_mut().enumerate() {
                    opponent.see(&action, round.view(PlayerId::new(i as u8 + 1)));
                }
            }
        }
        assert!(searched_turns > 0);
    }

    #[test]
    fn test_needs_a_round() {
        let mut agent = MCTSAgent::new(MCTSConfig::default());
        assert_eq!(agent.play_specific_card(Card::Handmaid), Err(Error::NoRound));
    }
}
