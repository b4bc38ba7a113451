//! Match driver: deals rounds, asks agents for actions and keeps tallies.
//!
//! The driver owns the authoritative [`Round`]; agents only ever receive
//! [`PlayerView`](crate::games::loveletter::PlayerView) snapshots. An agent
//! that errors or proposes an illegal action is replaced for that turn by a
//! uniform random legal play, so a match never aborts on agent misbehaviour.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agents::Agent;
use crate::core::{Action, ActionRecord, Card, GameRng, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{Error, Result};
use crate::games::loveletter::{Round, RoundBuilder};
use crate::mcts::{PlayoutPolicy, UniformRandom};
use crate::rules::{RoundEngine, RoundState};

/// Configuration for a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Tokens needed to win the match. `None` uses the table default:
    /// 7, 5 or 4 for 2, 3 or 4 players.
    pub tokens_to_win: Option<u32>,

    /// Seed for shuffling and substitute plays.
    pub seed: u64,

    /// Seat that starts the first round.
    pub first_player: PlayerId,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tokens_to_win: None,
            seed: 0,
            first_player: PlayerId::new(0),
        }
    }
}

impl MatchConfig {
    /// Create a new match config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token target.
    pub fn with_tokens_to_win(mut self, tokens: u32) -> Self {
        self.tokens_to_win = Some(tokens.max(1));
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting seat.
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Token target for a table of `player_count`.
    #[must_use]
    pub fn target(&self, player_count: usize) -> u32 {
        self.tokens_to_win.unwrap_or(match player_count {
            2 => 7,
            3 => 5,
            _ => 4,
        })
    }
}

/// What happened in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub winners: Vec<PlayerId>,
    pub turns: u32,
    pub actions: Vec<ActionRecord>,

    /// Turns where the driver replaced an agent's action.
    pub substitutions: u32,
}

/// Final result of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Seats at or above the token target.
    pub winners: Vec<PlayerId>,
    pub scores: Vec<u32>,
    pub rounds: Vec<RoundRecord>,
}

/// A match between boxed agents, one per seat.
pub struct Match {
    agents: Vec<Box<dyn Agent>>,
    config: MatchConfig,
    rng: GameRng,
    fallback: UniformRandom,
    scores: PlayerMap<u32>,
    first_player: PlayerId,
}

impl Match {
    /// Seat `agents` in order. Panics unless there are 2-4 of them.
    pub fn new(agents: Vec<Box<dyn Agent>>, config: MatchConfig) -> Self {
        let n = agents.len();
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&n),
            "Love Letter seats 2-4 players"
        );
        Self {
            rng: GameRng::new(config.seed),
            fallback: UniformRandom::default(),
            scores: PlayerMap::with_value(n, 0),
            first_player: PlayerId::new(config.first_player.index().min(n - 1) as u8),
            agents,
            config,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.agents.len()
    }

    /// Current token tallies.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    /// Seats that have reached the token target.
    #[must_use]
    pub fn champions(&self) -> Vec<PlayerId> {
        let target = self.config.target(self.player_count());
        self.scores
            .iter()
            .filter(|&(_, &score)| score >= target)
            .map(|(p, _)| p)
            .collect()
    }

    /// Play rounds until some seat reaches the token target.
    pub fn play(&mut self) -> Result<MatchResult> {
        let mut rounds = Vec::new();
        while self.champions().is_empty() {
            rounds.push(self.play_round()?);
        }

        let winners = self.champions();
        info!(?winners, scores = ?self.scores.values().collect::<Vec<_>>(), rounds = rounds.len(), "match over");
        Ok(MatchResult {
            winners,
            scores: self.scores.values().copied().collect(),
            rounds,
        })
    }

    /// Deal and play one round to completion.
    pub fn play_round(&mut self) -> Result<RoundRecord> {
        let n = self.player_count();
        let tallies: Vec<u32> = self.scores.values().copied().collect();
        let mut round = RoundBuilder::new()
            .player_count(n)
            .first_player(self.first_player)
            .scores(&tallies)
            .deal(&mut self.rng);

        for player in PlayerId::all(n) {
            self.agents[player.index()].new_round(round.view(player));
        }

        let mut actions = Vec::new();
        let mut substitutions = 0;
        while !round.round_over() {
            let actor = round.next_player();
            let drawn = round.draw_card()?;

            let proposed = self.agents[actor.index()].play_card(drawn);
            let action = match proposed {
                Ok(action) if round.legal_action(&action, drawn) => action,
                other => {
                    let agent = self.agents[actor.index()].name();
                    match other {
                        Ok(action) => warn!(player = %actor, agent, %action, "illegal action substituted"),
                        Err(err) => warn!(player = %actor, agent, %err, "agent failed, action substituted"),
                    }
                    substitutions += 1;
                    self.substitute(&round, actor, drawn)?
                }
            };

            round.update(&action, drawn)?;
            debug!(turn = round.turn(), %action, "played");
            actions.push(ActionRecord::new(action, drawn, round.turn()));

            for player in PlayerId::all(n) {
                self.agents[player.index()].see(&action, round.view(player));
            }
        }

        let winners = round.winners().to_vec();
        for player in PlayerId::all(n) {
            self.scores[player] = round.score(player);
        }
        if let Some(&first) = winners.first() {
            self.first_player = first;
        }
        info!(?winners, turns = round.turn(), "round over");

        Ok(RoundRecord {
            winners,
            turns: round.turn(),
            actions,
            substitutions,
        })
    }

    fn substitute(&mut self, round: &Round, actor: PlayerId, drawn: Card) -> Result<Action> {
        let held = round
            .card(actor)
            .ok_or_else(|| Error::IllegalAction(format!("{} has no hand", actor)))?;
        self.fallback.choose(
            actor,
            round.num_players(),
            drawn,
            held,
            &|a| round.legal_action(a, drawn),
            &mut self.rng,
        )
    }
}
