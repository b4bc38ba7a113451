//! Error types.
//!
//! Three failure classes matter to the search:
//! - illegal actions are recovered by the playout policy's rejection loop;
//! - an exhausted deck ends the rollout it happens in (scored as a loss);
//! - a malformed determinization aborts the whole decision.

use thiserror::Error;

use crate::core::{Card, PlayerId};

/// Failure to construct an [`Action`](crate::core::Action).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{card} requires a target seat")]
    MissingTarget { card: Card },

    #[error("Guard requires a guessed rank")]
    MissingGuess,

    #[error("Guard may not name Guard")]
    GuardGuess,

    #[error("{player} is not seated at a table of {player_count}")]
    SeatOutOfRange { player: PlayerId, player_count: usize },
}

/// Crate-wide error type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("illegal action: {0}")]
    IllegalAction(String),

    #[error("cannot draw from an empty deck")]
    EmptyDeck,

    #[error("the round is already over")]
    RoundOver,

    #[error("invalid action: {0}")]
    InvalidAction(#[from] ActionError),

    #[error("malformed determinization: {0}")]
    MalformedDeterminization(String),

    #[error("no legal action found for {card} after {attempts} attempts")]
    NoLegalAction { card: Card, attempts: u32 },

    #[error("agent has not been given a round")]
    NoRound,
}

/// Result alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
