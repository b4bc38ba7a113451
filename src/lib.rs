//! # loveletter-mcts
//!
//! A determinized Monte Carlo Tree Search agent for the card game Love Letter.
//!
//! ## Design Principles
//!
//! 1. **Hidden Information by Sampling**: The agent never sees opponents'
//!    hands. Each decision samples many full rounds consistent with what it
//!    has observed and searches each one.
//!
//! 2. **Binary Decisions**: A turn is always "play the drawn card or the held
//!    card"; targets and guesses are resolved by the playout policy.
//!
//! 3. **Explicit Randomness**: Every random choice flows through a seeded
//!    `GameRng`, so a search with the same seed makes the same decision.
//!
//! ## Architecture
//!
//! - **Rules contract**: the search drives rounds through `RoundState` /
//!   `RoundEngine` only; `Round` and `PlayerView` implement them.
//!
//! - **Persistent Data Structures**: discard histories use `im` vectors, so
//!   cloning a round for a search branch is cheap.
//!
//! - **Arena Trees**: search nodes live in a flat vector linked by index.
//!
//! ## Modules
//!
//! - `core`: Seats, cards, actions, RNG
//! - `rules`: Round contract and the forced-play rule
//! - `games`: The Love Letter rules engine
//! - `agents`: Agent contract, random and heuristic agents
//! - `mcts`: Determinization, search tree, policies, MCTS agent
//! - `play`: Match driver
//! - `error`: Error types

pub mod agents;
pub mod core;
pub mod error;
pub mod games;
pub mod mcts;
pub mod play;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Card, CardCounts, GameRng, PlayerId, PlayerMap, DECK_SIZE,
};

pub use crate::error::{ActionError, Error, Result};

pub use crate::rules::{forced_play, RoundEngine, RoundState};

pub use crate::games::loveletter::{PlayerView, Round, RoundBuilder, RoundParts};

pub use crate::agents::{Agent, HeuristicAgent, RandomAgent};

pub use crate::mcts::{
    determinize, MCTSAgent, MCTSConfig, MCTSSearch, NodeId, Outcome, PlayoutPolicy, RootStats,
    SearchNode, SearchStats, SearchTree, SelectionPolicy, TreeStats, UniformRandom, UCB1,
};

pub use crate::play::{Match, MatchConfig, MatchResult, RoundRecord};
