//! Core types: seats, cards, actions, RNG.
//!
//! These are shared by the rules engine, the agents and the search.

pub mod action;
pub mod card;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord};
pub use card::{Card, CardCounts, DECK_SIZE};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::GameRng;
