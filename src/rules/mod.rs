//! Rules contract for a Love Letter round.
//!
//! The search never reads a concrete round type directly; it drives
//! everything through `RoundState` / `RoundEngine` and the shared
//! `forced_play` rule.

pub mod engine;

pub use engine::{forced_play, RoundEngine, RoundState};
