//! Love Letter, first edition, 16-card deck.
//!
//! - One card is set aside face down; each seat is dealt one card
//! - On your turn: draw a card, then play one of your two cards
//! - A round ends when one seat remains or the draw pile is empty after a turn
//! - Survivors compare hand values, then discard totals; all tied seats win
//!
//! Supports 2-4 players.

mod round;
mod view;

pub use round::{DrawPile, Round, RoundBuilder, RoundParts};
pub use view::PlayerView;
