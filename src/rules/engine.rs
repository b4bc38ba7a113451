//! The rules contract the search and agents consume.
//!
//! - `RoundState`: what a seat can observe, plus the legality predicate.
//!   Implemented by the full `Round` and by a seat's masked `PlayerView`.
//! - `RoundEngine`: a state that can also be advanced (draw, play).
//!   Implemented by `Round` only.
//!
//! ## Implementation Notes
//!
//! - `card` returns `None` for hands the observer does not know
//! - `legal_action` has a default built from the accessors, so every
//!   implementation shares one set of targeting rules
//! - `update` must leave the state untouched when it returns an error

use im::Vector;

use crate::core::{Action, Card, PlayerId};
use crate::error::Result;

/// Observable round state.
pub trait RoundState {
    /// Seats at the table, eliminated or not.
    fn num_players(&self) -> usize;

    /// Seat whose turn it is.
    fn next_player(&self) -> PlayerId;

    /// Has this seat been knocked out of the round?
    fn eliminated(&self, player: PlayerId) -> bool;

    /// Is this seat shielded by a Handmaid?
    fn handmaid_protected(&self, player: PlayerId) -> bool;

    /// Cards left in the draw pile.
    fn deck_size(&self) -> usize;

    /// The seat's hand card, if known to the observer.
    fn card(&self, player: PlayerId) -> Option<Card>;

    /// Cards the seat has discarded, oldest first.
    fn discards(&self, player: PlayerId) -> &Vector<Card>;

    /// Rounds won (tokens of affection).
    fn score(&self, player: PlayerId) -> u32;

    /// Has the round finished?
    fn round_over(&self) -> bool;

    /// Cards whose location the observer cannot account for.
    fn unseen_cards(&self) -> Vec<Card>;

    // === Convenience Methods ===

    /// Seats still in the round.
    fn live_players(&self) -> Vec<PlayerId> {
        PlayerId::all(self.num_players())
            .filter(|&p| !self.eliminated(p))
            .collect()
    }

    /// Opponents `player` may aim a card at: live and unprotected.
    fn reachable_opponents(&self, player: PlayerId) -> Vec<PlayerId> {
        PlayerId::all(self.num_players())
            .filter(|&p| p != player && !self.eliminated(p) && !self.handmaid_protected(p))
            .collect()
    }

    /// Would `action` be legal for the next seat, who has just drawn `drawn`?
    fn legal_action(&self, action: &Action, drawn: Card) -> bool {
        let actor = action.player();
        if self.round_over() || actor != self.next_player() || self.eliminated(actor) {
            return false;
        }
        let Some(held) = self.card(actor) else {
            return false;
        };

        let played = action.card();
        let kept = if played == drawn {
            held
        } else if played == held {
            drawn
        } else {
            return false;
        };

        if kept == Card::Countess && played.forces_countess() {
            return false;
        }

        match action.target() {
            None => true,
            Some(target) => self.legal_target(actor, played, target),
        }
    }

    /// Targeting rules for `card` played by `actor`.
    fn legal_target(&self, actor: PlayerId, card: Card, target: PlayerId) -> bool {
        if !target.is_seated(self.num_players()) || self.eliminated(target) {
            return false;
        }
        if target == actor {
            return card.may_target_self() || self.reachable_opponents(actor).is_empty();
        }
        !self.handmaid_protected(target)
    }
}

/// A round that can be advanced.
pub trait RoundEngine: RoundState + Clone {
    /// Take the top card of the draw pile for the next seat.
    fn draw_card(&mut self) -> Result<Card>;

    /// Play `action` for the next seat, who drew `drawn`.
    fn update(&mut self, action: &Action, drawn: Card) -> Result<()>;
}

/// The card the rules force a player to discard, if any.
///
/// In priority order:
/// 1. a drawn Princess forces the held card;
/// 2. a held Princess forces the drawn card;
/// 3. a Countess held together with a King or Prince forces the Countess.
#[must_use]
pub fn forced_play(drawn: Card, held: Card) -> Option<Card> {
    if drawn == Card::Princess {
        Some(held)
    } else if held == Card::Princess {
        Some(drawn)
    } else if (drawn == Card::Countess && held.forces_countess())
        || (held == Card::Countess && drawn.forces_countess())
    {
        Some(Card::Countess)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_drawn_princess() {
        assert_eq!(forced_play(Card::Princess, Card::Guard), Some(Card::Guard));
        assert_eq!(forced_play(Card::Princess, Card::Countess), Some(Card::Countess));
    }

    #[test]
    fn test_forced_held_princess() {
        assert_eq!(forced_play(Card::Baron, Card::Princess), Some(Card::Baron));
    }

    #[test]
    fn test_forced_countess_either_slot() {
        assert_eq!(forced_play(Card::Countess, Card::King), Some(Card::Countess));
        assert_eq!(forced_play(Card::Prince, Card::Countess), Some(Card::Countess));
        assert_eq!(forced_play(Card::Countess, Card::Prince), Some(Card::Countess));
    }

    #[test]
    fn test_free_choice() {
        assert_eq!(forced_play(Card::Guard, Card::Priest), None);
        assert_eq!(forced_play(Card::Countess, Card::Baron), None);
        assert_eq!(forced_play(Card::King, Card::Prince), None);
    }
}
