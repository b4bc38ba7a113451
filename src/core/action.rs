//! Action representation: the rank being played plus whatever that rank needs.
//!
//! Actions are validated structurally at construction (seat range, required
//! parameters, Guard guesses). Whether an action is legal in a particular
//! round is the rules engine's call, see
//! [`RoundState::legal_action`](crate::rules::RoundState::legal_action).
//!
//! ## Example
//!
//! ```
//! use loveletter_mcts::core::{Action, Card, PlayerId};
//!
//! let me = PlayerId::new(0);
//! let guard = Action::guard(me, PlayerId::new(1), Card::Priest, 4).unwrap();
//! assert_eq!(guard.card(), Card::Guard);
//! assert_eq!(guard.target(), Some(PlayerId::new(1)));
//!
//! // Guard may never name Guard.
//! assert!(Action::guard(me, PlayerId::new(1), Card::Guard, 4).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::player::PlayerId;
use crate::error::ActionError;

/// A card play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Guard { player: PlayerId, target: PlayerId, guess: Card },
    Priest { player: PlayerId, target: PlayerId },
    Baron { player: PlayerId, target: PlayerId },
    Handmaid { player: PlayerId },
    Prince { player: PlayerId, target: PlayerId },
    King { player: PlayerId, target: PlayerId },
    Countess { player: PlayerId },
    Princess { player: PlayerId },
}

impl Action {
    /// Build an action for `card`.
    ///
    /// `target` and `guess` are ignored by ranks that do not use them.
    pub fn play(
        card: Card,
        player: PlayerId,
        target: Option<PlayerId>,
        guess: Option<Card>,
        player_count: usize,
    ) -> Result<Self, ActionError> {
        check_seat(player, player_count)?;

        let target = if card.needs_target() {
            let target = target.ok_or(ActionError::MissingTarget { card })?;
            check_seat(target, player_count)?;
            target
        } else {
            player
        };

        let action = match card {
            Card::Guard => {
                let guess = guess.ok_or(ActionError::MissingGuess)?;
                if guess == Card::Guard {
                    return Err(ActionError::GuardGuess);
                }
                Action::Guard { player, target, guess }
            }
            Card::Priest => Action::Priest { player, target },
            Card::Baron => Action::Baron { player, target },
            Card::Handmaid => Action::Handmaid { player },
            Card::Prince => Action::Prince { player, target },
            Card::King => Action::King { player, target },
            Card::Countess => Action::Countess { player },
            Card::Princess => Action::Princess { player },
        };
        Ok(action)
    }

    pub fn guard(
        player: PlayerId,
        target: PlayerId,
        guess: Card,
        player_count: usize,
    ) -> Result<Self, ActionError> {
        Self::play(Card::Guard, player, Some(target), Some(guess), player_count)
    }

    pub fn priest(player: PlayerId, target: PlayerId, player_count: usize) -> Result<Self, ActionError> {
        Self::play(Card::Priest, player, Some(target), None, player_count)
    }

    pub fn baron(player: PlayerId, target: PlayerId, player_count: usize) -> Result<Self, ActionError> {
        Self::play(Card::Baron, player, Some(target), None, player_count)
    }

    pub fn handmaid(player: PlayerId, player_count: usize) -> Result<Self, ActionError> {
        Self::play(Card::Handmaid, player, None, None, player_count)
    }

    pub fn prince(player: PlayerId, target: PlayerId, player_count: usize) -> Result<Self, ActionError> {
        Self::play(Card::Prince, player, Some(target), None, player_count)
    }

    pub fn king(player: PlayerId, target: PlayerId, player_count: usize) -> Result<Self, ActionError> {
        Self::play(Card::King, player, Some(target), None, player_count)
    }

    pub fn countess(player: PlayerId, player_count: usize) -> Result<Self, ActionError> {
        Self::play(Card::Countess, player, None, None, player_count)
    }

    /// The rank being discarded.
    #[must_use]
    pub fn card(&self) -> Card {
        match self {
            Action::Guard { .. } => Card::Guard,
            Action::Priest { .. } => Card::Priest,
            Action::Baron { .. } => Card::Baron,
            Action::Handmaid { .. } => Card::Handmaid,
            Action::Prince { .. } => Card::Prince,
            Action::King { .. } => Card::King,
            Action::Countess { .. } => Card::Countess,
            Action::Princess { .. } => Card::Princess,
        }
    }

    /// The seat playing the card.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            Action::Guard { player, .. }
            | Action::Priest { player, .. }
            | Action::Baron { player, .. }
            | Action::Handmaid { player }
            | Action::Prince { player, .. }
            | Action::King { player, .. }
            | Action::Countess { player }
            | Action::Princess { player } => player,
        }
    }

    /// The targeted seat, for ranks that take one.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match *self {
            Action::Guard { target, .. }
            | Action::Priest { target, .. }
            | Action::Baron { target, .. }
            | Action::Prince { target, .. }
            | Action::King { target, .. } => Some(target),
            Action::Handmaid { .. } | Action::Countess { .. } | Action::Princess { .. } => None,
        }
    }

    /// The rank named by a Guard.
    #[must_use]
    pub fn guess(&self) -> Option<Card> {
        match *self {
            Action::Guard { guess, .. } => Some(guess),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} plays {}", self.player(), self.card())?;
        if let Some(target) = self.target() {
            write!(f, " on {}", target)?;
        }
        if let Some(guess) = self.guess() {
            write!(f, " naming {}", guess)?;
        }
        Ok(())
    }
}

fn check_seat(player: PlayerId, player_count: usize) -> Result<(), ActionError> {
    if player.is_seated(player_count) {
        Ok(())
    } else {
        Err(ActionError::SeatOutOfRange { player, player_count })
    }
}

/// A played action with metadata for round history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// The card the player drew this turn.
    pub drawn: Card,

    /// Turn number within the round (starts at 1).
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: Action, drawn: Card, turn: u32) -> Self {
        Self { action, drawn, turn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_untargeted_ranks_ignore_target() {
        let action = Action::play(Card::Handmaid, P0, Some(P1), None, 2).unwrap();
        assert_eq!(action, Action::Handmaid { player: P0 });
        assert_eq!(action.target(), None);
    }

    #[test]
    fn test_missing_target() {
        let err = Action::play(Card::Baron, P0, None, None, 2).unwrap_err();
        assert_eq!(err, ActionError::MissingTarget { card: Card::Baron });
    }

    #[test]
    fn test_missing_guess() {
        let err = Action::play(Card::Guard, P0, Some(P1), None, 2).unwrap_err();
        assert_eq!(err, ActionError::MissingGuess);
    }

    #[test]
    fn test_guard_cannot_name_guard() {
        assert_eq!(
            Action::guard(P0, P1, Card::Guard, 2).unwrap_err(),
            ActionError::GuardGuess
        );
    }

    #[test]
    fn test_seat_out_of_range() {
        let err = Action::prince(P0, PlayerId::new(3), 3).unwrap_err();
        assert!(matches!(err, ActionError::SeatOutOfRange { player_count: 3, .. }));

        let err = Action::countess(PlayerId::new(5), 4).unwrap_err();
        assert!(matches!(err, ActionError::SeatOutOfRange { .. }));
    }

    #[test]
    fn test_accessors() {
        let action = Action::guard(P1, P0, Card::King, 2).unwrap();
        assert_eq!(action.card(), Card::Guard);
        assert_eq!(action.player(), P1);
        assert_eq!(action.target(), Some(P0));
        assert_eq!(action.guess(), Some(Card::King));
    }

    #[test]
    fn test_display() {
        let action = Action::guard(P0, P1, Card::Baron, 2).unwrap();
        assert_eq!(action.to_string(), "P0 plays Guard on P1 naming Baron");
        let action = Action::handmaid(P1, 2).unwrap();
        assert_eq!(action.to_string(), "P1 plays Handmaid");
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::king(P0, P1, 2).unwrap();
        let record = ActionRecord::new(action, Card::Guard, 3);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
