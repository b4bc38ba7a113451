//! Seat controllers.
//!
//! An [`Agent`] sees the round only through [`PlayerView`] snapshots: one at
//! the start of the round and one after every action at the table.
//!
//! - `RandomAgent`: uniform legal play
//! - `HeuristicAgent`: fixed priority rules that exploit revealed hands
//! - [`MCTSAgent`](crate::mcts::MCTSAgent): determinized tree search

mod heuristic;
mod random;

pub use heuristic::HeuristicAgent;
pub use random::RandomAgent;

use crate::core::{Action, Card, PlayerId};
use crate::error::Result;
use crate::games::loveletter::PlayerView;
use crate::rules::RoundState;

/// A player at the table.
pub trait Agent {
    /// Display name, for logs and match summaries.
    fn name(&self) -> &str;

    /// A new round starts; `view` is this seat's opening snapshot.
    fn new_round(&mut self, view: PlayerView);

    /// Some seat performed `action`; `view` is the state afterwards.
    fn see(&mut self, action: &Action, view: PlayerView);

    /// Choose an action after drawing `drawn`.
    fn play_card(&mut self, drawn: Card) -> Result<Action>;

    /// Choose targets for playing exactly `card`.
    fn play_specific_card(&mut self, card: Card) -> Result<Action>;
}

/// A Guard aimed at a reachable opponent whose (non-Guard) hand the viewer
/// knows, preferring `preferred`.
pub(crate) fn informed_guard(
    view: &PlayerView,
    drawn: Card,
    preferred: Option<PlayerId>,
) -> Option<Action> {
    let me = view.viewer();
    let reachable = view.reachable_opponents(me);
    let mut candidates: Vec<(PlayerId, Card)> = view
        .known_opponents()
        .filter(|&(p, card)| card != Card::Guard && reachable.contains(&p))
        .collect();
    candidates.sort_by_key(|&(p, _)| Some(p) != preferred);

    candidates.into_iter().find_map(|(target, guess)| {
        Action::guard(me, target, guess, view.num_players())
            .ok()
            .filter(|action| view.legal_action(action, drawn))
    })
}

/// Live opponent with the most tokens (lowest seat on ties).
pub(crate) fn leader(view: &PlayerView) -> Option<PlayerId> {
    let me = view.viewer();
    view.live_players()
        .into_iter()
        .filter(|&p| p != me)
        .max_by_key(|&p| (view.score(p), std::cmp::Reverse(p)))
}
