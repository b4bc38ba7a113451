//! Rule-based agent that exploits revealed hands.

use tracing::trace;

use crate::core::{Action, Card, CardCounts, GameRng, PlayerId};
use crate::error::{Error, Result};
use crate::games::loveletter::PlayerView;
use crate::mcts::{PlayoutPolicy, UniformRandom};
use crate::rules::{forced_play, RoundState};

use super::{informed_guard, leader, Agent};

/// Draw pile size below which swapping for a known high card pays off.
const LATE_ROUND: usize = 8;

/// Plays the first matching rule, in priority order:
///
/// 1. Countess when it must (or may) go with a King, Prince or Princess
/// 2. Guard naming an opponent's known card
/// 3. Prince at a known Princess
/// 4. Baron while keeping a high card
/// 5. Prince at a known King or Countess
/// 6. King for a known Countess or Princess, late in the round
/// 7. Priest, Handmaid, Guard (naming the likeliest unseen rank), Prince, King
///
/// Anything else, or a pick the rules reject, falls back to uniform play.
pub struct HeuristicAgent {
    fallback: UniformRandom,
    rng: GameRng,
    view: Option<PlayerView>,
}

impl HeuristicAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            fallback: UniformRandom::default(),
            rng: GameRng::new(seed),
            view: None,
        }
    }
}

/// Most common rank among cards the viewer cannot place, Guards excluded.
fn likeliest_unseen(view: &PlayerView, drawn: Card) -> Card {
    let mut counts = CardCounts::from_cards(view.unseen_cards().iter());
    counts.remove(drawn);
    Card::GUESSABLE
        .iter()
        .copied()
        .filter(|&card| counts.get(card) > 0)
        .max_by_key(|&card| (counts.get(card), card))
        .unwrap_or(Card::Princess)
}

/// The rule-based pick, if any rule applies.
fn pick(view: &PlayerView, drawn: Card, held: Card, playable: &[Card]) -> Option<Action> {
    let me = view.viewer();
    let n = view.num_players();
    let has = |card: Card| playable.contains(&card);
    let kept = |card: Card| if card == drawn { held } else { drawn };

    let reachable = view.reachable_opponents(me);
    let top = leader(view);
    let aim = top
        .filter(|p| reachable.contains(p))
        .or_else(|| reachable.first().copied());
    let holding = |ranks: &[Card]| -> Option<PlayerId> {
        reachable
            .iter()
            .copied()
            .find(|&p| view.card(p).is_some_and(|c| ranks.contains(&c)))
    };

    if has(Card::Countess)
        && matches!(kept(Card::Countess), Card::Prince | Card::King | Card::Princess)
    {
        return Action::countess(me, n).ok();
    }
    if has(Card::Guard) {
        if let Some(action) = informed_guard(view, drawn, top) {
            return Some(action);
        }
    }
    if has(Card::Prince) {
        if let Some(target) = holding(&[Card::Princess]) {
            return Action::prince(me, target, n).ok();
        }
    }
    if has(Card::Baron)
        && matches!(
            kept(Card::Baron),
            Card::Prince | Card::King | Card::Countess | Card::Princess
        )
    {
        return Action::baron(me, aim.unwrap_or(me), n).ok();
    }
    if has(Card::Prince) {
        if let Some(target) = holding(&[Card::King, Card::Countess]) {
            return Action::prince(me, target, n).ok();
        }
    }
    if has(Card::King) && view.deck_size() < LATE_ROUND && kept(Card::King) != Card::Princess {
        if let Some(target) = holding(&[Card::Countess, Card::Princess]) {
            return Action::king(me, target, n).ok();
        }
    }
    if has(Card::Priest) {
        return Action::priest(me, aim.unwrap_or(me), n).ok();
    }
    if has(Card::Handmaid) {
        return Action::handmaid(me, n).ok();
    }
    if has(Card::Guard) {
        return Action::guard(me, aim.unwrap_or(me), likeliest_unseen(view, drawn), n).ok();
    }
    if has(Card::Prince) {
        if let Some(target) = aim {
            return Action::prince(me, target, n).ok();
        }
    }
    if has(Card::King) && kept(Card::King) != Card::Princess {
        return Action::king(me, aim.unwrap_or(me), n).ok();
    }
    None
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "Heuristic"
    }

    fn new_round(&mut self, view: PlayerView) {
        self.view = Some(view);
    }

    fn see(&mut self, _action: &Action, view: PlayerView) {
        self.view = Some(view);
    }

    fn play_card(&mut self, drawn: Card) -> Result<Action> {
        let view = self.view.as_ref().ok_or(Error::NoRound)?;
        let me = view.viewer();
        let held = view.card(me).ok_or(Error::NoRound)?;

        let playable = match forced_play(drawn, held) {
            Some(card) => vec![card],
            None => vec![drawn, held],
        };
        let choice = pick(view, drawn, held, &playable).filter(|a| view.legal_action(a, drawn));
        if let Some(action) = choice {
            trace!(%action, "heuristic pick");
            return Ok(action);
        }

        self.fallback.choose(
            me,
            view.num_players(),
            drawn,
            held,
            &|a| view.legal_action(a, drawn),
            &mut self.rng,
        )
    }

    fn play_specific_card(&mut self, card: Card) -> Result<Action> {
        let view = self.view.as_ref().ok_or(Error::NoRound)?;
        let me = view.viewer();
        let held = view.card(me).ok_or(Error::NoRound)?;

        let choice = pick(view, card, held, &[card]).filter(|a| view.legal_action(a, card));
        if let Some(action) = choice {
            return Ok(action);
        }
        self.fallback.choose_specific(
            me,
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
    use crate::core::PlayerMap;
    use crate::games::loveletter::{Round, RoundBuilder, RoundParts};
    use crate::rules::RoundEngine;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    /// Two seats; seat 0 holds `mine` and has seen seat 1's `theirs`.
    /// The pile (top last) is `deck`; everything else is discarded.
    fn informed(mine: Card, theirs: Card, deck: &[Card]) -> Round {
        let mut rest = CardCounts::full_deck();
        for card in [mine, theirs].iter().chain(deck) {
            assert!(rest.remove(*card));
        }
        let set_aside = rest.to_vec().pop().unwrap();
        rest.remove(set_aside);

        let mut known = PlayerMap::new(2, |_| PlayerMap::with_value(2, None));
        known[P0][P1] = Some(theirs);
        Round::from_parts(RoundParts {
            deck: deck.to_vec(),
            set_aside: Some(set_aside),
            hands: PlayerMap::new(2, |p| Some(if p == P0 { mine } else { theirs })),
            discards: PlayerMap::new(2, |p| {
                if p == P0 {
                    rest.to_vec().into_iter().collect()
                } else {
                    im::Vector::new()
                }
            }),
            eliminated: PlayerMap::with_value(2, false),
            protected: PlayerMap::with_value(2, false),
            known,
            next_player: P0,
        })
        .unwrap()
    }

    fn decide(round: &mut Round) -> (Action, Card) {
        let mut agent = HeuristicAgent::new(0);
        agent.new_round(round.view(P0));
        let drawn = round.draw_card().unwrap();
        (agent.play_card(drawn).unwrap(), drawn)
    }

    #[test]
    fn test_guard_names_known_card() {
        let mut round = informed(Card::Priest, Card::Baron, &[Card::Handmaid, Card::Guard]);
        let (action, drawn) = decide(&mut round);

        assert_eq!(action, Action::guard(P0, P1, Card::Baron, 2).unwrap());
        round.update(&action, drawn).unwrap();
        assert!(round.eliminated(P1));
    }

    #[test]
    fn test_countess_goes_with_king() {
        let mut round = informed(Card::King, Card::Baron, &[Card::Handmaid, Card::Countess]);
        let (action, _) = decide(&mut round);
        assert_eq!(action.card(), Card::Countess);
    }

    #[test]
    fn test_prince_hits_known_princess() {
        let mut round = informed(Card::Prince, Card::Princess, &[Card::Handmaid, Card::Priest]);
        let (action, _) = decide(&mut round);
        assert_eq!(action, Action::prince(P0, P1, 2).unwrap());
    }

    #[test]
    fn test_never_discards_princess() {
        for seed in 0..30 {
            let mut rng = GameRng::new(seed);
            let mut round = RoundBuilder::new().player_count(4).deal(&mut rng);
            let mut agent = HeuristicAgent::new(seed);
            agent.new_round(round.view(P0));
            let drawn = round.draw_card().unwrap();

            let action = agent.play_card(drawn).unwrap();
            assert!(round.legal_action(&action, drawn));
            assert_ne!(action.card(), Card::Princess);
        }
    }

    #[test]
    fn test_likeliest_unseen_skips_guards() {
        let round = RoundBuilder::new().player_count(2).deal(&mut GameRng::new(1));
        let guess = likeliest_unseen(&round.view(P0), Card::Guard);
        assert_ne!(guess, Card::Guard);
    }
}
