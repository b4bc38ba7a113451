//! Sampling a full hypothetical round consistent with one seat's view.
//!
//! The view is the one a seat holds when its turn comes: captured before the
//! draw, so its pile size still counts the drawn card.
//!
//! Unseen pool = full deck - own hand - drawn card - every discard - opponent
//! hands the viewer knows. Known hands stay pinned to their holders; the pool
//! is shuffled and dealt to the other live opponents, then the set-aside card,
//! then the rest of the draw pile. The drawn card goes back on top of the
//! pile, so the sampled round sits just before the viewer's draw.

use crate::core::{Card, CardCounts, GameRng, PlayerId, PlayerMap};
use crate::error::{Error, Result};
use crate::games::loveletter::{PlayerView, Round, RoundParts};
use crate::rules::RoundState;

/// Build one hypothetical round from a pre-draw `view` and the card just
/// drawn.
///
/// Fails with [`Error::MalformedDeterminization`] when the visible cards
/// cannot be completed into a single deck, or when the view shows no pile to
/// have drawn from.
pub fn determinize(view: &PlayerView, drawn: Card, rng: &mut GameRng) -> Result<Round> {
    let n = view.num_players();
    let me = view.viewer();
    let held = view
        .card(me)
        .ok_or_else(|| Error::MalformedDeterminization(format!("{} holds no card", me)))?;

    let mut pool = CardCounts::full_deck();
    let mut take = |card: Card, location: &str| {
        if pool.remove(card) {
            Ok(())
        } else {
            Err(Error::MalformedDeterminization(format!(
                "too many {} cards ({})",
                card, location
            )))
        }
    };

    take(held, "hand")?;
    take(drawn, "drawn")?;
    for player in PlayerId::all(n) {
        for &card in view.discards(player) {
            take(card, "discards")?;
        }
    }
    let pinned: Vec<_> = view.known_opponents().collect();
    for &(_, card) in &pinned {
        take(card, "known hand")?;
    }

    let unpinned: Vec<_> = view
        .live_players()
        .into_iter()
        .filter(|&p| p != me && !pinned.iter().any(|&(q, _)| q == p))
        .collect();
    let pile = view.deck_size().checked_sub(1).ok_or_else(|| {
        Error::MalformedDeterminization(format!("{} drew from an empty pile", me))
    })?;
    let expected = unpinned.len() + pile + usize::from(view.has_set_aside());
    if pool.total() != expected {
        return Err(Error::MalformedDeterminization(format!(
            "{} unseen cards for {} hidden slots",
            pool.total(),
            expected
        )));
    }

    let mut cards = pool.to_vec();
    rng.shuffle(&mut cards);

    let mut hands = PlayerMap::with_value(n, None);
    hands[me] = Some(held);
    for &(player, card) in &pinned {
        hands[player] = Some(card);
    }
    for &player in &unpinned {
        hands[player] = cards.pop();
    }
    let set_aside = if view.has_set_aside() { cards.pop() } else { None };

    let mut deck = cards;
    deck.push(drawn);

    let mut known = PlayerMap::new(n, |_| PlayerMap::with_value(n, None));
    for &(player, card) in &pinned {
        known[me][player] = Some(card);
    }

    Round::from_parts(RoundParts {
        deck,
        set_aside,
        hands,
        discards: PlayerMap::new(n, |p| view.discards(p).clone()),
        eliminated: PlayerMap::new(n, |p| view.eliminated(p)),
        protected: PlayerMap::new(n, |p| view.handmaid_protected(p)),
        known,
        next_player: view.next_player(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::games::loveletter::RoundBuilder;
    use crate::rules::RoundEngine;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    /// Seat 0 holds a Priest and has seen seat 1's Princess; two Guards and
    /// the set-aside Guard are all that is hidden.
    fn late_round() -> Round {
        let discards = |cards: &[Card]| cards.iter().copied().collect::<im::Vector<_>>();
        let mut known = PlayerMap::new(2, |_| PlayerMap::with_value(2, None));
        known[P0][P1] = Some(Card::Princess);

        Round::from_parts(RoundParts {
            deck: vec![Card::Guard, Card::Guard],
            set_aside: Some(Card::Guard),
            hands: PlayerMap::new(2, |p| Some(if p == P0 { Card::Priest } else { Card::Princess })),
            discards: PlayerMap::new(2, |p| {
                if p == P0 {
                    discards(&[Card::Guard, Card::Baron, Card::Handmaid, Card::Prince, Card::King, Card::Priest])
                } else {
                    discards(&[Card::Guard, Card::Baron, Card::Handmaid, Card::Prince, Card::Countess])
                }
            }),
            eliminated: PlayerMap::with_value(2, false),
            protected: PlayerMap::with_value(2, false),
            known,
            next_player: P0,
        })
        .unwrap()
    }

    #[test]
    fn test_conserves_deck() {
        let mut rng = GameRng::new(21);
        let mut round = RoundBuilder::new().player_count(4).deal(&mut rng);
        let view = round.view(P0);
        let drawn = round.draw_card().unwrap();

        for _ in 0..20 {
            let sample = determinize(&view, drawn, &mut rng).unwrap();
            assert_eq!(sample.accounted_cards(), CardCounts::full_deck());
            assert_eq!(sample.deck_size(), view.deck_size());
            assert_eq!(sample.deck().last(), Some(&drawn));
            assert_eq!(sample.card(P0), view.card(P0));
            assert_eq!(sample.next_player(), P0);
            for p in PlayerId::all(4) {
                assert_eq!(sample.score(p), 0);
            }
        }
    }

    #[test]
    fn test_known_card_is_pinned() {
        let mut round = late_round();
        let view = round.view(P0);
        let drawn = round.draw_card().unwrap();
        let mut rng = GameRng::new(8);

        for _ in 0..10 {
            let sample = determinize(&view, drawn, &mut rng).unwrap();
            assert_eq!(sample.card(P1), Some(Card::Princess));
            assert_eq!(sample.known_card(P0, P1), Some(Card::Princess));
            assert_eq!(sample.known_card(P1, P0), None);
            assert_eq!(sample.deck(), &[Card::Guard, Card::Guard]);
            assert_eq!(sample.set_aside(), Some(Card::Guard));
        }
    }

    #[test]
    fn test_samples_differ() {
        let mut rng = GameRng::new(5);
        let mut round = RoundBuilder::new().player_count(4).deal(&mut rng);
        let view = round.view(P0);
        let drawn = round.draw_card().unwrap();

        let first = determinize(&view, drawn, &mut rng).unwrap();
        let differs = (0..20).any(|_| {
            let other = determinize(&view, drawn, &mut rng).unwrap();
            other.deck() != first.deck() || other.set_aside() != first.set_aside()
        });
        assert!(differs);
    }

    #[test]
    fn test_view_taken_after_draw_is_rejected() {
        let mut round = late_round();
        let drawn = round.draw_card().unwrap();

        // The pile no longer counts the drawn card, so one card is left over.
        let result = determinize(&round.view(P0), drawn, &mut GameRng::new(2));
        assert!(matches!(result, Err(Error::MalformedDeterminization(_))));
    }

    #[test]
    fn test_inconsistent_draw_fails() {
        let round = late_round();
        let view = round.view(P0);

        // The only Princess is pinned to seat 1.
        let result = determinize(&view, Card::Princess, &mut GameRng::new(1));
        assert!(matches!(result, Err(Error::MalformedDeterminization(_))));
    }

    #[test]
    fn test_eliminated_viewer_fails() {
        let mut round = late_round();
        let drawn = round.draw_card().unwrap();
        round.update(&Action::guard(P0, P1, Card::Baron, 2).unwrap(), drawn).unwrap();
        let drawn = round.draw_card().unwrap();
        round.update(&Action::guard(P1, P0, Card::Priest, 2).unwrap(), drawn).unwrap();
        assert!(round.eliminated(P0));

        let result = determinize(&round.view(P0), Card::Guard, &mut GameRng::new(1));
        assert!(matches!(result, Err(Error::MalformedDeterminization(_))));
    }
}
