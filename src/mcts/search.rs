//! Core MCTS search algorithm.
//!
//! Determinized MCTS over a binary tree: every node either is a leaf or has
//! exactly two children, one per card the seat on move could play.
//!
//! For each decision:
//! 1. Outer loop: sample a hypothetical round consistent with the view
//!    (determinization) and build a fresh tree rooted at it.
//! 2. Inner loop: select (UCB1), expand, roll out, backpropagate.
//! 3. The two root branches keep their visit and win counts across all
//!    determinizations; the drawn card is played only if its branch has a
//!    strictly higher win ratio.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{Action, Card, GameRng, PlayerId};
use crate::error::{Error, Result};
use crate::games::loveletter::PlayerView;
use crate::rules::{forced_play, RoundEngine, RoundState};

use super::config::MCTSConfig;
use super::determinize::determinize;
use super::node::{NodeId, Outcome, SearchNode};
use super::policy::{PlayoutPolicy, SelectionPolicy, UniformRandom, UCB1};
use super::stats::{BranchTally, RootStats, SearchStats};
use super::tree::SearchTree;

/// Outcome of a state for `me`, if no further play can change it.
///
/// A finished round is a win when `me` holds a positive tally; searched
/// rounds start with zeroed tallies, so that means `me` won this round.
#[must_use]
pub fn terminal_outcome<S: RoundState>(state: &S, me: PlayerId) -> Option<Outcome> {
    if state.round_over() {
        Some(if state.score(me) > 0 { Outcome::Win } else { Outcome::Loss })
    } else if state.eliminated(me) {
        Some(Outcome::Loss)
    } else {
        None
    }
}

/// A card just drawn by the seat on move.
#[derive(Clone, Copy, Debug)]
struct Draw {
    actor: PlayerId,
    card: Card,
}

/// Main MCTS search context.
///
/// Owns the configuration, policies, RNG and the root statistics that
/// persist across determinizations of one decision.
pub struct MCTSSearch {
    /// Search configuration.
    config: MCTSConfig,

    /// RNG for determinization and playouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Playout policy, used for every seat.
    playout: Box<dyn PlayoutPolicy>,

    /// Drawn/held branch counts for the current decision.
    root_stats: RootStats,

    /// Search statistics.
    stats: SearchStats,

    deadline: Option<Instant>,
}

impl MCTSSearch {
    /// Create a new MCTS search context.
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            playout: Box::new(UniformRandom::from_config(&config)),
            selection: Box::new(UCB1),
            config,
            root_stats: RootStats::default(),
            stats: SearchStats::default(),
            deadline: None,
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<P: SelectionPolicy + 'static>(mut self, selection: P) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom playout policy.
    pub fn with_playout<P: PlayoutPolicy + 'static>(mut self, playout: P) -> Self {
        self.playout = Box::new(playout);
        self
    }

    /// Choose which of the two cards in hand to play.
    ///
    /// `view` is the seat's snapshot from before it drew `drawn`, as handed
    /// to an [`Agent`](crate::agents::Agent). Returns `drawn` or the viewer's
    /// held card. A forced play is returned without searching.
    pub fn decide(&mut self, view: &PlayerView, drawn: Card) -> Result<Card> {
        let start = Instant::now();
        self.reset();

        let me = view.viewer();
        let held = view
            .card(me)
            .ok_or_else(|| Error::MalformedDeterminization(format!("{} holds no card", me)))?;

        if let Some(card) = forced_play(drawn, held) {
            debug!(player = %me, %drawn, %held, %card, "forced play");
            return Ok(card);
        }

        self.deadline = self.config.time_budget().map(|budget| start + budget);
        let iterations = self.config.iterations_per_determinization;
        for _ in 0..self.config.determinizations {
            if self.out_of_time() {
                debug!(determinizations = self.stats.determinizations, "time budget exhausted");
                break;
            }
            let round = determinize(view, drawn, &mut self.rng)?;
            self.run(round, me, iterations);
            self.stats.determinizations += 1;
        }
        self.deadline = None;
        self.stats.time_us = start.elapsed().as_micros() as u64;

        let choice = if self.root_stats.prefers_drawn() { drawn } else { held };
        debug!(
            player = %me,
            %drawn,
            %held,
            drawn_ratio = self.root_stats.drawn.ratio(),
            held_ratio = self.root_stats.held.ratio(),
            visits = self.root_stats.total_visits(),
            %choice,
            "decision"
        );
        Ok(choice)
    }

    /// Search one hypothetical round for `iterations` passes.
    ///
    /// The root's two children start from the accumulated root statistics
    /// and write them back afterwards. Returns the tree for inspection.
    pub fn run<S: RoundEngine>(&mut self, state: S, me: PlayerId, iterations: u32) -> SearchTree<S> {
        let root_terminal = terminal_outcome(&state, me);
        let mut tree = SearchTree::with_capacity(state, 2 * iterations as usize + 3);
        let root = tree.root();

        match root_terminal {
            Some(outcome) => tree.get_mut(root).terminal = Some(outcome),
            None => {
                self.expand(&mut tree, root, me);
                self.seed_root(&mut tree);
            }
        }

        for _ in 0..iterations {
            if self.out_of_time() {
                break;
            }
            self.iteration(&mut tree, me);
            self.stats.iterations += 1;
        }

        self.harvest_root(&tree);
        tree
    }

    /// Single MCTS iteration: select, expand, roll out, backpropagate.
    fn iteration<S: RoundEngine>(&mut self, tree: &mut SearchTree<S>, me: PlayerId) {
        // === SELECTION ===
        let mut current = tree.root();
        while let Some(children) = tree.get(current).children {
            let parent_visits = tree.get(current).visits;
            let arms = [tree.get(children[0]).arm(), tree.get(children[1]).arm()];
            match self.selection.select(parent_visits, &arms, &self.config) {
                Some(i) => current = children[i],
                None => break,
            }
        }

        // === EXPANSION ===
        if tree.get(current).is_expandable() {
            self.expand(tree, current, me);
            if let Some(children) = tree.get(current).children {
                current = children[0];
            }
        }

        // === ROLLOUT ===
        let outcome = match tree.get(current).terminal {
            Some(outcome) => outcome,
            None => match &tree.get(current).state {
                Some(state) => self.rollout(state, me),
                None => Outcome::Loss,
            },
        };

        // === BACKPROPAGATION ===
        trace!(node = %current, depth = tree.get(current).depth, ?outcome, "iteration");
        tree.backpropagate(current, outcome);
    }

    /// Draw for the seat on move and hang the two resulting plays.
    ///
    /// A forced play gets a pruned sibling. If the draw itself fails the node
    /// becomes a terminal loss instead.
    fn expand<S: RoundEngine>(&mut self, tree: &mut SearchTree<S>, node: NodeId, me: PlayerId) {
        let depth = tree.get(node).depth + 1;
        let Some(mut next) = tree.get(node).state.clone() else {
            tree.get_mut(node).terminal = Some(Outcome::Loss);
            return;
        };
        let actor = next.next_player();

        let drawn = match next.draw_card() {
            Ok(card) => card,
            Err(err) => {
                warn!(%err, %node, "expansion failed to draw");
                tree.get_mut(node).terminal = Some(Outcome::Loss);
                return;
            }
        };
        let Some(held) = next.card(actor) else {
            warn!(player = %actor, %node, "seat on move has no hand");
            tree.get_mut(node).terminal = Some(Outcome::Loss);
            return;
        };

        let draw = Draw { actor, card: drawn };
        let (first, second) = match forced_play(drawn, held) {
            Some(card) => {
                trace!(player = %actor, %card, depth, "forced expansion");
                let first = self.child(node, depth, next, draw, card, me);
                (first, SearchNode::pruned(node, depth))
            }
            None => {
                let first = self.child(node, depth, next.clone(), draw, drawn, me);
                let second = self.child(node, depth, next, draw, held, me);
                (first, second)
            }
        };

        tree.attach(node, first, second);
        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
    }

    /// Build the child reached by playing `card`. A rules error while playing
    /// makes the child a terminal loss.
    fn child<S: RoundEngine>(
        &mut self,
        parent: NodeId,
        depth: u16,
        mut state: S,
        draw: Draw,
        card: Card,
        me: PlayerId,
    ) -> SearchNode<S> {
        let terminal = match self.play_specific(&mut state, draw, card) {
            Ok(()) => terminal_outcome(&state, me),
            Err(err) => {
                warn!(%err, player = %draw.actor, %card, "expansion play failed");
                Some(Outcome::Loss)
            }
        };
        let mut node = SearchNode::new(parent, depth, Some(card), state);
        node.terminal = terminal;
        node
    }

    fn play_specific<S: RoundEngine>(&mut self, state: &mut S, draw: Draw, card: Card) -> Result<()> {
        let action = {
            let observed: &S = state;
            let legal = |a: &Action| observed.legal_action(a, draw.card);
            self.playout
                .choose_specific(draw.actor, observed.num_players(), card, &legal, &mut self.rng)?
        };
        state.update(&action, draw.card)
    }

    /// Play the round out with the playout policy for every seat.
    fn rollout<S: RoundEngine>(&mut self, state: &S, me: PlayerId) -> Outcome {
        self.stats.rollouts += 1;
        let mut state = state.clone();
        match self.play_out(&mut state, me) {
            Ok(()) => terminal_outcome(&state, me).unwrap_or(Outcome::Loss),
            Err(err) => {
                self.stats.failed_rollouts += 1;
                warn!(%err, "rollout aborted");
                Outcome::Loss
            }
        }
    }

    fn play_out<S: RoundEngine>(&mut self, state: &mut S, me: PlayerId) -> Result<()> {
        while !state.round_over() && !state.eliminated(me) {
            let actor = state.next_player();
            let drawn = state.draw_card()?;
            let held = state
                .card(actor)
                .ok_or_else(|| Error::IllegalAction(format!("{} has no hand", actor)))?;

            let action = {
                let observed: &S = state;
                let legal = |a: &Action| observed.legal_action(a, drawn);
                self.playout
                    .choose(actor, observed.num_players(), drawn, held, &legal, &mut self.rng)?
            };
            state.update(&action, drawn)?;
        }
        Ok(())
    }

    /// Load the persistent drawn/held counts into a fresh root.
    fn seed_root<S>(&mut self, tree: &mut SearchTree<S>) {
        let root = tree.root();
        let Some([drawn, held]) = tree.get(root).children else {
            return;
        };
        if tree.get(held).pruned {
            return;
        }

        for (id, tally) in [(drawn, self.root_stats.drawn), (held, self.root_stats.held)] {
            let node = tree.get_mut(id);
            node.visits = tally.visits;
            node.score = tally.score;
        }
        let node = tree.get_mut(root);
        node.visits = self.root_stats.total_visits();
        node.score = self.root_stats.drawn.score + self.root_stats.held.score;
    }

    /// Copy the root children's counts back into the persistent statistics.
    fn harvest_root<S>(&mut self, tree: &SearchTree<S>) {
        let Some([drawn, held]) = tree.root_node().children else {
            return;
        };
        if tree.get(held).pruned {
            return;
        }

        let tally = |id: NodeId| BranchTally {
            visits: tree.get(id).visits,
            score: tree.get(id).score,
        };
        self.root_stats = RootStats {
            drawn: tally(drawn),
            held: tally(held),
        };
    }

    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Forget the root statistics and counters of the previous decision.
    pub fn reset(&mut self) {
        self.root_stats = RootStats::default();
        self.stats.reset();
        self.deadline = None;
    }

    /// Get the search configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Get statistics from the last decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Root branch counts from the last decision.
    #[must_use]
    pub fn root_stats(&self) -> &RootStats {
        &self.root_stats
    }
}
