//! Determinized Monte Carlo Tree Search for Love Letter.
//!
//! ## Overview
//!
//! The seat on move knows two cards (the one in hand and the one just drawn)
//! and must discard one. The search answers that single binary question:
//!
//! - **Determinization**: sample a full round consistent with everything the
//!   seat has seen (discards, revealed hands, pile size)
//! - **Binary tree**: every node has zero or two children, one per card the
//!   seat on move could play; forced plays get a pruned sibling
//! - **Playouts**: every seat, including ours, plays uniformly at random
//!   among legal actions
//! - **Persistent root**: the drawn/held branch counts accumulate over all
//!   determinizations; each tree is thrown away afterwards
//!
//! ## Usage
//!
//! ```rust
//! use loveletter_mcts::core::{GameRng, PlayerId};
//! use loveletter_mcts::games::loveletter::RoundBuilder;
//! use loveletter_mcts::mcts::{MCTSConfig, MCTSSearch};
//! use loveletter_mcts::rules::{RoundEngine, RoundState};
//!
//! let mut rng = GameRng::new(7);
//! let mut round = RoundBuilder::new().player_count(4).deal(&mut rng);
//! let me = round.next_player();
//!
//! // The view a seat holds when its turn comes, taken before it draws.
//! let view = round.view(me);
//! let drawn = round.draw_card().unwrap();
//!
//! let config = MCTSConfig::default().with_determinizations(10).with_iterations(10);
//! let mut search = MCTSSearch::new(config);
//! let card = search.decide(&view, drawn).unwrap();
//! assert!(card == drawn || Some(card) == round.card(me));
//! ```

pub mod agent;
pub mod config;
pub mod determinize;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use agent::MCTSAgent;
pub use config::MCTSConfig;
pub use determinize::determinize;
pub use node::{Arm, NodeId, Outcome, SearchNode};
pub use policy::{Legality, PlayoutPolicy, SelectionPolicy, UniformRandom, UCB1};
pub use search::{terminal_outcome, MCTSSearch};
pub use stats::{BranchTally, RootStats, SearchStats};
pub use tree::{SearchTree, TreeStats};
