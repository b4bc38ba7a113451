//! Counters describing what a decision cost and what the root learned.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Hypothetical deals searched.
    pub determinizations: u32,

    /// Total inner iterations performed.
    pub iterations: u32,

    /// Nodes expanded (given two children).
    pub nodes_expanded: u32,

    /// Rollouts performed.
    pub rollouts: u32,

    /// Rollouts aborted by a rules error (scored as losses).
    pub failed_rollouts: u32,

    /// Deepest node created.
    pub max_depth: u16,

    /// Wall time of the decision, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    /// Zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter before the next decision.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Search throughput; zero before any time is recorded.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate average nodes expanded per iteration.
    #[must_use]
    pub fn avg_nodes_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / self.iterations as f64
        }
    }
}

/// Visit and win counts for one root branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTally {
    pub visits: u32,
    pub score: u32,
}

impl BranchTally {
    /// Win ratio; zero for an unvisited branch.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score as f64 / self.visits as f64
        }
    }
}

/// The two permanent root branches, accumulated across determinizations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootStats {
    /// Branch that plays the card just drawn.
    pub drawn: BranchTally,

    /// Branch that plays the card already in hand.
    pub held: BranchTally,
}

impl RootStats {
    /// Does the drawn branch strictly beat the held branch?
    #[must_use]
    pub fn prefers_drawn(&self) -> bool {
        self.drawn.ratio() > self.held.ratio()
    }

    #[must_use]
    pub fn total_visits(&self) -> u32 {
        self.drawn.visits + self.held.visits
    }
}
