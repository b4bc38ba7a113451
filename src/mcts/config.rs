//! Search parameters: sampling budget, exploration and reproducibility.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Parameters for one [`MCTSSearch`](super::MCTSSearch).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Hypothetical deals sampled per decision (outer loop).
    pub determinizations: u32,

    /// Select/expand/rollout/backpropagate passes per deal (inner loop).
    pub iterations_per_determinization: u32,

    /// UCB1 exploration constant (default: 40.0).
    /// Rewards are 0/1, so large values make selection close to round-robin.
    pub exploration_constant: f64,

    /// Random seed for determinization and playouts.
    /// Equal seeds give equal decisions for equal views.
    pub seed: u64,

    /// Proposals the playout policy may make before giving up on a turn.
    pub max_policy_attempts: u32,

    /// Optional wall-clock budget per decision, in milliseconds.
    /// Checked only between complete iterations.
    pub time_budget_ms: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            determinizations: 100,
            iterations_per_determinization: 20,
            exploration_constant: 40.0,
            seed: 42,
            max_policy_attempts: 1_000,
            time_budget_ms: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with a custom number of determinizations.
    pub fn with_determinizations(mut self, n: u32) -> Self {
        self.determinizations = n;
        self
    }

    /// Create a new config with custom inner iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations_per_determinization = n;
        self
    }

    /// Set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom playout attempt cap.
    pub fn with_policy_attempts(mut self, attempts: u32) -> Self {
        self.max_policy_attempts = attempts.max(1);
        self
    }

    /// Create a new config with a wall-clock budget per decision.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis() as u64);
        self
    }

    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MCTSConfig::default();
        assert_eq!(config.determinizations, 100);
        assert_eq!(config.iterations_per_determinization, 20);
        assert!((config.exploration_constant - 40.0).abs() < f64::EPSILON);
        assert_eq!(config.seed, 42);
        assert_eq!(config.time_budget(), None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MCTSConfig::default()
            .with_determinizations(10)
            .with_iterations(5)
            .with_exploration(2.0)
            .with_seed(123)
            .with_time_budget(Duration::from_millis(250));

        assert_eq!(config.determinizations, 10);
        assert_eq!(config.iterations_per_determinization, 5);
        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.time_budget(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_attempt_cap_is_positive() {
        let config = MCTSConfig::default().with_policy_attempts(0);
        assert_eq!(config.max_policy_attempts, 1);
    }

    #[test]
    fn test_serialization() {
        let config = MCTSConfig::default().with_time_budget(Duration::from_secs(1));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
