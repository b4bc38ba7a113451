//! Full matches between the bundled agents.

use loveletter_mcts::agents::{Agent, HeuristicAgent, RandomAgent};
use loveletter_mcts::core::{Card, PlayerId};
use loveletter_mcts::mcts::{MCTSAgent, MCTSConfig};
use loveletter_mcts::play::{Match, MatchConfig, MatchResult};

fn quick_mcts(seed: u64) -> Box<dyn Agent> {
    let config = MCTSConfig::default()
        .with_determinizations(8)
        .with_iterations(8)
        .with_seed(seed);
    Box::new(MCTSAgent::new(config))
}

fn assert_consistent(result: &MatchResult, target: u32) {
    assert!(!result.winners.is_empty());
    for &winner in &result.winners {
        assert!(result.scores[winner.index()] >= target);
    }
    let awarded: usize = result.rounds.iter().map(|r| r.winners.len()).sum();
    assert_eq!(awarded as u32, result.scores.iter().sum::<u32>());

    for round in &result.rounds {
        assert_eq!(round.turns as usize, round.actions.len());
        assert!(round.actions.len() <= 15);
        for record in &round.actions {
            assert_ne!(record.action.card(), Card::Princess);
        }
    }
}

// =============================================================================
// Matches
// =============================================================================

#[test]
fn test_two_player_match() {
    let agents = vec![quick_mcts(1), Box::new(RandomAgent::new(2)) as Box<dyn Agent>];
    let config = MatchConfig::default().with_seed(3).with_tokens_to_win(2);
    let result = Match::new(agents, config).play().unwrap();

    assert_consistent(&result, 2);
    assert!(result.rounds.iter().all(|r| r.substitutions == 0));
}

#[test]
fn test_four_player_match() {
    let agents: Vec<Box<dyn Agent>> = vec![
        quick_mcts(4),
        Box::new(HeuristicAgent::new(5)),
        Box::new(RandomAgent::new(6)),
        Box::new(HeuristicAgent::new(7)),
    ];
    let config = MatchConfig::default().with_seed(8).with_tokens_to_win(1);
    let result = Match::new(agents, config).play().unwrap();

    assert_consistent(&result, 1);
    assert_eq!(result.scores.len(), 4);
}

#[test]
fn test_default_targets_by_table_size() {
    let config = MatchConfig::default();
    assert_eq!(config.target(2), 7);
    assert_eq!(config.target(3), 5);
    assert_eq!(config.target(4), 4);
}

#[test]
fn test_round_winner_starts_next_round() {
    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(RandomAgent::new(1)),
        Box::new(RandomAgent::new(2)),
        Box::new(RandomAgent::new(3)),
    ];
    let config = MatchConfig::default().with_seed(9).with_tokens_to_win(3);
    let result = Match::new(agents, config).play().unwrap();

    assert_consistent(&result, 3);
    for pair in result.rounds.windows(2) {
        let starter = pair[1].actions[0].action.player();
        assert_eq!(Some(&starter), pair[0].winners.first());
    }
}

#[test]
fn test_same_seed_same_match() {
    let play = || {
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(HeuristicAgent::new(1)),
            Box::new(RandomAgent::new(2)),
        ];
        Match::new(agents, MatchConfig::default().with_seed(77).with_tokens_to_win(2))
            .play()
            .unwrap()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_first_player_is_respected() {
    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(RandomAgent::new(1)),
        Box::new(RandomAgent::new(2)),
    ];
    let config = MatchConfig::default()
        .with_seed(4)
        .with_first_player(PlayerId::new(1));
    let record = Match::new(agents, config).play_round().unwrap();

    assert_eq!(record.actions[0].action.player(), PlayerId::new(1));
}
