use stepwise_mcts::{config::BestChildCriteria, Board, MCTSConfig, MCTSError, MCTS};

#[test]
fn test_config_builder_methods() {
    let start: Board = "X---O----".parse().unwrap();
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_iterations(5000)
        .with_start_state(start)
        .with_seed(99)
        .with_best_child_criteria(BestChildCriteria::HighestValue);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.iterations, 5000);
    assert_eq!(config.start_state, start);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.best_child_criteria, BestChildCriteria::HighestValue);
}

#[test]
fn test_config_default_values() {
    let config = MCTSConfig::default();

    assert!((config.exploration_constant - 2f64.sqrt()).abs() < 1e-12);
    assert_eq!(config.iterations, 1500);
    assert_eq!(config.start_state, Board::empty());
    assert_eq!(config.seed, None);
    assert_eq!(config.best_child_criteria, BestChildCriteria::MostVisits);
}

#[test]
fn test_invalid_exploration_constant_is_rejected() {
    for constant in [-1.0, f64::NAN, f64::INFINITY] {
        let config = MCTSConfig::default().with_exploration_constant(constant);
        assert!(matches!(
            config.validate(),
            Err(MCTSError::InvalidConfiguration(_))
        ));
        assert!(MCTS::new(config).is_err());
    }
}

#[test]
fn test_from_params() {
    let config = MCTSConfig::from_params([
        ("iterations", "250"),
        ("startState", "XX-OO----"),
        ("explorationConstant", "0.5"),
        ("seed", "12"),
        ("unrelated", "whatever"),
    ])
    .unwrap();

    assert_eq!(config.iterations, 250);
    assert_eq!(config.start_state.to_string(), "XX-OO----");
    assert_eq!(config.exploration_constant, 0.5);
    assert_eq!(config.seed, Some(12));
}

#[test]
fn test_from_params_falls_back_on_bad_iterations() {
    for value in ["", "abc", "0", "-4"] {
        let config = MCTSConfig::from_params([("iterations", value)]).unwrap();
        assert_eq!(config.iterations, 1500, "iterations={:?}", value);
    }
}

#[test]
fn test_from_params_rejects_bad_values() {
    assert!(matches!(
        MCTSConfig::from_params([("startState", "XX")]),
        Err(MCTSError::InvalidBoard(_))
    ));
    assert!(matches!(
        MCTSConfig::from_params([("explorationConstant", "wide")]),
        Err(MCTSError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        MCTSConfig::from_params([("explorationConstant", "-2")]),
        Err(MCTSError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        MCTSConfig::from_params([("seed", "-1")]),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}
