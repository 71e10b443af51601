use stepwise_mcts::{
    policy::selection::UctPolicy, utils, Board, MCTSConfig, NodeId, Phase, Player, SearchTree,
    MCTS,
};

// Root with three children:
// - child 0: 10 visits, value 6
// - child 1: 5 visits, value -1
// - child 2: never visited
fn create_test_tree() -> SearchTree {
    let mut tree = SearchTree::new(Board::empty(), Player::X);
    tree.get_mut(tree.root()).visits = 15;

    for (visits, value) in [(10, 6.0), (5, -1.0), (0, 0.0)] {
        let child = tree.add_child(tree.root(), Board::empty(), Player::O);
        tree.get_mut(child).visits = visits;
        tree.get_mut(child).value = value;
    }
    tree
}

#[test]
fn test_uct_values() {
    let tree = create_test_tree();
    let c = std::f64::consts::SQRT_2;
    let policy = UctPolicy::new(c);

    assert_eq!(policy.uct_value(&tree, tree.root()), 0.0);

    let expected = 0.6 + c * ((15f64).ln() / 10.0).sqrt();
    assert!((policy.uct_value(&tree, NodeId(1)) - expected).abs() < 1e-12);

    let expected = -0.2 + c * ((15f64).ln() / 5.0).sqrt();
    assert!((policy.uct_value(&tree, NodeId(2)) - expected).abs() < 1e-12);

    assert_eq!(policy.uct_value(&tree, NodeId(3)), f64::INFINITY);
}

#[test]
fn test_unvisited_child_selected_first() {
    let tree = create_test_tree();
    let best = UctPolicy::new(0.5).best_child(&tree, tree.root()).unwrap();
    assert_eq!(best, NodeId(3));
}

#[test]
fn test_exploration_constant_changes_choice() {
    let mut tree = create_test_tree();
    // Visit the third child so that only the formula decides
    tree.get_mut(NodeId(3)).visits = 1;
    tree.get_mut(NodeId(3)).value = -1.0;

    // Pure exploitation picks the best mean
    let greedy = UctPolicy::new(0.0).best_child(&tree, tree.root()).unwrap();
    assert_eq!(greedy, NodeId(1));

    // Heavy exploration picks the least visited child
    let curious = UctPolicy::new(10.0).best_child(&tree, tree.root()).unwrap();
    assert_eq!(curious, NodeId(3));
}

#[test]
fn test_snapshot_derived_values_round_trip() {
    let mut mcts = MCTS::new(MCTSConfig::default().with_iterations(50).with_seed(17)).unwrap();
    let done = mcts.run().unwrap();
    assert_eq!(done.phase, Phase::Done);

    let mut recomputed = done.tree.clone();
    recomputed.recompute_derived();
    assert_eq!(recomputed, done.tree);

    let c = done.tree.exploration_constant();
    for (id, node) in done.tree.iter() {
        assert_eq!(node.mean_value, utils::mean_value(node.value, node.visits));
        match node.parent {
            None => assert_eq!(node.uct_value, 0.0),
            Some(parent) => {
                let parent_visits = done.tree.node(parent).unwrap().visits;
                assert_eq!(
                    node.uct_value,
                    utils::uct_score(node.value, node.visits, parent_visits, c),
                    "node {}",
                    id
                );
            }
        }
    }

    // The live tree agrees with the snapshot
    let policy = UctPolicy::new(c);
    for (id, node) in mcts.tree().iter() {
        assert_eq!(policy.uct_value(mcts.tree(), id), done.tree.node(id).unwrap().uct_value);
        assert_eq!(node.visits, done.tree.node(id).unwrap().visits);
    }
}
