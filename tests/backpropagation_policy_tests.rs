use stepwise_mcts::{
    policy::backpropagation::StandardPolicy, Board, GameRules, NodeId, Player, SearchTree,
    TicTacToe,
};

fn board(text: &str) -> Board {
    text.parse().unwrap()
}

// Chain root (X to move) -> a (O to move) -> b (X to move)
fn create_chain() -> (SearchTree, NodeId, NodeId) {
    let rules = TicTacToe::new();
    let root = board("---------");
    let mut tree = SearchTree::new(root, rules.current_player(&root));
    let a = tree.add_child(tree.root(), board("----X----"), Player::O);
    let b = tree.add_child(a, board("O---X----"), Player::X);
    (tree, a, b)
}

#[test]
fn test_standard_policy_updates_path_to_root() {
    let rules = TicTacToe::new();
    let (mut tree, a, b) = create_chain();

    // O wins
    let outcome = rules.outcome(&board("OXXOX-O--"));
    assert_eq!(outcome.reward(Player::O), 1.0);
    assert_eq!(outcome.reward(Player::X), -1.0);

    let path = StandardPolicy::new().backpropagate(&mut tree, &rules, b, &outcome);
    assert_eq!(path, vec![b, a, tree.root()]);

    // b was chosen by O, a by X
    assert_eq!(tree.get(b).value, 1.0);
    assert_eq!(tree.get(a).value, -1.0);
    assert_eq!(tree.get(tree.root()).value, 0.0);
    assert!(path.iter().all(|&id| tree.get(id).visits == 1));
}

#[test]
fn test_draws_only_count_visits() {
    let rules = TicTacToe::new();
    let (mut tree, a, b) = create_chain();
    let draw = rules.outcome(&board("XOXXOXOXO"));

    let policy = StandardPolicy::new();
    for _ in 0..3 {
        policy.backpropagate(&mut tree, &rules, b, &draw);
    }
    policy.backpropagate(&mut tree, &rules, a, &draw);

    assert_eq!(tree.get(b).visits, 3);
    assert_eq!(tree.get(a).visits, 4);
    assert_eq!(tree.get(tree.root()).visits, 4);
    assert_eq!(tree.get(a).value, 0.0);
    assert_eq!(tree.get(b).value, 0.0);
}

#[test]
fn test_backpropagate_from_root() {
    let rules = TicTacToe::new();
    let (mut tree, a, _) = create_chain();
    let outcome = rules.outcome(&board("XXX------"));

    let path = StandardPolicy::new().backpropagate(&mut tree, &rules, NodeId::ROOT, &outcome);
    assert_eq!(path, vec![tree.root()]);
    assert_eq!(tree.get(tree.root()).visits, 1);
    assert_eq!(tree.get(a).visits, 0);
}
