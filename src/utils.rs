//! UCT arithmetic
//!
//! Shared by the live selection policy and by snapshot annotation so both
//! always agree on the numbers.

/// Calculates the exploitation term: the mean reward of a node
///
/// Returns 0.0 if no visits have occurred.
pub fn mean_value(value: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    value / visits as f64
}

/// Calculates the exploration term for UCT
pub fn exploration_term(parent_visits: u64, visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / visits as f64).sqrt()
}

/// Calculates the UCT score of a non-root node
///
/// ```text
/// UCT = value / visits + c * sqrt(ln(parent_visits) / visits)
/// ```
///
/// Unvisited nodes score positive infinity so that every child is tried once
/// before exploitation kicks in.
pub fn uct_score(value: f64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    mean_value(value, visits) + exploration_term(parent_visits, visits, exploration_constant)
}
