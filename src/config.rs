//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of a search run.

use log::warn;

use crate::{game_state::Board, MCTSError, Result};

/// Iteration count used when none is given
pub const DEFAULT_ITERATIONS: usize = 1500;

/// Criteria for recommending a move once the search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the most visits
    ///
    /// This is generally more robust, as it relies on statistical confidence
    /// rather than potentially noisy value estimates.
    MostVisits,

    /// Select the child with the highest mean value
    HighestValue,
}

/// Configuration for a search run
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use stepwise_mcts::{config::BestChildCriteria, MCTSConfig};
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.0)
///     .with_iterations(500)
///     .with_start_state("XX-OO----".parse().unwrap())
///     .with_seed(42)
///     .with_best_child_criteria(BestChildCriteria::HighestValue);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MCTSConfig {
    /// Board the search starts from
    pub start_state: Board,

    /// Number of iterations to run
    pub iterations: usize,

    /// Exploration constant for UCT
    ///
    /// Higher values favor exploration of less-visited nodes.
    /// The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// Seed for the random draws; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Criteria for the recommended move
    pub best_child_criteria: BestChildCriteria,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            start_state: Board::empty(),
            iterations: DEFAULT_ITERATIONS,
            exploration_constant: std::f64::consts::SQRT_2,
            seed: None,
            best_child_criteria: BestChildCriteria::MostVisits,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the starting board
    pub fn with_start_state(mut self, state: Board) -> Self {
        self.start_state = state;
        self
    }

    /// Makes the random draws reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the criteria for the recommended move
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Checks that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }

    /// Builds a configuration from query-style `key=value` parameters
    ///
    /// Recognised keys are `iterations`, `startState`, `explorationConstant`
    /// and `seed`; others are ignored. A missing, unparsable or zero
    /// iteration count falls back to the default. Malformed boards, constants
    /// and seeds are errors.
    ///
    /// ```
    /// use stepwise_mcts::MCTSConfig;
    ///
    /// let config = MCTSConfig::from_params([("iterations", "40"), ("startState", "X--------")])
    ///     .unwrap();
    /// assert_eq!(config.iterations, 40);
    /// assert_eq!(config.start_state.to_string(), "X--------");
    /// ```
    pub fn from_params<'a, I>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = MCTSConfig::default();

        for (key, value) in params {
            match key {
                "iterations" => match value.trim().parse::<usize>() {
                    Ok(iterations) if iterations > 0 => config.iterations = iterations,
                    _ => warn!(
                        "Ignoring iterations={:?}, using {}",
                        value, DEFAULT_ITERATIONS
                    ),
                },
                "startState" => config.start_state = value.parse()?,
                "explorationConstant" => {
                    config.exploration_constant = value.trim().parse().map_err(|_| {
                        MCTSError::InvalidConfiguration(format!(
                            "explorationConstant is not a number: {:?}",
                            value
                        ))
                    })?
                }
                "seed" => {
                    config.seed = Some(value.trim().parse().map_err(|_| {
                        MCTSError::InvalidConfiguration(format!(
                            "seed is not an unsigned integer: {:?}",
                            value
                        ))
                    })?)
                }
                _ => {}
            }
        }

        config.validate()?;
        Ok(config)
    }
}
