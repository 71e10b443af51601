//! The step driver
//!
//! [`MCTS`] runs the search as an explicit state machine. Each call to
//! [`MCTS::step`] performs exactly one phase of one iteration, then returns a
//! [`StepResult`] holding a frozen copy of the tree. Nothing happens between
//! calls, so the caller decides the pace and may stop at any point.

use std::fmt;
use std::time::Instant;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::MCTSConfig,
    game_state::{Board, GameRules},
    policy::{FullExpansionPolicy, RandomPolicy, StandardPolicy, UctPolicy},
    presentation::{Annotations, NodeFlags},
    snapshot::TreeSnapshot,
    stats::SearchStatistics,
    tictactoe::TicTacToe,
    tree::{NodeId, NodePath, SearchTree},
    MCTSError, Result,
};

/// The phase a step reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The untouched root, before the first iteration
    Start,
    /// A leaf has been selected
    Selection,
    /// The selected leaf received its children
    Expansion,
    /// A rollout finished; its end position hangs below the rollout start
    Simulation,
    /// Statistics were updated up to the root
    Backpropagation,
    /// All iterations are complete
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "Start",
            Phase::Selection => "Selection",
            Phase::Expansion => "Expansion",
            Phase::Simulation => "Simulation",
            Phase::Backpropagation => "Backpropagation",
            Phase::Done => "Done",
        };
        f.write_str(name)
    }
}

/// One record of the step sequence
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Phase that just completed
    pub phase: Phase,
    /// 1-based iteration the phase belongs to, 0 for `Start`
    pub iteration: usize,
    /// Copy of the tree at the end of the phase
    pub tree: TreeSnapshot,
}

impl StepResult {
    /// Returns a copy with the expanded flag of the node at `path` flipped
    ///
    /// Only the returned record changes; neither this record nor the running
    /// search are touched.
    pub fn toggle_expanded(&self, path: &NodePath) -> Result<StepResult> {
        Ok(StepResult {
            phase: self.phase,
            iteration: self.iteration,
            tree: self.tree.toggle_expanded(path)?,
        })
    }
}

/// Where the state machine resumes on the next call to `step`
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Start,
    Select {
        iteration: usize,
    },
    Expand {
        iteration: usize,
        leaf: NodeId,
    },
    Simulate {
        iteration: usize,
        leaf: NodeId,
        from: NodeId,
    },
    Backpropagate {
        iteration: usize,
        from: NodeId,
        rollout: Board,
    },
    Finish,
    Exhausted,
}

/// Step-by-step Monte Carlo Tree Search
///
/// The search owns the only live tree. It is advanced one phase at a time
/// with [`MCTS::step`], or through the [`Iterator`] implementation. The
/// sequence is finite and cannot be restarted: after `Done`, or after an
/// error, no further steps are produced.
///
/// # Example
///
/// ```
/// use stepwise_mcts::{MCTSConfig, Phase, MCTS};
///
/// let config = MCTSConfig::default().with_iterations(3).with_seed(1);
/// let steps: Vec<_> = MCTS::new(config)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// let last: &stepwise_mcts::StepResult = steps.last().unwrap();
/// assert_eq!(last.phase, Phase::Done);
/// assert_eq!(last.iteration, 3);
/// assert_eq!(last.tree.root().visits, 3);
/// ```
pub struct MCTS<R: GameRules = TicTacToe> {
    tree: SearchTree,
    annotations: Annotations,
    rules: R,
    config: MCTSConfig,
    statistics: SearchStatistics,
    selection_policy: UctPolicy,
    expansion_policy: FullExpansionPolicy,
    simulation_policy: RandomPolicy,
    backpropagation_policy: StandardPolicy,
    rng: StdRng,
    stage: Stage,
    done: Option<StepResult>,
}

impl MCTS<TicTacToe> {
    /// Creates a tic-tac-toe search from the given configuration
    pub fn new(config: MCTSConfig) -> Result<Self> {
        Self::with_rules(TicTacToe::new(), config)
    }
}

impl<R: GameRules> MCTS<R> {
    /// Creates a search using the given rules
    pub fn with_rules(rules: R, config: MCTSConfig) -> Result<Self> {
        config.validate()?;

        let start = config.start_state;
        let tree = SearchTree::new(start, rules.current_player(&start));
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(MCTS {
            tree,
            annotations: Annotations::new(),
            rules,
            selection_policy: UctPolicy::new(config.exploration_constant),
            expansion_policy: FullExpansionPolicy::new(),
            simulation_policy: RandomPolicy::new(),
            backpropagation_policy: StandardPolicy::new(),
            config,
            statistics: SearchStatistics::new(),
            rng,
            stage: Stage::Start,
            done: None,
        })
    }

    /// Returns the configuration of this search
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the search statistics
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the live tree
    ///
    /// Between steps the live tree never contains a rollout end node.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns true once no further steps will be produced
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Exhausted
    }

    /// Runs the next phase and returns its record
    ///
    /// Returns `Ok(None)` once the sequence is over. An error aborts the
    /// search; every later call returns `Ok(None)`.
    pub fn step(&mut self) -> Result<Option<StepResult>> {
        let started = Instant::now();
        let stage = std::mem::replace(&mut self.stage, Stage::Exhausted);

        let result = match stage {
            Stage::Start => Ok(self.start()),
            Stage::Select { iteration } => self.select(iteration),
            Stage::Expand { iteration, leaf } => self.expand(iteration, leaf),
            Stage::Simulate {
                iteration,
                leaf,
                from,
            } => self.simulate(iteration, leaf, from),
            Stage::Backpropagate {
                iteration,
                from,
                rollout,
            } => Ok(self.backpropagate(iteration, from, rollout)),
            Stage::Finish => Ok(self.finish()),
            Stage::Exhausted => return Ok(None),
        };

        self.statistics.total_time += started.elapsed();
        let step = result?;
        self.statistics.steps += 1;
        Ok(Some(step))
    }

    /// Drains the remaining steps and returns the final `Done` record
    pub fn run(&mut self) -> Result<StepResult> {
        while self.step()?.is_some() {}

        self.done.clone().ok_or_else(|| {
            MCTSError::SearchStopped("the search was aborted before completion".to_string())
        })
    }

    fn start(&mut self) -> StepResult {
        debug!(
            "Starting search from {} for {} iterations",
            self.tree.get(self.tree.root()).state,
            self.config.iterations
        );

        self.stage = self.next_iteration(0);
        self.record(Phase::Start, 0)
    }

    fn select(&mut self, iteration: usize) -> Result<StepResult> {
        self.annotations.reset(self.tree.len());

        let path = self.selection_policy.select(&self.tree)?;
        for (depth, &id) in path.iter().enumerate() {
            let flags = self.annotations.get_mut(id);
            flags.node_selected = true;
            flags.expanded = true;
            if depth > 0 {
                flags.edge_selected = true;
                flags.highlight_uct_only = true;
            }
        }

        let leaf = *path.last().unwrap_or(&NodeId::ROOT);
        let depth = path.len() - 1;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);
        debug!(
            "Iteration {}: selected {} at depth {}",
            iteration,
            self.tree.get(leaf).state,
            depth
        );

        self.stage = Stage::Expand { iteration, leaf };
        Ok(self.record(Phase::Selection, iteration))
    }

    fn expand(&mut self, iteration: usize, leaf: NodeId) -> Result<StepResult> {
        if self.rules.is_terminal(&self.tree.get(leaf).state) {
            debug!("Iteration {}: terminal leaf, skipping expansion", iteration);
            self.statistics.terminal_selections += 1;
            return self.simulate(iteration, leaf, leaf);
        }

        let children = self
            .expansion_policy
            .expand(&mut self.tree, &self.rules, leaf)?;

        self.annotations.clear_highlights();
        self.annotations.get_mut(leaf).node_selected = true;
        for &child in &children {
            let flags = self.annotations.get_mut(child);
            flags.node_selected = true;
            flags.edge_selected = true;
            flags.highlight_uct_only = false;
        }

        let from = self
            .expansion_policy
            .choose(&children, &mut self.rng)
            .ok_or_else(|| MCTSError::NoLegalMoves {
                state: self.tree.get(leaf).state.to_string(),
            })?;

        self.statistics.tree_size = self.tree.len();
        self.statistics.max_depth = self.statistics.max_depth.max(self.tree.depth(from));
        debug!(
            "Iteration {}: expanded {} children, continuing from {}",
            iteration,
            children.len(),
            self.tree.get(from).state
        );

        self.stage = Stage::Simulate {
            iteration,
            leaf,
            from,
        };
        Ok(self.record(Phase::Expansion, iteration))
    }

    fn simulate(&mut self, iteration: usize, leaf: NodeId, from: NodeId) -> Result<StepResult> {
        let rollout =
            self.simulation_policy
                .simulate(&self.rules, &self.tree.get(from).state, &mut self.rng)?;

        let ephemeral = self
            .tree
            .add_child(from, rollout, self.rules.current_player(&rollout));
        *self.annotations.get_mut(ephemeral) = NodeFlags {
            simulation_node: true,
            ..NodeFlags::default()
        };

        self.annotations.clear_selection();
        {
            let flags = self.annotations.get_mut(from);
            flags.node_selected = true;
            flags.edge_selected = true;
        }
        self.annotations.get_mut(leaf).node_selected = true;

        let step = self.record(Phase::Simulation, iteration);

        let removed = self.tree.remove_last_child(from, ephemeral);
        debug_assert!(removed.is_some(), "rollout node must be the newest node");
        self.annotations.truncate(self.tree.len());

        debug!("Iteration {}: rollout ended at {}", iteration, rollout);

        self.stage = Stage::Backpropagate {
            iteration,
            from,
            rollout,
        };
        Ok(step)
    }

    fn backpropagate(&mut self, iteration: usize, from: NodeId, rollout: Board) -> StepResult {
        self.annotations.clear_selection();

        let outcome = self.rules.outcome(&rollout);
        let path =
            self.backpropagation_policy
                .backpropagate(&mut self.tree, &self.rules, from, &outcome);
        for id in path {
            let flags = self.annotations.get_mut(id);
            flags.node_selected = true;
            flags.edge_selected = true;
            flags.highlight_visits_value_uct = true;
        }

        self.statistics.iterations = iteration;
        debug!(
            "Iteration {}: backpropagated X {:+} / O {:+}",
            iteration, outcome.x, outcome.o
        );

        self.stage = self.next_iteration(iteration);
        self.record(Phase::Backpropagation, iteration)
    }

    fn finish(&mut self) -> StepResult {
        self.annotations.reset(self.tree.len());

        let step = self.record(Phase::Done, self.config.iterations);
        info!("Search complete\n{}", self.statistics.summary());

        self.done = Some(step.clone());
        step
    }

    fn next_iteration(&self, completed: usize) -> Stage {
        if completed < self.config.iterations {
            Stage::Select {
                iteration: completed + 1,
            }
        } else {
            Stage::Finish
        }
    }

    fn record(&self, phase: Phase, iteration: usize) -> StepResult {
        StepResult {
            phase,
            iteration,
            tree: TreeSnapshot::capture(
                &self.tree,
                &self.annotations,
                self.config.exploration_constant,
            ),
        }
    }
}

impl<R: GameRules> Iterator for MCTS<R> {
    type Item = Result<StepResult>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

impl<R: GameRules> fmt::Debug for MCTS<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MCTS")
            .field("config", &self.config)
            .field("tree_size", &self.tree.len())
            .field("stage", &self.stage)
            .finish()
    }
}
