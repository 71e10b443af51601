//! Policies for the phases of the MCTS algorithm
//!
//! This module contains one policy per phase:
//! - Selection: UCT descent from the root to a leaf
//! - Expansion: one child per legal move
//! - Simulation: uniformly random play-out
//! - Backpropagation: visit and reward updates up to the root

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::StandardPolicy;
pub use expansion::FullExpansionPolicy;
pub use selection::UctPolicy;
pub use simulation::RandomPolicy;
