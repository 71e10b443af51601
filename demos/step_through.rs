//! Step-through example for the MCTS algorithm
//!
//! Runs a search and reports every phase boundary, the way a viewer would
//! consume the step sequence.
//!
//! ```bash
//! cargo run --example step_through -- iterations=200 startState=XX-OO---- seed=7
//! ```

use std::env;

use stepwise_mcts::{MCTSConfig, Phase, StepResult, MCTS};

fn main() {
    // Initialize logging
    env_logger::init();

    println!("Stepwise MCTS");
    println!("=============");
    println!();

    let args: Vec<String> = env::args().skip(1).collect();
    let params = args.iter().filter_map(|arg| arg.split_once('='));

    let config = match MCTSConfig::from_params(params) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Start state: {}", config.start_state);
    println!("Iterations: {}", config.iterations);
    println!("Exploration constant: {:.3}", config.exploration_constant);
    println!();

    let mut mcts = match MCTS::new(config.clone()) {
        Ok(mcts) => mcts,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report_every = (config.iterations / 10).max(1);
    let mut steps: Vec<StepResult> = Vec::new();

    for step in &mut mcts {
        match step {
            Ok(step) => {
                if step.phase == Phase::Backpropagation && step.iteration % report_every == 0 {
                    let progress = step.iteration * 100 / config.iterations.max(1);
                    println!(
                        "{:>3}% | iteration {} / {} | {} nodes",
                        progress,
                        step.iteration,
                        config.iterations,
                        step.tree.len()
                    );
                }
                steps.push(step);
            }
            Err(e) => {
                eprintln!("Search aborted: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!();
    println!("Recorded {} steps", steps.len());
    println!("{}", mcts.statistics().summary());
    println!();

    let Some(done) = steps.last() else {
        return;
    };

    println!("{}", done.tree.visualize());

    match done.tree.best_child(config.best_child_criteria) {
        Some(best) => {
            if let Some(node) = done.tree.node(best) {
                println!(
                    "Recommended move: {} at {} (visits: {}, mean: {:.3})",
                    node.state,
                    done.tree.path_to(best),
                    node.visits,
                    node.mean_value
                );
            }
        }
        None => println!("The game is already over."),
    }
}
