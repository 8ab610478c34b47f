//! Parallel simulation execution using rayon.
//!
//! Each run gets its own world, clock, and random stream; runs share nothing
//! mutable, so a sweep is embarrassingly parallel.

use bevy_ecs::prelude::World;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sim_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use sim_core::scenario::build_scenario;

use crate::metrics::{extract_metrics, RunMetrics};
use crate::parameters::ParameterSet;

/// Backstop against runaway scenarios inside a sweep.
const MAX_EVENTS_PER_RUN: usize = 10_000_000;

/// Run a single simulation with the given parameter set.
///
/// Creates a new world, builds the scenario, runs the simulation to
/// completion, and extracts metrics from the results.
///
/// # Panics
///
/// Panics if the parameter set fails scenario validation; spaces are
/// expected to be built from valid bases.
pub fn run_single_simulation(param_set: &ParameterSet) -> RunMetrics {
    let mut world = World::new();
    build_scenario(&mut world, param_set.scenario_params())
        .expect("parameter sets should produce valid scenarios");
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    let _steps = run_until_empty(&mut world, &mut schedule, MAX_EVENTS_PER_RUN);

    extract_metrics(&world)
}

/// Run multiple simulations in parallel.
///
/// Uses rayon to execute simulations concurrently across available CPU
/// cores. Results come back in the same order as the input parameter sets.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Vec<RunMetrics> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// Run multiple simulations in parallel with an optional progress bar.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Vec<RunMetrics> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let pool = if let Some(threads) = num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("Failed to create thread pool")
    } else {
        rayon::ThreadPoolBuilder::new()
            .build()
            .expect("Failed to create thread pool")
    };

    let pb_clone = pb.clone();
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_simulation(param_set);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}
