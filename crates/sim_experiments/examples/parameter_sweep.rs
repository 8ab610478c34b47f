//! Sweep arrival rates and queue capacities over a two-server network and
//! export the results.
//!
//! ```sh
//! cargo run --example parameter_sweep
//! ```

use sim_core::scenario::ScenarioParams;
use sim_experiments::{
    export_to_csv, export_to_json, find_best_result_index, summarize, ParameterSpace,
    RankingWeights,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = ScenarioParams::uniform(2, 500.0, 2.0, 10, 1.5);
    let space = ParameterSpace::grid()
        .base(base)
        .experiment_id("capacity-sweep")
        .arrival_rates(vec![1.0, 2.0, 3.0, 4.0])
        .capacities(vec![0, 2, 5, 10])
        .replications(5);

    let sets = space.generate();
    println!("running {} simulations...", sets.len());
    let results = sim_experiments::run_parallel_experiments(sets.clone(), None);

    export_to_csv(&results, &sets, "sweep_results.csv")?;
    export_to_json(&results, "sweep_results.json")?;

    let waits: Vec<f64> = results.iter().map(|r| r.mean_wait_time).collect();
    let (avg, median, p90) = summarize(&waits);
    println!("mean wait across runs: avg {avg:.4} / median {median:.4} / p90 {p90:.4}");

    if let Some(best) = find_best_result_index(&results, &RankingWeights::default()) {
        let set = &sets[best];
        println!(
            "best configuration: arrival_rate {} capacity {} (drop ratio {:.4})",
            set.params.arrival_rate, set.params.servers[0].capacity, results[best].drop_ratio
        );
    }

    Ok(())
}
