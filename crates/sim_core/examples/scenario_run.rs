//! Run one three-server scenario to completion and print its summary.
//!
//! ```sh
//! cargo run --example scenario_run
//! ```

use bevy_ecs::prelude::World;
use sim_core::clock::EventKind;
use sim_core::profiling::EventMetrics;
use sim_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use sim_core::scenario::{build_scenario, ScenarioParams, ServerParams};
use sim_core::telemetry::SimStats;

fn main() {
    let params = ScenarioParams {
        runtime: 1000.0,
        arrival_rate: 3.0,
        routing_weights: vec![0.5, 0.3, 0.2],
        servers: vec![
            ServerParams {
                capacity: 10,
                service_rate: 2.0,
            },
            ServerParams {
                capacity: 5,
                service_rate: 1.0,
            },
            ServerParams {
                capacity: 0,
                service_rate: 0.8,
            },
        ],
        seed: Some(42),
    };

    let mut world = World::new();
    build_scenario(&mut world, params).expect("valid scenario");
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    let steps = run_until_empty(&mut world, &mut schedule, 10_000_000);

    let summary = world.resource::<SimStats>().snapshot();
    let metrics = world.resource::<EventMetrics>();
    println!("steps processed:   {steps}");
    println!("arrivals offered:  {}", metrics.count(EventKind::Arrival));
    println!("serviced:          {}", summary.serviced_count);
    println!("dropped:           {}", summary.dropped_count);
    println!("drained at:        {:.4}", summary.last_event_at);
    println!("mean wait:         {:.4}", summary.mean_wait_time);
    println!("mean service:      {:.4}", summary.mean_service_time);
    println!(
        "throughput:        {:.0} events/s",
        metrics.events_per_second()
    );
}
