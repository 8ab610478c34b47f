use bevy_ecs::prelude::World;

use crate::clock::SimulationClock;
use crate::distributions::SimRng;
use crate::ecs::{Server, ServerRegistry, ServiceProfile, WaitQueue};
use crate::error::ScenarioError;
use crate::profiling::EventMetrics;
use crate::routing::RoutingTable;
use crate::scenario::params::{ScenarioParams, SimulationEndTime};
use crate::telemetry::SimStats;

/// Validates `params` and materializes a fresh world from them: clock,
/// statistics, RNG, routing table, and one entity per server. The world is
/// ready for [`initialize_simulation`](crate::runner::initialize_simulation)
/// afterwards.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ScenarioError> {
    params.validate()?;

    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimStats::default());
    world.insert_resource(EventMetrics::default());
    world.insert_resource(SimulationEndTime(params.runtime));
    world.insert_resource(SimRng::new(params.seed));
    world.insert_resource(RoutingTable::new(params.routing_weights.clone()));

    let mut entities = Vec::with_capacity(params.servers.len());
    for server in &params.servers {
        let entity = world
            .spawn((
                Server::idle(),
                ServiceProfile {
                    transmission_rate: params.arrival_rate,
                    service_rate: server.service_rate,
                },
                WaitQueue::with_capacity(server.capacity),
            ))
            .id();
        entities.push(entity);
    }
    world.insert_resource(ServerRegistry(entities));

    Ok(())
}
