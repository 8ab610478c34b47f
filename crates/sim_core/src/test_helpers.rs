//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across
//! test files.

use bevy_ecs::prelude::World;

use crate::scenario::{build_scenario, ScenarioParams, ServerParams};

/// Single-server scenario with a fixed seed, a zero horizon, and the given
/// queueing parameters. With a zero horizon no arrivals are generated, so
/// tests can drive the event flow by hand.
pub fn single_server_params(capacity: usize, service_rate: f64) -> ScenarioParams {
    ScenarioParams {
        runtime: 0.0,
        arrival_rate: 1.0,
        routing_weights: vec![1.0],
        servers: vec![ServerParams {
            capacity,
            service_rate,
        }],
        seed: Some(1),
    }
}

/// Build a ready-to-run world from `params`.
///
/// # Panics
///
/// Panics if `params` fails validation; test scenarios are expected to be
/// valid.
pub fn create_test_world(params: ScenarioParams) -> World {
    let mut world = World::new();
    build_scenario(&mut world, params).expect("test scenario should be valid");
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ServerRegistry;

    #[test]
    fn single_server_params_validate() {
        assert!(single_server_params(0, 1.0).validate().is_ok());
    }

    #[test]
    fn create_test_world_registers_servers() {
        let world = create_test_world(single_server_params(2, 1.0));
        assert_eq!(world.resource::<ServerRegistry>().len(), 1);
    }
}
