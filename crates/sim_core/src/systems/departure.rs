use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, DepartureInfo, EventKind, SimulationClock};
use crate::distributions::{sample_exponential, SimRng};
use crate::ecs::{Server, ServerRegistry, ServerState, ServiceProfile, WaitQueue};
use crate::telemetry::SimStats;

/// Completes one service: accounts the departed packet, then either pulls
/// the oldest waiting packet into service or lets the server go idle.
pub fn departure_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut rng: ResMut<SimRng>,
    registry: Res<ServerRegistry>,
    mut stats: ResMut<SimStats>,
    mut servers: Query<(&mut Server, &ServiceProfile, &mut WaitQueue)>,
) {
    if event.0.kind != EventKind::Departure {
        return;
    }
    let Some(departure) = event.0.departure else {
        return;
    };
    let now = event.0.timestamp;

    stats.record_departure(now, &departure);

    let Some(entity) = registry.get(event.0.server) else {
        return;
    };
    let Ok((mut server, profile, mut queue)) = servers.get_mut(entity) else {
        return;
    };
    if let Some(enqueued_at) = queue.dequeue() {
        let service_time = sample_exponential(&mut rng.0, profile.service_rate);
        clock.schedule_at(
            now + service_time,
            EventKind::Departure,
            event.0.server,
            Some(DepartureInfo {
                service_time,
                enqueued_at,
            }),
        );
    } else {
        server.state = ServerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::scenario::{build_scenario, ScenarioParams, ServerParams};

    fn test_world(capacity: usize) -> World {
        let mut world = World::new();
        let params = ScenarioParams {
            runtime: 0.0,
            arrival_rate: 1.0,
            routing_weights: vec![1.0],
            servers: vec![ServerParams {
                capacity,
                service_rate: 2.0,
            }],
            seed: Some(5),
        };
        build_scenario(&mut world, params).expect("valid scenario");
        world
    }

    fn run_departure(world: &mut World, timestamp: f64, departure: DepartureInfo) {
        let event = {
            let mut clock = world.resource_mut::<SimulationClock>();
            clock.schedule_at(timestamp, EventKind::Departure, 0, Some(departure));
            clock.pop_next().expect("scheduled event")
        };
        world.insert_resource(CurrentEvent(event));
        let mut schedule = Schedule::default();
        schedule.add_systems(departure_system);
        schedule.run(world);
    }

    fn make_busy(world: &mut World, waiting: &[f64]) {
        let entity = world.resource::<ServerRegistry>().get(0).expect("server");
        world
            .get_mut::<Server>(entity)
            .expect("server component")
            .state = ServerState::Busy;
        let mut queue = world.get_mut::<WaitQueue>(entity).expect("queue");
        for &arrived_at in waiting {
            assert!(queue.try_enqueue(arrived_at));
        }
    }

    #[test]
    fn departure_with_empty_queue_goes_idle() {
        let mut world = test_world(5);
        make_busy(&mut world, &[]);
        run_departure(
            &mut world,
            3.0,
            DepartureInfo {
                service_time: 1.0,
                enqueued_at: 2.0,
            },
        );

        let entity = world.resource::<ServerRegistry>().get(0).expect("server");
        assert_eq!(
            world.get::<Server>(entity).expect("server").state,
            ServerState::Idle
        );
        assert!(world.resource::<SimulationClock>().is_empty());

        let stats = world.resource::<SimStats>();
        assert_eq!(stats.serviced_count, 1);
        assert_eq!(stats.service_time_total, 1.0);
        // Service started at 2.0, packet arrived at 2.0: zero wait.
        assert_eq!(stats.wait_time_total, 0.0);
    }

    #[test]
    fn departure_pulls_oldest_waiting_packet() {
        let mut world = test_world(5);
        make_busy(&mut world, &[1.0, 2.0]);
        run_departure(
            &mut world,
            4.0,
            DepartureInfo {
                service_time: 3.0,
                enqueued_at: 0.5,
            },
        );

        let entity = world.resource::<ServerRegistry>().get(0).expect("server");
        assert_eq!(
            world.get::<Server>(entity).expect("server").state,
            ServerState::Busy
        );
        assert_eq!(world.get::<WaitQueue>(entity).expect("queue").len(), 1);

        let clock = world.resource::<SimulationClock>();
        assert_eq!(clock.len(), 1);
        let next = clock.next_event_time().expect("next departure");
        assert!(next > 4.0);

        // The packet that arrived at 1.0 is now in service; 2.0 still waits.
        let mut queue = world.get::<WaitQueue>(entity).expect("queue").clone();
        assert_eq!(queue.dequeue(), Some(2.0));
    }

    #[test]
    fn departure_wait_accounts_time_in_queue() {
        let mut world = test_world(5);
        make_busy(&mut world, &[]);
        // Arrived at 1.0, waited until 4.0, serviced for 2.0, departs at 6.0.
        run_departure(
            &mut world,
            6.0,
            DepartureInfo {
                service_time: 2.0,
                enqueued_at: 1.0,
            },
        );

        let stats = world.resource::<SimStats>();
        assert_eq!(stats.wait_time_total, 3.0);
        assert_eq!(stats.service_time_total, 2.0);
    }
}
