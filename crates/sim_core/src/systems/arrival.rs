use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, DepartureInfo, EventKind, SimulationClock};
use crate::distributions::{sample_exponential, SimRng};
use crate::ecs::{Server, ServerRegistry, ServerState, ServiceProfile, WaitQueue};
use crate::routing::RoutingTable;
use crate::scenario::SimulationEndTime;
use crate::telemetry::SimStats;

/// Handles one packet arriving at its routed server, then synthesizes the
/// next external arrival while the horizon has not been reached.
///
/// Admission against the target server:
/// - idle server: service starts immediately, a departure is scheduled;
/// - busy server with queue room: the arrival timestamp joins the queue;
/// - busy server with a full queue: the packet is dropped.
pub fn arrival_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut rng: ResMut<SimRng>,
    routing: Res<RoutingTable>,
    registry: Res<ServerRegistry>,
    end_time: Res<SimulationEndTime>,
    mut stats: ResMut<SimStats>,
    mut servers: Query<(&mut Server, &ServiceProfile, &mut WaitQueue)>,
) {
    if event.0.kind != EventKind::Arrival {
        return;
    }
    let now = event.0.timestamp;

    let Some(entity) = registry.get(event.0.server) else {
        return;
    };
    {
        let Ok((mut server, profile, mut queue)) = servers.get_mut(entity) else {
            return;
        };
        match server.state {
            ServerState::Busy => {
                if !queue.try_enqueue(now) {
                    stats.record_dropped();
                }
            }
            ServerState::Idle => {
                let service_time = sample_exponential(&mut rng.0, profile.service_rate);
                clock.schedule_at(
                    now + service_time,
                    EventKind::Departure,
                    event.0.server,
                    Some(DepartureInfo {
                        service_time,
                        enqueued_at: now,
                    }),
                );
                server.state = ServerState::Busy;
            }
        }
    }

    // Route the next external packet. Generation self-terminates at the
    // horizon; departures and queued packets keep draining past it.
    if now < end_time.0 {
        let Some(next) = routing.select_server(&mut rng.0) else {
            return;
        };
        let Some(next_entity) = registry.get(next) else {
            return;
        };
        let Ok((_, profile, _)) = servers.get_mut(next_entity) else {
            return;
        };
        let gap = sample_exponential(&mut rng.0, profile.transmission_rate);
        clock.schedule_at(now + gap, EventKind::Arrival, next, None);
    }
}
