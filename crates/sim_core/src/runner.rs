//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each
//! step pops the next event from [SimulationClock], inserts it as
//! [CurrentEvent], then runs the schedule. The run ends when the clock is
//! empty: arrival generation stops at the horizon (see
//! [crate::systems::arrival]), so in-flight work drains and the queue
//! exhausts itself.

use bevy_ecs::prelude::{Mut, Res, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::distributions::{sample_exponential, SimRng};
use crate::ecs::{ServerRegistry, ServiceProfile};
use crate::profiling::EventMetrics;
use crate::routing::RoutingTable;
use crate::systems::{arrival::arrival_system, departure::departure_system};
use crate::telemetry::SimStats;

fn is_arrival(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Arrival)
        .unwrap_or(false)
}

fn is_departure(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Departure)
        .unwrap_or(false)
}

/// Runs one simulation step: pops the next event, inserts it as
/// [CurrentEvent], then runs the schedule. Returns `true` if an event was
/// processed, `false` once the clock is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }
    if let Some(mut stats) = world.get_resource_mut::<SimStats>() {
        stats.observe_event(event.timestamp);
    }

    schedule.run(world);
    true
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }
    if let Some(mut stats) = world.get_resource_mut::<SimStats>() {
        stats.observe_event(event.timestamp);
    }

    schedule.run(world);
    hook(world, &event);
    true
}

/// Runs simulation steps until the event queue is empty or `max_steps` is
/// reached. Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Runs simulation steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> usize
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook) {
        steps += 1;
    }
    steps
}

/// Builds the simulation schedule: the arrival and departure handlers,
/// conditionally executed on the current event's kind.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        arrival_system.run_if(is_arrival),
        departure_system.run_if(is_departure),
    ));
    schedule
}

/// Seeds the run: routes the first packet over the full probability vector
/// and schedules its arrival one inter-arrival gap after time zero. Call
/// after [crate::scenario::build_scenario] and before running events.
pub fn initialize_simulation(world: &mut World) {
    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        let Some(server) = world.resource::<RoutingTable>().select_server(&mut rng.0) else {
            return;
        };
        let Some(entity) = world.resource::<ServerRegistry>().get(server) else {
            return;
        };
        let Some(profile) = world.get::<ServiceProfile>(entity) else {
            return;
        };
        let first_arrival = sample_exponential(&mut rng.0, profile.transmission_rate);
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(first_arrival, EventKind::Arrival, server, None);
    });
}
