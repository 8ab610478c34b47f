//! Scenario setup: the immutable run configuration and the world builder
//! that materializes it.

mod build;
mod params;

pub use build::build_scenario;
pub use params::{ScenarioParams, ServerParams, SimulationEndTime};
