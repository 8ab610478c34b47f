//! Positional argument grammar for the batch simulator:
//!
//! ```text
//! sim_cli <duration> <num_servers> <prob_1..N> <arrival_rate>
//!         <capacity_1..N> <service_rate_1..N>
//! ```
//!
//! Everything is validated here, before any simulation state exists.

use std::str::FromStr;

use sim_core::error::ScenarioError;
use sim_core::scenario::{ScenarioParams, ServerParams};
use thiserror::Error;

const USAGE: &str = "usage: sim_cli <simulation_duration> <num_servers> \
<prob_1..N> <arrival_rate> <capacity_1..N> <service_rate_1..N>";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", USAGE)]
    Usage,
    #[error("expected {expected} arguments for {servers} servers, got {actual}")]
    ArgumentCountMismatch {
        servers: usize,
        expected: usize,
        actual: usize,
    },
    #[error("number of servers must be at least 1")]
    InvalidServerCount,
    #[error("simulation duration must be at least 1")]
    InvalidDuration,
    #[error("argument {position} is not a valid number: {value:?}")]
    InvalidNumber { position: usize, value: String },
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

/// Parses the positional arguments (program name excluded) into a validated
/// scenario. The seed is left unset; the caller decides between entropy and
/// an injected seed.
pub fn parse(args: &[String]) -> Result<ScenarioParams, CliError> {
    if args.len() < 2 {
        return Err(CliError::Usage);
    }

    let duration: u64 = parse_number(args, 0)?;
    let num_servers: usize = parse_number(args, 1)?;
    if num_servers == 0 {
        return Err(CliError::InvalidServerCount);
    }

    // duration, num_servers, N weights, arrival_rate, N capacities, N rates.
    let expected = 3 * num_servers + 3;
    if args.len() != expected {
        return Err(CliError::ArgumentCountMismatch {
            servers: num_servers,
            expected,
            actual: args.len(),
        });
    }
    if duration == 0 {
        return Err(CliError::InvalidDuration);
    }

    let mut routing_weights = Vec::with_capacity(num_servers);
    for position in 2..2 + num_servers {
        routing_weights.push(parse_number::<f64>(args, position)?);
    }
    let arrival_rate: f64 = parse_number(args, 2 + num_servers)?;
    let mut capacities = Vec::with_capacity(num_servers);
    for position in 3 + num_servers..3 + 2 * num_servers {
        capacities.push(parse_number::<usize>(args, position)?);
    }
    let mut service_rates = Vec::with_capacity(num_servers);
    for position in 3 + 2 * num_servers..3 + 3 * num_servers {
        service_rates.push(parse_number::<f64>(args, position)?);
    }

    let params = ScenarioParams {
        runtime: duration as f64,
        arrival_rate,
        routing_weights,
        servers: capacities
            .into_iter()
            .zip(service_rates)
            .map(|(capacity, service_rate)| ServerParams {
                capacity,
                service_rate,
            })
            .collect(),
        seed: None,
    };
    params.validate()?;
    Ok(params)
}

fn parse_number<T: FromStr>(args: &[String], position: usize) -> Result<T, CliError> {
    args[position].parse().map_err(|_| CliError::InvalidNumber {
        // 1-based, as the user counts arguments on the command line.
        position: position + 1,
        value: args[position].clone(),
    })
}
