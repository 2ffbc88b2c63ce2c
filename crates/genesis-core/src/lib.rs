//! Genesis Simulation Engine Library
//!
//! Two chemically driven agents, a pursuing predator, and a seasonal grid of
//! food, scent and markers. Behaviour is never scripted: every move is the
//! best-scoring neighbour under the agent's current chemistry.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{Config, ConfigError};
pub use simulation::Simulation;

pub use genesis_events::{AgentEvents, TickReport, WorldSnapshot};

/// Seeded random number generator resource
///
/// Every random draw in a tick comes from here, so a fixed seed makes a run
/// reproducible.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
