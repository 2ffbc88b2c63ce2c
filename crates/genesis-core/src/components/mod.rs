//! Simulation state: the grid, the agents and the predator.

pub mod agent;
pub mod grid;
pub mod pathways;
pub mod predator;

pub use agent::{Agent, AgentColor, AgentSlots, Chemical, Chemicals, PeerView};
pub use grid::{EnvironmentGrid, GridPos, Season};
pub use pathways::Pathways;
pub use predator::Predator;
