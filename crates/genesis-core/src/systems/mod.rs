//! ECS Systems
//!
//! One tick runs, in order: environment, predator, agents.

pub mod agents;
pub mod chemistry;
pub mod decision;
pub mod environment;
pub mod predator;

// Re-export commonly used systems
pub use agents::{step_agent, step_agents, TickEvents};
pub use chemistry::{predator_signal, update_chemicals};
pub use decision::{base_score, decide_move, DriveWeights, NEIGHBOR_OFFSETS};
pub use environment::{advance_environment, recompute_scent, tick_environment};
pub use predator::{hunt, update_predator};
