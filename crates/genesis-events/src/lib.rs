//! Shared event and snapshot types for the Genesis simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers, loggers and the headless runner consume these without
//! depending on the simulation internals.

pub mod event;
pub mod snapshot;

pub use event::{AgentEvents, TickReport};
pub use snapshot::{AgentSnapshot, GridSummary, PredatorSnapshot, WorldSnapshot};
