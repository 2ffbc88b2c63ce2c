//! Per-tick Event Records
//!
//! What happened to each agent during one tick. Presentation layers use these
//! to trigger flashes and log lines.

use serde::{Deserialize, Serialize};

/// Outcome flags for a single agent over one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEvents {
    /// The agent consumed food on its cell
    pub ate: bool,
    /// The agent left its previous cell
    pub moved: bool,
    /// The agent's energy reached zero this tick
    pub died: bool,
}

impl AgentEvents {
    /// True if nothing noteworthy happened
    pub fn is_quiet(&self) -> bool {
        !self.ate && !self.moved && !self.died
    }
}

/// Events for every agent slot after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub season: String,
    pub agents: Vec<AgentEvents>,
}

impl TickReport {
    pub fn new(tick: u64, season: impl Into<String>, agents: Vec<AgentEvents>) -> Self {
        Self {
            tick,
            season: season.into(),
            agents,
        }
    }

    /// Slots whose agent died this tick
    pub fn deaths(&self) -> impl Iterator<Item = usize> + '_ {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, e)| e.died)
            .map(|(slot, _)| slot)
    }
}
