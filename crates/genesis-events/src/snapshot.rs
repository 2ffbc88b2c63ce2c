//! Snapshot Types
//!
//! Serialization structs for world snapshots.
//!
//! Snapshots capture the read-only state the simulation exposes at a point in
//! time, used by loggers and visualizers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state summary at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub grid: GridSummary,
    pub agents: Vec<AgentSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predator: Option<PredatorSnapshot>,
}

impl WorldSnapshot {
    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Grid-level aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub size: usize,
    pub season: String,
    /// 0.0-1.0 progress through the current season
    pub season_progress: f64,
    pub ticks_into_season: u64,
    pub total_food: f64,
}

/// One agent slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: usize,
    pub color: String,
    pub x: i32,
    pub y: i32,
    pub alive: bool,
    pub energy: f64,
    pub generation: u32,
    pub food_eaten: u32,
    pub parent_food_eaten: u32,
    pub total_ticks: u64,
    pub pathway_count: usize,
    pub visited_count: usize,
    /// Chemical name -> concentration
    pub chemicals: BTreeMap<String, f64>,
}

/// The predator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredatorSnapshot {
    pub x: i32,
    pub y: i32,
}
