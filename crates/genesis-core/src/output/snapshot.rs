//! Snapshot Output
//!
//! Builds `WorldSnapshot`s from a running simulation and appends them to a
//! JSONL file at a fixed tick interval.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use genesis_events::{AgentSnapshot, GridSummary, PredatorSnapshot, WorldSnapshot};
use thiserror::Error;

use crate::components::agent::Agent;
use crate::simulation::Simulation;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write snapshots to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Summarize the current simulation state
pub fn snapshot(sim: &Simulation) -> WorldSnapshot {
    let grid = sim.grid();
    WorldSnapshot {
        tick: grid.tick_count(),
        grid: GridSummary {
            size: grid.size(),
            season: grid.season().name().to_string(),
            season_progress: grid.season_progress(),
            ticks_into_season: grid.ticks_into_season(),
            total_food: grid.total_food(),
        },
        agents: sim.agents().iter().map(agent_snapshot).collect(),
        predator: sim.predator().map(|p| PredatorSnapshot {
            x: p.pos.x,
            y: p.pos.y,
        }),
    }
}

fn agent_snapshot(agent: &Agent) -> AgentSnapshot {
    AgentSnapshot {
        id: agent.id,
        color: agent.color.as_str().to_string(),
        x: agent.pos.x,
        y: agent.pos.y,
        alive: agent.alive,
        energy: agent.energy,
        generation: agent.generation,
        food_eaten: agent.food_eaten,
        parent_food_eaten: agent.parent_food_eaten,
        total_ticks: agent.total_ticks,
        pathway_count: agent.pathway_count(),
        visited_count: agent.visited.len(),
        chemicals: agent
            .chemicals
            .named()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

/// Append-only JSONL snapshot writer
pub struct SnapshotWriter {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    interval: u64,
    written: u64,
}

impl SnapshotWriter {
    /// Create (or truncate) the output file
    pub fn create(path: impl AsRef<Path>, interval: u64) -> Result<Self, OutputError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| OutputError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            interval,
            written: 0,
        })
    }

    /// A writer that only counts (for runs without an output file)
    pub fn null(interval: u64) -> Self {
        Self {
            writer: None,
            path: PathBuf::new(),
            interval,
            written: 0,
        }
    }

    /// Whether `tick` falls on the snapshot interval
    pub fn is_due(&self, tick: u64) -> bool {
        self.interval > 0 && tick % self.interval == 0
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn write(&mut self, snapshot: &WorldSnapshot) -> Result<(), OutputError> {
        let line = snapshot.to_json_line()?;
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{}", line).map_err(|source| OutputError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        self.written += 1;
        Ok(())
    }

    /// Write a snapshot of `sim` if its current tick is due
    pub fn record(&mut self, sim: &Simulation) -> Result<bool, OutputError> {
        if !self.is_due(sim.tick()) {
            return Ok(false);
        }
        self.write(&sim.snapshot())?;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<(), OutputError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().map_err(|source| OutputError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Failed to flush snapshot writer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::BufRead;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut sim = Simulation::new(Config::default(), 42);
        sim.run(5);
        let snap = snapshot(&sim);

        assert_eq!(snap.tick, 5);
        assert_eq!(snap.grid.size, 60);
        assert_eq!(snap.grid.season, "Spring");
        assert_eq!(snap.agents.len(), 2);
        assert_eq!(snap.agents[0].color, "blue");
        assert_eq!(snap.agents[1].color, "red");
        assert_eq!(snap.agents[0].chemicals.len(), 12);
        assert!(snap.agents[0].chemicals.contains_key("memory_consolidation"));
        assert!(snap.predator.is_some());
    }

    #[test]
    fn test_writer_appends_due_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.jsonl");
        let mut sim = Simulation::new(Config::default(), 1);

        {
            let mut writer = SnapshotWriter::create(&path, 10).unwrap();
            assert!(writer.record(&sim).unwrap());
            for _ in 0..25 {
                sim.step();
                writer.record(&sim).unwrap();
            }
            assert_eq!(writer.written(), 3);
        }

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 3);

        let ticks: Vec<u64> = lines
            .iter()
            .map(|l| serde_json::from_str::<WorldSnapshot>(l).unwrap().tick)
            .collect();
        assert_eq!(ticks, vec![0, 10, 20]);
    }

    #[test]
    fn test_null_writer_counts() {
        let sim = Simulation::new(Config::default(), 1);
        let mut writer = SnapshotWriter::null(0);
        assert!(!writer.is_due(0));
        writer.write(&sim.snapshot()).unwrap();
        assert_eq!(writer.written(), 1);
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.jsonl");
        let err = SnapshotWriter::create(&path, 10).err().unwrap();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
