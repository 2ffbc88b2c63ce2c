//! Agent Components
//!
//! An agent's chemical state, spatial memory, energy and lifecycle.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::grid::GridPos;
use super::pathways::Pathways;

/// Named chemical concentrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chemical {
    Hunger,
    Fear,
    Curiosity,
    Satiation,
    Aggression,
    Fatigue,
    Alertness,
    Comfort,
    Urgency,
    MemoryConsolidation,
    Social,
    Stress,
}

impl Chemical {
    pub const ALL: [Chemical; 12] = [
        Chemical::Hunger,
        Chemical::Fear,
        Chemical::Curiosity,
        Chemical::Satiation,
        Chemical::Aggression,
        Chemical::Fatigue,
        Chemical::Alertness,
        Chemical::Comfort,
        Chemical::Urgency,
        Chemical::MemoryConsolidation,
        Chemical::Social,
        Chemical::Stress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Chemical::Hunger => "hunger",
            Chemical::Fear => "fear",
            Chemical::Curiosity => "curiosity",
            Chemical::Satiation => "satiation",
            Chemical::Aggression => "aggression",
            Chemical::Fatigue => "fatigue",
            Chemical::Alertness => "alertness",
            Chemical::Comfort => "comfort",
            Chemical::Urgency => "urgency",
            Chemical::MemoryConsolidation => "memory_consolidation",
            Chemical::Social => "social",
            Chemical::Stress => "stress",
        }
    }

    /// Inclusive range the concentration must stay in
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Chemical::Social => (-1.0, 1.0),
            _ => (0.0, 1.0),
        }
    }
}

/// The 12 internal drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemicals {
    pub hunger: f64,
    pub fear: f64,
    pub curiosity: f64,
    pub satiation: f64,
    pub aggression: f64,
    pub fatigue: f64,
    pub alertness: f64,
    pub comfort: f64,
    pub urgency: f64,
    pub memory_consolidation: f64,
    pub social: f64,
    pub stress: f64,
}

impl Default for Chemicals {
    /// Fresh-agent levels: curiosity and alertness at 0.5, the rest at 0
    fn default() -> Self {
        Self {
            hunger: 0.0,
            fear: 0.0,
            curiosity: 0.5,
            satiation: 0.0,
            aggression: 0.0,
            fatigue: 0.0,
            alertness: 0.5,
            comfort: 0.0,
            urgency: 0.0,
            memory_consolidation: 0.0,
            social: 0.0,
            stress: 0.0,
        }
    }
}

impl Chemicals {
    pub fn get(&self, chemical: Chemical) -> f64 {
        match chemical {
            Chemical::Hunger => self.hunger,
            Chemical::Fear => self.fear,
            Chemical::Curiosity => self.curiosity,
            Chemical::Satiation => self.satiation,
            Chemical::Aggression => self.aggression,
            Chemical::Fatigue => self.fatigue,
            Chemical::Alertness => self.alertness,
            Chemical::Comfort => self.comfort,
            Chemical::Urgency => self.urgency,
            Chemical::MemoryConsolidation => self.memory_consolidation,
            Chemical::Social => self.social,
            Chemical::Stress => self.stress,
        }
    }

    /// (name, value) pairs in `Chemical::ALL` order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Chemical::ALL.iter().map(move |c| (c.name(), self.get(*c)))
    }

    pub fn in_bounds(&self) -> bool {
        Chemical::ALL.iter().all(|c| {
            let (lo, hi) = c.bounds();
            let v = self.get(*c);
            v >= lo && v <= hi
        })
    }
}

/// Display colour of an agent lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentColor {
    Blue,
    Red,
}

impl AgentColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentColor::Blue => "blue",
            AgentColor::Red => "red",
        }
    }
}

/// Read-only view of the other agent, frozen at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerView {
    pub pos: GridPos,
    pub alive: bool,
    pub hunger: f64,
}

impl PeerView {
    /// A peer that exerts no influence
    pub fn absent() -> Self {
        Self {
            pos: GridPos::new(0, 0),
            alive: false,
            hunger: 0.0,
        }
    }
}

/// A chemically driven organism
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: usize,
    pub color: AgentColor,
    pub pos: GridPos,
    pub energy: f64,
    pub alive: bool,
    pub chemicals: Chemicals,
    pub pathways: Pathways,
    pub visited: HashSet<GridPos>,
    pub move_history: VecDeque<GridPos>,
    pub trail: VecDeque<GridPos>,
    pub generation: u32,
    pub parent_food_eaten: u32,
    pub food_eaten: u32,
    pub total_ticks: u64,
    pub stationary_ticks: u32,
}

impl Agent {
    pub fn new(id: usize, color: AgentColor, spawn: GridPos, energy: f64) -> Self {
        let mut visited = HashSet::new();
        visited.insert(spawn);
        Self {
            id,
            color,
            pos: spawn,
            energy,
            alive: true,
            chemicals: Chemicals::default(),
            pathways: Pathways::new(),
            visited,
            move_history: VecDeque::new(),
            trail: VecDeque::new(),
            generation: 0,
            parent_food_eaten: 0,
            food_eaten: 0,
            total_ticks: 0,
            stationary_ticks: 0,
        }
    }

    /// Snapshot used by the other agent this tick
    pub fn peer_view(&self) -> PeerView {
        PeerView {
            pos: self.pos,
            alive: self.alive,
            hunger: self.chemicals.hunger,
        }
    }

    pub fn pathway_count(&self) -> usize {
        self.pathways.len()
    }

    /// Next generation, born at `spawn`
    ///
    /// Everything starts fresh except identity and the strongest half of the
    /// parent's pathways, scaled by `inheritance_strength`.
    pub fn produce_offspring(
        &self,
        spawn: GridPos,
        energy_start: f64,
        inheritance_strength: f64,
    ) -> Agent {
        let mut child = Agent::new(self.id, self.color, spawn, energy_start);
        child.generation = self.generation + 1;
        child.parent_food_eaten = self.food_eaten;
        child.pathways = self.pathways.inherit(inheritance_strength);
        child
    }

    /// Revive in place at `pos`, keeping pathway memory and counters
    pub fn respawn(&mut self, pos: GridPos, energy_start: f64) {
        self.pos = pos;
        self.energy = energy_start;
        self.alive = true;
        self.chemicals = Chemicals::default();
        self.trail.clear();
        self.move_history.clear();
        self.visited.clear();
        self.visited.insert(pos);
        self.stationary_ticks = 0;
    }

    pub(crate) fn record_move(&mut self, pos: GridPos, trail_len: usize) {
        self.trail.push_back(pos);
        while self.trail.len() > trail_len {
            self.trail.pop_front();
        }
    }

    pub(crate) fn record_history(&mut self, lookback: usize) {
        self.move_history.push_back(self.pos);
        while self.move_history.len() > lookback {
            self.move_history.pop_front();
        }
    }
}

/// The fixed pair of agent slots
///
/// A dead agent's slot is overwritten with its offspring.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AgentSlots {
    pub slots: [Agent; 2],
}

impl AgentSlots {
    pub fn new(first: Agent, second: Agent) -> Self {
        Self {
            slots: [first, second],
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Agent> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.slots.iter()
    }

    /// Views of both agents as they stand right now
    pub fn peer_views(&self) -> [PeerView; 2] {
        [self.slots[0].peer_view(), self.slots[1].peer_view()]
    }

    /// Put a new agent in a slot, returning the one it replaces
    pub fn replace(&mut self, slot: usize, agent: Agent) -> Agent {
        std::mem::replace(&mut self.slots[slot], agent)
    }
}
