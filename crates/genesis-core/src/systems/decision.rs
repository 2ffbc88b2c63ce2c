//! Movement Decision
//!
//! Scores the 8 neighbouring cells from chemical-weighted signals and picks
//! the best one, or stays put if even the best score is negative. Reads state
//! only; the single side effect is one random draw per in-bounds neighbour.

use rand::Rng;

use crate::components::agent::{Agent, PeerView};
use crate::components::grid::{EnvironmentGrid, GridPos};
use crate::components::predator::Predator;
use crate::config::Config;

/// Neighbour scan order; ties go to the earliest entry
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const URGENCY_FEAR_DAMPING: f64 = 0.7;
const FATIGUE_CURIOSITY_DAMPING: f64 = 0.7;
const SOCIAL_ATTRACTION: f64 = 0.3;
const PREDATOR_REPULSION: f64 = 2.0;
const COMFORT_BONUS: f64 = 0.1;

/// Per-tick drive multipliers derived from the chemicals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveWeights {
    pub hunger: f64,
    pub fear: f64,
    pub curiosity: f64,
    /// Half-width of the uniform score noise
    pub noise: f64,
}

impl DriveWeights {
    /// Urgency shifts weight from fear to hunger; fatigue damps curiosity
    pub fn from_agent(agent: &Agent, config: &Config) -> Self {
        let c = &agent.chemicals;
        let movement = &config.movement;
        Self {
            hunger: c.hunger * movement.hunger_weight * (1.0 + c.urgency),
            fear: c.fear * movement.fear_weight * (1.0 - c.urgency * URGENCY_FEAR_DAMPING),
            curiosity: c.curiosity
                * movement.curiosity_weight
                * (1.0 - c.fatigue * FATIGUE_CURIOSITY_DAMPING),
            noise: movement.noise_range + c.stress * movement.stress_noise,
        }
    }
}

/// Deterministic part of a neighbour's score
pub fn base_score(
    cell: GridPos,
    agent: &Agent,
    weights: &DriveWeights,
    peer: &PeerView,
    predator: Option<&Predator>,
    grid: &EnvironmentGrid,
    config: &Config,
) -> f64 {
    let c = &agent.chemicals;

    let mut score = grid.scent(cell) * weights.hunger;
    score += grid.food_marker(cell) * config.markers.food_weight * c.hunger;
    score -= grid.alarm_marker(cell) * config.markers.alarm_weight * c.fear;

    if peer.alive {
        let proximity = 1.0 / (cell.distance(peer.pos) + 1.0);
        score -= proximity * weights.fear;
        score += proximity * c.social.max(0.0) * SOCIAL_ATTRACTION;
    }

    if let Some(predator) = predator.filter(|p| p.alive) {
        let distance = cell.distance(predator.pos);
        if distance < config.predator.sense_range {
            score -= 1.0 / (distance + 0.5) * weights.fear * PREDATOR_REPULSION;
        }
    }

    let visited = agent.visited.contains(&cell);
    if !visited {
        score += weights.curiosity;
    }

    score += agent.pathways.strength(cell) * config.pathways.weight;

    if visited {
        score += c.comfort * COMFORT_BONUS;
    }

    score
}

/// Pick the cell to move to (the agent's own cell means stay)
pub fn decide_move<R: Rng>(
    agent: &Agent,
    peer: &PeerView,
    predator: Option<&Predator>,
    grid: &EnvironmentGrid,
    config: &Config,
    rng: &mut R,
) -> GridPos {
    let weights = DriveWeights::from_agent(agent, config);

    let mut best_score = f64::NEG_INFINITY;
    let mut best_cell = agent.pos;

    for (dx, dy) in NEIGHBOR_OFFSETS {
        let cell = agent.pos.offset(dx, dy);
        if !grid.in_bounds(cell) {
            continue;
        }

        let noise = (rng.gen::<f64>() * 2.0 - 1.0) * weights.noise;
        let score = base_score(cell, agent, &weights, peer, predator, grid, config) + noise;

        if score > best_score {
            best_score = score;
            best_cell = cell;
        }
    }

    if best_score < 0.0 {
        agent.pos
    } else {
        best_cell
    }
}
