//! Predator System
//!
//! Every `speed_interval` ticks the predator steps one cell toward the nearest
//! living agent, then damages every living agent within the attack radius.

use bevy_ecs::prelude::*;

use crate::components::agent::{Agent, AgentSlots};
use crate::components::grid::{EnvironmentGrid, GridPos};
use crate::components::predator::Predator;
use crate::config::Config;

/// System: pursue and attack
pub fn update_predator(
    config: Res<Config>,
    grid: Res<EnvironmentGrid>,
    predator: Option<ResMut<Predator>>,
    mut agents: ResMut<AgentSlots>,
) {
    let Some(mut predator) = predator else {
        return;
    };

    for slot in hunt(&mut predator, &mut agents.slots, grid.tick_count(), &grid, &config) {
        tracing::debug!(
            tick = grid.tick_count(),
            slot,
            energy = agents.slots[slot].energy,
            "Predator attacked agent"
        );
    }
}

/// Run one predator update; returns the indices of the agents it hit
pub fn hunt(
    predator: &mut Predator,
    agents: &mut [Agent],
    tick: u64,
    grid: &EnvironmentGrid,
    config: &Config,
) -> Vec<usize> {
    // an interval of 0 means every tick
    let interval = config.predator.speed_interval.max(1);
    if !predator.alive || tick % interval != 0 {
        return Vec::new();
    }

    let Some(target) = nearest_living(predator.pos, agents) else {
        return Vec::new();
    };

    predator.pos = grid.clamp(step_toward(predator.pos, target));
    predator.record_trail(config.predator.trail_len);

    let mut hits = Vec::new();
    for (slot, agent) in agents.iter_mut().enumerate() {
        if agent.alive && predator.pos.distance(agent.pos) < config.predator.attack_radius {
            agent.energy -= config.predator.damage;
            hits.push(slot);
        }
    }
    hits
}

/// Position of the closest living agent; the first one wins a tie
fn nearest_living(from: GridPos, agents: &[Agent]) -> Option<GridPos> {
    let mut nearest = None;
    let mut nearest_distance = f64::INFINITY;
    for agent in agents.iter().filter(|a| a.alive) {
        let distance = from.distance(agent.pos);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(agent.pos);
        }
    }
    nearest
}

/// One unit step along the axis with the larger offset (x on a tie)
fn step_toward(from: GridPos, to: GridPos) -> GridPos {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx != 0 && dx.abs() >= dy.abs() {
        from.offset(dx.signum(), 0)
    } else if dy != 0 {
        from.offset(0, dy.signum())
    } else {
        from
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentColor;

    fn agents_at(a: (i32, i32), b: (i32, i32)) -> Vec<Agent> {
        vec![
            Agent::new(0, AgentColor::Blue, a.into(), 100.0),
            Agent::new(1, AgentColor::Red, b.into(), 100.0),
        ]
    }

    #[test]
    fn test_step_axis_choice() {
        let from = GridPos::new(5, 5);
        assert_eq!(step_toward(from, GridPos::new(9, 6)), GridPos::new(6, 5));
        assert_eq!(step_toward(from, GridPos::new(6, 1)), GridPos::new(5, 4));
        assert_eq!(step_toward(from, GridPos::new(2, 8)), GridPos::new(4, 5));
        assert_eq!(step_toward(from, from), from);
    }

    #[test]
    fn test_waits_between_moves() {
        let config = Config::default();
        let grid = EnvironmentGrid::new(60, 500);
        let mut predator = Predator::new(GridPos::new(30, 30));
        let mut agents = agents_at((2, 2), (57, 57));

        assert!(hunt(&mut predator, &mut agents, 4, &grid, &config).is_empty());
        assert_eq!(predator.pos, GridPos::new(30, 30));
        assert!(predator.trail.is_empty());

        hunt(&mut predator, &mut agents, 6, &grid, &config);
        assert_eq!(predator.trail.len(), 1);
        assert_ne!(predator.pos, GridPos::new(30, 30));
    }

    #[test]
    fn test_zero_interval_moves_every_tick() {
        let mut config = Config::default();
        config.predator.speed_interval = 0;
        let grid = EnvironmentGrid::new(60, 500);
        let mut predator = Predator::new(GridPos::new(30, 30));
        let mut agents = agents_at((30, 20), (30, 45));

        hunt(&mut predator, &mut agents, 1, &grid, &config);
        hunt(&mut predator, &mut agents, 2, &grid, &config);
        assert_eq!(predator.pos, GridPos::new(30, 28));
        assert_eq!(predator.trail.len(), 2);
    }

    #[test]
    fn test_chases_nearest_living_agent() {
        let config = Config::default();
        let grid = EnvironmentGrid::new(60, 500);
        let mut predator = Predator::new(GridPos::new(30, 30));
        let mut agents = agents_at((30, 20), (30, 45));

        hunt(&mut predator, &mut agents, 3, &grid, &config);
        assert_eq!(predator.pos, GridPos::new(30, 29));

        agents[0].alive = false;
        hunt(&mut predator, &mut agents, 6, &grid, &config);
        assert_eq!(predator.pos, GridPos::new(30, 30));
    }

    #[test]
    fn test_adjacent_attack_deals_exact_damage() {
        let config = Config::default();
        let grid = EnvironmentGrid::new(60, 500);
        let mut predator = Predator::new(GridPos::new(10, 11));
        let mut agents = agents_at((10, 10), (50, 50));

        let hits = hunt(&mut predator, &mut agents, 3, &grid, &config);
        assert_eq!(hits, vec![0]);
        assert_eq!(agents[0].energy, 100.0 - config.predator.damage);
        assert_eq!(agents[1].energy, 100.0);
    }

    #[test]
    fn test_damage_stacks_across_agents() {
        let config = Config::default();
        let grid = EnvironmentGrid::new(60, 500);
        let mut predator = Predator::new(GridPos::new(10, 12));
        let mut agents = agents_at((10, 10), (11, 10));

        let hits = hunt(&mut predator, &mut agents, 3, &grid, &config);
        assert_eq!(predator.pos, GridPos::new(10, 11));
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn test_no_living_agents_means_no_move() {
        let config = Config::default();
        let grid = EnvironmentGrid::new(60, 500);
        let mut predator = Predator::new(GridPos::new(10, 10));
        let mut agents = agents_at((10, 11), (11, 10));
        agents.iter_mut().for_each(|a| a.alive = false);

        assert!(hunt(&mut predator, &mut agents, 3, &grid, &config).is_empty());
        assert_eq!(predator.pos, GridPos::new(10, 10));
        assert_eq!(agents[0].energy, 100.0);
    }
}
