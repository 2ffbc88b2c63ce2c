//! World Setup
//!
//! Builds the initial grid, the two agents at opposite corners, and the
//! predator.

use rand::Rng;

use crate::components::agent::{Agent, AgentColor, AgentSlots};
use crate::components::grid::{EnvironmentGrid, GridPos};
use crate::components::predator::Predator;
use crate::config::Config;

/// Spawn point for an agent slot: (2, 2) for slot 0, the opposite corner for slot 1
pub fn spawn_point(slot: usize, grid_size: usize) -> GridPos {
    let far = grid_size as i32 - 3;
    if slot == 0 {
        GridPos::new(2, 2)
    } else {
        GridPos::new(far, far)
    }
}

/// A fresh grid with randomly placed food
pub fn create_grid<R: Rng>(config: &Config, rng: &mut R) -> EnvironmentGrid {
    let world = &config.world;
    let mut grid = EnvironmentGrid::new(world.grid_size, config.seasons.length);

    for food in grid.food.iter_mut() {
        if rng.gen::<f64>() < world.food_spawn_rate {
            *food = if world.food_spawn_max > world.food_spawn_min {
                rng.gen_range(world.food_spawn_min..world.food_spawn_max)
            } else {
                world.food_spawn_min
            }
            .clamp(0.0, 1.0);
        }
    }

    grid
}

/// The blue and red agents at their spawn points
pub fn create_agents(config: &Config) -> AgentSlots {
    let size = config.world.grid_size;
    AgentSlots::new(
        Agent::new(0, AgentColor::Blue, spawn_point(0, size), config.energy.start),
        Agent::new(1, AgentColor::Red, spawn_point(1, size), config.energy.start),
    )
}

/// The predator at its configured start, or `None` if disabled
pub fn create_predator(config: &Config, grid: &EnvironmentGrid) -> Option<Predator> {
    if !config.predator.enabled {
        return None;
    }
    let start = GridPos::new(config.predator.start_x, config.predator.start_y);
    Some(Predator::new(grid.clamp(start)))
}
