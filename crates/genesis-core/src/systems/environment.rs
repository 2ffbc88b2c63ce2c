//! Environment Update System
//!
//! Advances the season clock, decays and regrows food, re-derives the scent
//! field from food, and fades both marker fields.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::grid::{EnvironmentGrid, Season};
use crate::config::Config;
use crate::SimRng;

/// System: one environment tick
pub fn advance_environment(
    config: Res<Config>,
    mut rng: ResMut<SimRng>,
    mut grid: ResMut<EnvironmentGrid>,
) {
    if let Some(season) = tick_environment(&mut grid, &config, &mut rng.0) {
        tracing::info!(tick = grid.tick_count(), %season, "Season changed");
    }
}

/// Advance the grid by one tick
///
/// Returns the new season if this tick crossed a season boundary.
pub fn tick_environment<R: Rng>(
    grid: &mut EnvironmentGrid,
    config: &Config,
    rng: &mut R,
) -> Option<Season> {
    grid.tick_count += 1;

    let season = Season::from_index(grid.tick_count / grid.season_length());
    let changed = if season != grid.season {
        grid.season = season;
        Some(season)
    } else {
        None
    };

    let profile = config.seasons.profile(grid.season);

    // Independent draw per cell; seasons without decay skip the draws
    if profile.food_decay > 0.0 {
        for food in grid.food.iter_mut() {
            if rng.gen::<f64>() < profile.food_decay {
                *food *= config.world.food_decay_factor;
            }
        }
    }

    for food in grid.food.iter_mut() {
        if rng.gen::<f64>() < profile.food_regen {
            *food = (*food + config.world.food_regen_amount).min(1.0);
        }
    }

    recompute_scent(
        grid,
        profile.scent_diffusion,
        config.world.scent_blur_passes,
        config.world.scent_decay,
    );

    decay_field(&mut grid.food_markers, config.markers.food_decay);
    decay_field(&mut grid.alarm_markers, config.markers.alarm_decay);

    changed
}

/// Scent = food blurred `passes` times, then faded by `decay`
pub fn recompute_scent(grid: &mut EnvironmentGrid, diffusion: f64, passes: usize, decay: f64) {
    let size = grid.size();
    let mut current = grid.food.clone();
    let mut next = vec![0.0; current.len()];

    for _ in 0..passes {
        blur_pass(&current, &mut next, size, diffusion);
        std::mem::swap(&mut current, &mut next);
    }

    for value in current.iter_mut() {
        *value = (*value * (1.0 - decay)).clamp(0.0, 1.0);
    }
    grid.scent = current;
}

/// `center * (1 - d) + sum(4-neighbours) * d / 4`, treating off-grid cells as 0
fn blur_pass(src: &[f64], dst: &mut [f64], size: usize, diffusion: f64) {
    let at = |x: isize, y: isize| -> f64 {
        if x < 0 || y < 0 || x >= size as isize || y >= size as isize {
            0.0
        } else {
            src[y as usize * size + x as usize]
        }
    };

    for y in 0..size as isize {
        for x in 0..size as isize {
            let neighbours = at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1);
            dst[y as usize * size + x as usize] =
                at(x, y) * (1.0 - diffusion) + neighbours * (diffusion / 4.0);
        }
    }
}

fn decay_field(field: &mut [f64], rate: f64) {
    for value in field.iter_mut() {
        *value = (*value * (1.0 - rate)).clamp(0.0, 1.0);
    }
}
