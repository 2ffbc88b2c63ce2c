//! Environment Grid
//!
//! Food density, the scent field derived from it, the two agent-deposited
//! markers, and the season clock. Every per-cell value stays in [0, 1].
//! Reads outside the grid return 0 and writes outside the grid are ignored.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// An integer cell coordinate
///
/// Ordered by `x` then `y`; pathway memory relies on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance
    pub fn distance(&self, other: GridPos) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> GridPos {
        GridPos::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

/// Season in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn from_index(index: u64) -> Self {
        Season::ALL[(index % 4) as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The shared square environment
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EnvironmentGrid {
    size: usize,
    season_length: u64,
    pub(crate) food: Vec<f64>,
    pub(crate) scent: Vec<f64>,
    pub(crate) food_markers: Vec<f64>,
    pub(crate) alarm_markers: Vec<f64>,
    pub(crate) tick_count: u64,
    pub(crate) season: Season,
}

impl EnvironmentGrid {
    /// An empty grid: no food, no scent, no markers, tick 0, Spring
    pub fn new(size: usize, season_length: u64) -> Self {
        let cells = size * size;
        Self {
            size,
            season_length: season_length.max(1),
            food: vec![0.0; cells],
            scent: vec![0.0; cells],
            food_markers: vec![0.0; cells],
            alarm_markers: vec![0.0; cells],
            tick_count: 0,
            season: Season::Spring,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the grid diagonal
    pub fn diagonal(&self) -> f64 {
        let side = self.size as f64;
        side.hypot(side)
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Clamp a coordinate onto the grid
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        let max = (self.size as i32 - 1).max(0);
        GridPos::new(pos.x.clamp(0, max), pos.y.clamp(0, max))
    }

    pub(crate) fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    fn read(&self, field: &[f64], pos: GridPos) -> f64 {
        self.index(pos).map_or(0.0, |i| field[i])
    }

    pub fn food(&self, pos: GridPos) -> f64 {
        self.read(&self.food, pos)
    }

    pub fn scent(&self, pos: GridPos) -> f64 {
        self.read(&self.scent, pos)
    }

    pub fn food_marker(&self, pos: GridPos) -> f64 {
        self.read(&self.food_markers, pos)
    }

    pub fn alarm_marker(&self, pos: GridPos) -> f64 {
        self.read(&self.alarm_markers, pos)
    }

    pub fn has_food(&self, pos: GridPos, edible_threshold: f64) -> bool {
        self.food(pos) > edible_threshold
    }

    /// Set food density, clamped to [0, 1]
    pub fn set_food(&mut self, pos: GridPos, value: f64) {
        if let Some(i) = self.index(pos) {
            self.food[i] = value.clamp(0.0, 1.0);
        }
    }

    /// Add to the food marker, capped at 1
    pub fn deposit_food_marker(&mut self, pos: GridPos, strength: f64) {
        if let Some(i) = self.index(pos) {
            self.food_markers[i] = (self.food_markers[i] + strength).clamp(0.0, 1.0);
        }
    }

    /// Add to the alarm marker, capped at 1
    pub fn deposit_alarm_marker(&mut self, pos: GridPos, strength: f64) {
        if let Some(i) = self.index(pos) {
            self.alarm_markers[i] = (self.alarm_markers[i] + strength).clamp(0.0, 1.0);
        }
    }

    /// Eat the food on a cell
    ///
    /// Returns the energy gained, or 0 if the density is at or below the
    /// edible threshold. An eaten cell is emptied.
    pub fn eat_food(&mut self, pos: GridPos, edible_threshold: f64, food_gain: f64) -> f64 {
        if !self.has_food(pos, edible_threshold) {
            return 0.0;
        }
        let density = self.food(pos);
        self.set_food(pos, 0.0);
        density.min(1.0) * food_gain
    }

    /// Sum of all food on the grid
    pub fn total_food(&self) -> f64 {
        self.food.iter().sum()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn season_length(&self) -> u64 {
        self.season_length
    }

    /// Tick within the current season (0 to length - 1)
    pub fn ticks_into_season(&self) -> u64 {
        self.tick_count % self.season_length
    }

    /// 0.0-1.0 progress through the current season
    pub fn season_progress(&self) -> f64 {
        self.ticks_into_season() as f64 / self.season_length as f64
    }

    /// Scent values in a square window around `center`, keyed by offset
    pub fn visible_scent(&self, center: GridPos, radius: i32) -> Vec<((i32, i32), f64)> {
        let mut visible = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let pos = center.offset(dx, dy);
                if let Some(i) = self.index(pos) {
                    visible.push(((dx, dy), self.scent[i]));
                }
            }
        }
        visible
    }

    /// True if every per-cell field lies in [0, 1]
    pub fn fields_in_bounds(&self) -> bool {
        [&self.food, &self.scent, &self.food_markers, &self.alarm_markers]
            .iter()
            .all(|field| field.iter().all(|v| (0.0..=1.0).contains(v)))
    }
}
