//! Predator Component
//!
//! A threat with no chemicals and no memory. It only has a position and a
//! cosmetic trail; behaviour lives in `systems::predator`.

use bevy_ecs::prelude::*;
use std::collections::VecDeque;

use super::grid::GridPos;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Predator {
    pub pos: GridPos,
    /// Always true; nothing kills the predator
    pub alive: bool,
    pub trail: VecDeque<GridPos>,
}

impl Predator {
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos,
            alive: true,
            trail: VecDeque::new(),
        }
    }

    pub(crate) fn record_trail(&mut self, trail_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > trail_len {
            self.trail.pop_front();
        }
    }
}
