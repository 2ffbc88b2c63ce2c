//! Pathway Memory
//!
//! Sparse coordinate -> strength map. Strengths live in [0, 1]; entries that
//! weaken below the prune threshold are removed.

use std::collections::BTreeMap;

use super::grid::GridPos;

/// An agent's learned spatial memory
///
/// Backed by a `BTreeMap`, so enumeration is in ascending coordinate order.
/// Territory sampling and inheritance tie-breaks both depend on that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pathways {
    entries: BTreeMap<GridPos, f64>,
}

impl Pathways {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strength at a coordinate (0 if absent)
    pub fn strength(&self, pos: GridPos) -> f64 {
        self.entries.get(&pos).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, f64)> + '_ {
        self.entries.iter().map(|(pos, s)| (*pos, *s))
    }

    /// Set a strength directly, clamped to [0, 1]
    pub fn insert(&mut self, pos: GridPos, strength: f64) {
        self.entries.insert(pos, strength.clamp(0.0, 1.0));
    }

    /// Strengthen one coordinate, capped at 1
    pub fn reinforce(&mut self, pos: GridPos, amount: f64) {
        let entry = self.entries.entry(pos).or_insert(0.0);
        *entry = (*entry + amount).min(1.0);
    }

    /// Strengthen every coordinate in `history`
    pub fn reinforce_all<'a>(&mut self, history: impl IntoIterator<Item = &'a GridPos>, amount: f64) {
        for pos in history {
            self.reinforce(*pos, amount);
        }
    }

    /// Weaken one coordinate, pruning it if it drops below `prune_threshold`
    pub fn weaken(&mut self, pos: GridPos, amount: f64, prune_threshold: f64) {
        let weakened = self.strength(pos) - amount;
        if weakened < prune_threshold {
            self.entries.remove(&pos);
        } else {
            self.entries.insert(pos, weakened);
        }
    }

    /// Mean of `1 / (1 + distance(target, p))` over the first `sample`
    /// entries. Zero when there are no pathways.
    pub fn territory_density(&self, target: GridPos, sample: usize) -> f64 {
        let taken = self.entries.len().min(sample);
        if taken == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .entries
            .keys()
            .take(taken)
            .map(|pos| 1.0 / (1.0 + target.distance(*pos)))
            .sum();
        sum / taken as f64
    }

    /// The strongest half (at least one entry) scaled by `factor`
    ///
    /// Sorting is stable over coordinate order, so equal strengths keep the
    /// lower coordinate first.
    pub fn inherit(&self, factor: f64) -> Pathways {
        if self.entries.is_empty() {
            return Pathways::new();
        }
        let mut ranked: Vec<(GridPos, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let keep = (ranked.len() / 2).max(1);
        let entries = ranked
            .into_iter()
            .take(keep)
            .map(|(pos, strength)| (pos, strength * factor))
            .collect();
        Pathways { entries }
    }
}
