use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use rejection::*;

mod fixed;
mod rejection;

/// Chooses where the mines go once the first clicked cell is known.
pub trait MineGenerator {
    /// Produces a layout for `config` that must leave `safe` mine-free.
    fn generate(&mut self, config: GameConfig, safe: Pos) -> Result<MineLayout>;
}

/// Mine mask produced by a generator, consumed once when the board is armed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mask: Array2<bool>,
    count: CellCount,
}

impl MineLayout {
    pub fn empty(config: GameConfig) -> Self {
        Self {
            mask: Array2::default([usize::from(config.rows), usize::from(config.cols)]),
            count: 0,
        }
    }

    pub fn from_positions(config: GameConfig, mines: &[Pos]) -> Result<Self> {
        let mut layout = Self::empty(config);
        for &pos in mines {
            if !config.contains(pos) {
                return Err(GameError::InvalidCoords);
            }
            layout.insert(pos);
        }
        Ok(layout)
    }

    /// Marks `pos` as a mine, returning whether it was newly added.
    pub(crate) fn insert(&mut self, pos: Pos) -> bool {
        let slot = &mut self.mask[pos.to_nd_index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.count += 1;
        true
    }

    pub fn count(&self) -> CellCount {
        self.count
    }

    pub fn size(&self) -> (Coord, Coord) {
        let (rows, cols) = self.mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self.mask
            .get(pos.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn mines(&self) -> impl Iterator<Item = Pos> + '_ {
        self.mask
            .indexed_iter()
            .filter(|&(_, &mine)| mine)
            .map(|((row, col), _)| Pos::new(row as Coord, col as Coord))
    }

    /// Checks the layout against the board it is about to arm.
    pub fn validate(&self, config: GameConfig, safe: Pos) -> Result<()> {
        if self.size() != config.size() || self.count != config.mines || self.contains_mine(safe) {
            return Err(GameError::InvalidLayout);
        }
        Ok(())
    }
}

impl Index<Pos> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mask[pos.to_nd_index()]
    }
}
