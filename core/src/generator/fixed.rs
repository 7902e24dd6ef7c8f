use alloc::vec::Vec;

use super::*;

/// Places a predetermined set of mines, for replays and scripted scenarios.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLayout {
    mines: Vec<Pos>,
}

impl FixedLayout {
    pub fn new(mines: impl IntoIterator<Item = Pos>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedLayout {
    fn generate(&mut self, config: GameConfig, _safe: Pos) -> Result<MineLayout> {
        MineLayout::from_positions(config, &self.mines).map_err(|_| GameError::InvalidLayout)
    }
}
