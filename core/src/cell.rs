use serde::{Deserialize, Serialize};

/// What the player has done to a cell. Revealed and flagged can never hold at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) neighbor_mines: u8,
    pub(crate) cover: Cover,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.cover, Cover::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.cover, Cover::Hidden)
    }

    /// Adjacent mine count, only meaningful for non-mine cells once mines are placed.
    pub const fn neighbor_mines(&self) -> u8 {
        self.neighbor_mines
    }

    pub const fn cover(&self) -> Cover {
        self.cover
    }
}

/// Render-level state of a cell, including what gets disclosed after the game ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine shown after a loss.
    Mine,
    /// The mine that ended the game.
    TriggeredMine,
    /// Flag on a safe cell, shown after a loss.
    Misflagged,
}

impl CellView {
    // whether the cell still looks closed
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden | Flagged | Misflagged => true,
            Revealed(_) | Mine | TriggeredMine => false,
        }
    }
}
