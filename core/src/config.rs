use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validates a custom board. At least one cell must remain safe for the first click.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= area(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked(9, 9, 10),
            Medium => GameConfig::new_unchecked(16, 16, 40),
            Hard => GameConfig::new_unchecked(16, 30, 99),
        }
    }

    pub const fn key(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.key() == key)
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_classic_boards() {
        assert_eq!(Difficulty::Easy.config(), GameConfig::new(9, 9, 10).unwrap());
        assert_eq!(Difficulty::Medium.config(), GameConfig::new(16, 16, 40).unwrap());
        assert_eq!(Difficulty::Hard.config(), GameConfig::new(16, 30, 99).unwrap());
        assert_eq!(Difficulty::Hard.config().safe_cells(), 480 - 99);
    }

    #[test]
    fn keys_parse_back() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.key().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(
            "extreme".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty)
        );
    }

    #[test]
    fn custom_config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(5, 5, 0), Err(GameError::NoMines));
        assert_eq!(GameConfig::new(5, 5, 25), Err(GameError::TooManyMines));
        assert!(GameConfig::new(5, 5, 24).is_ok());
    }

    #[test]
    fn difficulty_serializes_as_its_key() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(back, Difficulty::Hard);
    }
}
