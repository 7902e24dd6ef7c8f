use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid of cells. It owns every cell, and outside code only gets shared references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines: CellCount,
    revealed: CellCount,
}

impl Board {
    /// All cells hidden, unflagged and mine-free.
    pub fn new(config: GameConfig) -> Self {
        Self {
            cells: Array2::default([usize::from(config.rows), usize::from(config.cols)]),
            mines: 0,
            revealed: 0,
        }
    }

    pub fn size(&self) -> (Coord, Coord) {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        let (rows, cols) = self.size();
        pos.row < rows && pos.col < cols
    }

    pub fn validate(&self, pos: Pos) -> Result<Pos> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.cells.get(pos.to_nd_index())
    }

    pub fn neighbors(&self, pos: Pos) -> Neighbors {
        Neighbors::new(pos, self.size())
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (rows, cols) = self.size();
        positions(rows, cols)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    /// Number of mines placed so far, zero until the board is armed.
    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed
    }

    /// Safe cells the player still has to reveal.
    pub fn hidden_safe_count(&self) -> CellCount {
        self.total_cells() - self.mines - self.revealed
    }

    pub fn is_armed(&self) -> bool {
        self.mines > 0
    }

    /// Lays the mines from `layout` and fixes the neighbor count of every safe cell.
    pub(crate) fn arm(&mut self, layout: &MineLayout) {
        for pos in self.positions() {
            self.cells[pos.to_nd_index()].mine = layout[pos];
        }
        self.mines = layout.count();

        for pos in self.positions() {
            if self[pos].mine {
                continue;
            }
            let count = self.count_neighbor_mines(pos);
            self.cells[pos.to_nd_index()].neighbor_mines = count;
        }
    }

    fn count_neighbor_mines(&self, pos: Pos) -> u8 {
        self.neighbors(pos).filter(|&n| self[n].mine).count() as u8
    }

    /// Flips a hidden cell to flagged or back. Revealed cells are left alone.
    pub(crate) fn toggle_flag(&mut self, pos: Pos) -> Option<Cover> {
        let cell = &mut self.cells[pos.to_nd_index()];
        cell.cover = match cell.cover {
            Cover::Hidden => Cover::Flagged,
            Cover::Flagged => Cover::Hidden,
            Cover::Revealed => return None,
        };
        Some(cell.cover)
    }

    pub(crate) fn flag(&mut self, pos: Pos) {
        self.cells[pos.to_nd_index()].cover = Cover::Flagged;
    }

    /// Reveals `start` and, through zero cells, everything reachable without crossing a flag.
    ///
    /// Works off a queue instead of recursion, so depth never grows with the board. A cell is only queued while
    /// hidden and only revealed once, so each call touches a cell at most once. Returns the newly revealed cells
    /// in reveal order; mines are never opened here.
    pub(crate) fn flood_reveal(&mut self, start: Pos) -> Vec<Pos> {
        let mut opened = Vec::new();
        let mut frontier = VecDeque::from([start]);

        while let Some(pos) = frontier.pop_front() {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.mine || !matches!(cell.cover, Cover::Hidden) {
                continue;
            }

            cell.cover = Cover::Revealed;
            let count = cell.neighbor_mines;
            self.revealed += 1;
            opened.push(pos);
            log::trace!("Revealed {} with {} adjacent mines", pos, count);

            if count == 0 {
                frontier.extend(self.neighbors(pos).filter(|&n| self[n].is_hidden()));
            }
        }

        opened
    }
}

impl Index<Pos> for Board {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec;

    fn armed(config: GameConfig, mines: &[Pos]) -> Board {
        let layout = MineLayout::from_positions(config, mines).unwrap();
        let mut board = Board::new(config);
        board.arm(&layout);
        board
    }

    #[test]
    fn fresh_board_is_blank() {
        for difficulty in Difficulty::ALL {
            let board = Board::new(difficulty.config());
            assert_eq!(board.size(), difficulty.config().size());
            assert!(board.positions().all(|pos| {
                let cell = board[pos];
                cell.is_hidden() && !cell.is_flagged() && !cell.is_mine()
            }));
            assert!(!board.is_armed());
        }
    }

    #[test]
    fn neighbor_counts_match_brute_force() {
        let config = Difficulty::Hard.config();
        let layout = RejectionSampler::new(99)
            .generate(config, Pos::new(8, 15))
            .unwrap();
        let mut board = Board::new(config);
        board.arm(&layout);

        for pos in board.positions() {
            if board[pos].is_mine() {
                continue;
            }
            let mut expected = 0;
            for dr in -1i16..=1 {
                for dc in -1i16..=1 {
                    let (r, c) = (pos.row as i16 + dr, pos.col as i16 + dc);
                    if (dr, dc) == (0, 0) || r < 0 || c < 0 || r >= 16 || c >= 30 {
                        continue;
                    }
                    if layout[Pos::new(r as Coord, c as Coord)] {
                        expected += 1;
                    }
                }
            }
            assert_eq!(board[pos].neighbor_mines(), expected, "at {pos}");
        }
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // mine in the bottom-right corner of a 4x4 board
        let config = GameConfig::new(4, 4, 1).unwrap();
        let mut board = armed(config, &[Pos::new(3, 3)]);

        let opened = board.flood_reveal(Pos::new(0, 0));

        assert_eq!(opened.len(), 15);
        assert_eq!(board.hidden_safe_count(), 0);
        assert!(board[Pos::new(3, 3)].is_hidden());
        assert_eq!(board[Pos::new(2, 2)].neighbor_mines(), 1);
    }

    #[test]
    fn flood_fill_reveals_exactly_region_and_border() {
        // column of mines at col 2 splits the board; left side is a zero region bordered by col 1
        let config = GameConfig::new(5, 5, 5).unwrap();
        let wall: Vec<_> = (0..5).map(|row| Pos::new(row, 2)).collect();
        let mut board = armed(config, &wall);

        let opened: BTreeSet<_> = board.flood_reveal(Pos::new(2, 0)).into_iter().collect();

        let expected: BTreeSet<_> = (0..5)
            .flat_map(|row| [Pos::new(row, 0), Pos::new(row, 1)])
            .collect();
        assert_eq!(opened, expected);
        for row in 0..5 {
            assert!(board[Pos::new(row, 3)].is_hidden());
            assert!(board[Pos::new(row, 4)].is_hidden());
        }
    }

    #[test]
    fn flood_fill_never_crosses_flags() {
        let config = GameConfig::new(3, 5, 1).unwrap();
        let mut board = armed(config, &[Pos::new(0, 4)]);
        for row in 0..3 {
            board.flag(Pos::new(row, 2));
        }

        let opened = board.flood_reveal(Pos::new(1, 0));

        assert_eq!(opened.len(), 6);
        assert!(board[Pos::new(1, 3)].is_hidden());
        assert!(board[Pos::new(1, 2)].is_flagged());
    }

    #[test]
    fn numbered_cell_reveals_alone() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut board = armed(config, &[Pos::new(0, 0)]);

        assert_eq!(board.flood_reveal(Pos::new(1, 1)), vec![Pos::new(1, 1)]);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn revealing_twice_is_a_no_op() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut board = armed(config, &[Pos::new(0, 0)]);

        board.flood_reveal(Pos::new(2, 2));
        let before = board.clone();
        assert!(board.flood_reveal(Pos::new(2, 2)).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn toggle_flag_skips_revealed_cells() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut board = armed(config, &[Pos::new(0, 0)]);
        board.flood_reveal(Pos::new(2, 2));

        assert_eq!(board.toggle_flag(Pos::new(2, 2)), None);
        assert_eq!(board.toggle_flag(Pos::new(0, 0)), Some(Cover::Flagged));
        assert_eq!(board.toggle_flag(Pos::new(0, 0)), Some(Cover::Hidden));
    }
}
