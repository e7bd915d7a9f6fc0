//! The 8x8 board matrix.

use shakmaty::{Chess, Position};

use super::chess::{Piece, shakmaty_to_piece, to_square};

pub const BOARD_SIZE: usize = 8;

/// Fixed 8x8 grid of cell contents, row 0 at the top (rank 8).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardMatrix {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardMatrix {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard starting position: black on rows 0-1, white on rows 6-7.
    pub fn starting() -> Self {
        let position = Chess::default();
        let mut matrix = Self::empty();
        for (row, cells) in matrix.cells.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = position
                    .board()
                    .piece_at(to_square(row, col))
                    .map(shakmaty_to_piece);
            }
        }
        matrix
    }

    /// Piece at row/col, `None` for an empty or out of range cell.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// All occupied cells as `(row, col, piece)`.
    #[allow(dead_code)] // Used in tests
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|piece| (row, col, piece)))
        })
    }
}

impl Default for BoardMatrix {
    fn default() -> Self {
        Self::starting()
    }
}
