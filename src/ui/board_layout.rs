//! Board layout calculations - handles sizing and coordinate transformations.

use crate::domain::BOARD_SIZE;
use crate::ui::theme::PIECE_PADDING;

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Handles all layout calculations for the chess board
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    pub width: f32,
    pub height: f32,
}

impl BoardLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn cell_width(&self) -> f32 {
        self.width / BOARD_SIZE as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.height / BOARD_SIZE as f32
    }

    /// Rectangle covered by the cell at row/col
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let (w, h) = (self.cell_width(), self.cell_height());
        Rect::new(col as f32 * w, row as f32 * h, w, h)
    }

    /// Sprite rectangle: the cell inset by `PIECE_PADDING` on each side
    pub fn piece_rect(&self, row: usize, col: usize) -> Rect {
        let cell = self.cell_rect(row, col);
        let pad_x = cell.width * PIECE_PADDING;
        let pad_y = cell.height * PIECE_PADDING;
        Rect::new(
            cell.x + pad_x,
            cell.y + pad_y,
            cell.width - pad_x * 2.0,
            cell.height - pad_y * 2.0,
        )
    }

    /// Convert surface-local position to `(row, col)`.
    ///
    /// Not clamped: positions left of or above the surface give negative
    /// indices, positions past the far edge give indices of 8 or more.
    pub fn cell_at(&self, x: f32, y: f32) -> (i32, i32) {
        let col = (x / self.cell_width()).floor() as i32;
        let row = (y / self.cell_height()).floor() as i32;
        (row, col)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(480.0, 480.0)
    }
}
