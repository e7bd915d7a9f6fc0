//! Theme constants and colors for the chessboard window.

use crate::config::Palette;

// Layout constants
pub const PIECE_PADDING: f32 = 0.05; // per side, relative to the cell size
pub const WINDOW_MARGIN: f32 = 20.0;

// Original rendered pattern: (0, 0) is black.
pub const EVEN_SQUARE: u32 = 0x000000;
pub const ODD_SQUARE: u32 = 0xF8F8F8;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;

/// Get the color for a board square based on its position
pub fn square_color(row: usize, col: usize, palette: &Palette) -> u32 {
    if (row + col) % 2 == 0 {
        palette.even_square
    } else {
        palette.odd_square
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_color_follows_parity() {
        let palette = Palette::default();
        for row in 0..8 {
            for col in 0..8 {
                let expected = if (row + col) % 2 == 0 {
                    palette.even_square
                } else {
                    palette.odd_square
                };
                assert_eq!(square_color(row, col, &palette), expected);
            }
        }
    }

    #[test]
    fn test_top_left_square_is_black() {
        assert_eq!(square_color(0, 0, &Palette::default()), 0x000000);
        assert_eq!(square_color(0, 1, &Palette::default()), 0xF8F8F8);
        assert_eq!(square_color(7, 7, &Palette::default()), 0x000000);
    }
}
