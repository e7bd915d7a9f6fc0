//! Full-board repaint.

use crate::config::Palette;
use crate::domain::{BOARD_SIZE, BoardMatrix};
use crate::ui::assets::AssetMap;
use crate::ui::board_layout::BoardLayout;
use crate::ui::surface::Surface;
use crate::ui::theme::square_color;

/// Clear `surface` and paint all 64 squares, then every piece whose sprite
/// is loaded. Pieces without a sprite leave only the square color.
pub fn paint_board(
    matrix: &BoardMatrix,
    assets: &AssetMap,
    palette: &Palette,
    surface: &mut impl Surface,
) {
    let (width, height) = surface.size();
    let layout = BoardLayout::new(width, height);

    surface.clear();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            surface.fill_rect(layout.cell_rect(row, col), square_color(row, col, palette));

            if let Some(sprite) = matrix.get(row, col).and_then(|piece| assets.get(&piece)) {
                surface.draw_sprite(layout.piece_rect(row, col), sprite);
            }
        }
    }
}
