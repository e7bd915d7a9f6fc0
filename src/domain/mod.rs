//! Pure chess domain layer. No GPUI dependencies.

mod board;
mod chess;

pub use board::{BOARD_SIZE, BoardMatrix};
pub use chess::{Piece, PieceColor, PieceKind};
