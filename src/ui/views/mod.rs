mod board_view;

pub use board_view::{BoardView, SURFACE_ID};
