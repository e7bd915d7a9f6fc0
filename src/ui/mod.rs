pub mod assets;
pub mod board_layout;
pub mod render;
pub mod surface;
pub mod theme;
pub mod views;

pub use assets::FileAssets;
