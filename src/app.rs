//! Application setup and window creation.

use std::path::Path;

use anyhow::{Context as _, Result};
use futures::executor::{ThreadPool, block_on};
use futures::task::SpawnExt;
use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::config::BoardConfig;
use crate::domain::{BoardMatrix, Piece};
use crate::models::BoardModel;
use crate::ui::assets::{FileAssets, Sprite, load_assets};
use crate::ui::render::paint_board;
use crate::ui::surface::Framebuffer;
use crate::ui::theme::WINDOW_MARGIN;
use crate::ui::views::BoardView;

/// Initialize and run the chessboard application
pub fn run(cx: &mut App, config: BoardConfig, requests: Vec<(Piece, String)>) {
    gpui_component::init(cx);

    // Create the board model and kick off image loading
    let model = cx.new(|cx| {
        let mut board = BoardModel::new(BoardMatrix::starting(), &config);
        board.start_loading(requests, cx);
        board
    });

    let window_size = size(
        px(config.surface_width + WINDOW_MARGIN * 2.0),
        px(config.surface_height + WINDOW_MARGIN * 2.0),
    );
    let bounds = Bounds::centered(None, window_size, cx);
    let opened = cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| BoardView::new(model, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    );
    if let Err(err) = opened {
        log::error!("failed to open window: {err:#}");
        cx.quit();
    }
}

/// Render the starting board without a window and write it to `out` as PNG.
/// Images are decoded concurrently on a thread pool. Missing piece images
/// are logged and left out, as in the window.
pub fn snapshot(config: &BoardConfig, requests: Vec<(Piece, String)>, out: &Path) -> Result<()> {
    let source = FileAssets::new();
    let pool = ThreadPool::new().context("failed to start image loader threads")?;
    let outcome = block_on(load_assets(requests, |path| {
        let source = source.clone();
        let handle = pool.spawn_with_handle(async move { Sprite::load(&source, &path) });
        async move { Ok::<_, anyhow::Error>(handle?.await?) }
    }));

    let mut framebuffer = Framebuffer::new(
        config.surface_width.round() as usize,
        config.surface_height.round() as usize,
    );
    paint_board(
        &BoardMatrix::starting(),
        &outcome.assets,
        &config.palette,
        &mut framebuffer,
    );
    framebuffer
        .to_image()
        .save(out)
        .with_context(|| format!("failed to write snapshot {}", out.display()))?;
    log::info!("wrote snapshot to {}", out.display());
    Ok(())
}
