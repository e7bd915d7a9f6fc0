//! Board state model - the owned state shared by the renderer and the
//! click handler.

use std::fmt;

use gpui::{AsyncApp, Context, Task, WeakEntity};

use crate::config::{BoardConfig, Palette};
use crate::domain::{BOARD_SIZE, BoardMatrix, Piece};
use crate::ui::assets::{AssetMap, FileAssets, LoadOutcome, Sprite, load_assets};
use crate::ui::board_layout::{BoardLayout, Rect};

/// What a click landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellReport {
    Empty { row: usize, col: usize },
    Occupied { row: usize, col: usize, piece: Piece },
    OutsideBoard { row: i32, col: i32 },
}

impl CellReport {
    #[allow(dead_code)] // Used in tests
    pub fn cell(&self) -> (i32, i32) {
        match *self {
            CellReport::Empty { row, col } | CellReport::Occupied { row, col, .. } => {
                (row as i32, col as i32)
            }
            CellReport::OutsideBoard { row, col } => (row, col),
        }
    }

    /// Lines written to the log when this cell is clicked
    pub fn log_lines(&self) -> Vec<String> {
        match self {
            CellReport::OutsideBoard { .. } => vec![self.to_string()],
            CellReport::Empty { row, col } | CellReport::Occupied { row, col, .. } => vec![
                format!("clicked cell: row {row}, col {col}"),
                self.to_string(),
            ],
        }
    }
}

impl fmt::Display for CellReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellReport::Empty { .. } => write!(f, "empty cell clicked"),
            CellReport::Occupied { piece, .. } => write!(f, "piece clicked: {piece}"),
            CellReport::OutsideBoard { row, col } => {
                write!(f, "click outside the board: row {row}, col {col}")
            }
        }
    }
}

pub struct BoardModel {
    matrix: BoardMatrix,
    palette: Palette,
    assets: AssetMap,
    /// Set once every load request has settled
    assets_ready: bool,
    /// Last measured surface bounds, in window coordinates
    surface: Rect,
    _load_task: Option<Task<()>>,
}

impl BoardModel {
    pub fn new(matrix: BoardMatrix, config: &BoardConfig) -> Self {
        Self {
            matrix,
            palette: config.palette,
            assets: AssetMap::new(),
            assets_ready: false,
            surface: Rect::new(0.0, 0.0, config.surface_width, config.surface_height),
            _load_task: None,
        }
    }

    pub fn matrix(&self) -> &BoardMatrix {
        &self.matrix
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn assets(&self) -> &AssetMap {
        &self.assets
    }

    pub fn assets_ready(&self) -> bool {
        self.assets_ready
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    /// Record where the surface was laid out this frame
    pub fn set_surface(&mut self, surface: Rect) {
        if self.surface != surface {
            log::debug!("surface bounds changed: {surface:?}");
            self.surface = surface;
        }
    }

    /// Start loading every sprite on the background executor. The view is
    /// notified once all of them have settled.
    pub fn start_loading(&mut self, requests: Vec<(Piece, String)>, cx: &mut Context<Self>) {
        let source = FileAssets::new();
        let executor = cx.background_executor().clone();

        let task = cx.spawn(async move |this: WeakEntity<BoardModel>, cx: &mut AsyncApp| {
            let outcome = load_assets(requests, |path| {
                let source = source.clone();
                executor.spawn(async move { Sprite::load(&source, &path) })
            })
            .await;

            let installed = this.update(cx, |board, cx| {
                board.install_assets(outcome);
                cx.notify();
            });
            if installed.is_err() {
                log::debug!("board dropped before images finished loading");
            }
        });
        self._load_task = Some(task);
    }

    pub fn install_assets(&mut self, outcome: LoadOutcome) {
        if !outcome.failed.is_empty() {
            log::warn!(
                "{} piece images missing, their squares will be drawn empty",
                outcome.failed.len()
            );
        }
        self.assets = outcome.assets;
        self.assets_ready = true;
    }

    /// Look up the cell at row/col without bounds assumptions
    pub fn inspect(&self, row: i32, col: i32) -> CellReport {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < BOARD_SIZE && c < BOARD_SIZE => match self.matrix.get(r, c) {
                Some(piece) => CellReport::Occupied { row: r, col: c, piece },
                None => CellReport::Empty { row: r, col: c },
            },
            _ => CellReport::OutsideBoard { row, col },
        }
    }

    /// Handle a pointer click at window coordinates: translate into the
    /// surface, map to a cell and log what is there.
    pub fn click(&self, client_x: f32, client_y: f32) -> CellReport {
        let layout = BoardLayout::new(self.surface.width, self.surface.height);
        let (row, col) = layout.cell_at(client_x - self.surface.x, client_y - self.surface.y);

        let report = self.inspect(row, col);
        let level = match report {
            CellReport::OutsideBoard { .. } => log::Level::Warn,
            _ => log::Level::Info,
        };
        for line in report.log_lines() {
            log::log!(level, "{line}");
        }
        report
    }
}
