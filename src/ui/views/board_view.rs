//! Board view - hosts the drawing surface and forwards clicks to the model.

use gpui::{
    Bounds, Context, Entity, MouseButton, MouseDownEvent, Pixels, Subscription, Window, canvas,
    div, prelude::*, px, rgb,
};

use crate::models::BoardModel;
use crate::ui::board_layout::Rect;
use crate::ui::render::paint_board;
use crate::ui::surface::WindowSurface;
use crate::ui::theme::PANEL_BG;

/// Element id of the drawing surface
pub const SURFACE_ID: &str = "chessboard-surface";

fn to_rect(bounds: Bounds<Pixels>) -> Rect {
    Rect::new(
        bounds.origin.x.into(),
        bounds.origin.y.into(),
        bounds.size.width.into(),
        bounds.size.height.into(),
    )
}

/// The board view that observes a BoardModel
pub struct BoardView {
    model: Entity<BoardModel>,
    _subscription: Subscription,
}

impl BoardView {
    pub fn new(model: Entity<BoardModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            _subscription,
        }
    }
}

impl Render for BoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model_measure = self.model.clone();
        let model_paint = self.model.clone();
        let model_click = self.model.clone();

        let surface = self.model.read(cx).surface();

        // Measure the surface in prepaint, repaint the whole board in paint.
        // Nothing is drawn until every image load has settled.
        let board_canvas = canvas(
            move |bounds, _window, cx| {
                model_measure.update(cx, |board, _| board.set_surface(to_rect(bounds)));
            },
            move |bounds, (), window, cx| {
                let board = model_paint.read(cx);
                if board.assets_ready() {
                    let mut surface = WindowSurface::new(window, bounds);
                    paint_board(board.matrix(), board.assets(), board.palette(), &mut surface);
                }
            },
        )
        .size_full();

        let board_surface = div()
            .id(SURFACE_ID)
            .flex_shrink_0()
            .w(px(surface.width))
            .h(px(surface.height))
            .child(board_canvas)
            .on_mouse_down(MouseButton::Left, move |ev: &MouseDownEvent, _window, cx| {
                let pos = ev.position;
                model_click.read(cx).click(pos.x.into(), pos.y.into());
            });

        div()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgb(PANEL_BG))
            .child(board_surface)
    }
}
