//! Drawing surfaces the board can be painted onto.

use gpui::{Bounds, Corners, Hsla, Pixels, Window, fill, point, px, rgb, size};
use image::{Pixel, Rgba, RgbaImage};

use crate::ui::assets::Sprite;
use crate::ui::board_layout::Rect;
use crate::ui::theme::PANEL_BG;

/// Anything that can be cleared, filled and have sprites drawn on it.
pub trait Surface {
    /// Width and height in surface pixels
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    /// Fill `rect` with a 0xRRGGBB color
    fn fill_rect(&mut self, rect: Rect, color: u32);
    /// Draw `sprite` scaled into `rect`
    fn draw_sprite(&mut self, rect: Rect, sprite: &Sprite);
}

/// Software surface backed by a 0xRRGGBB pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    #[allow(dead_code)] // Used in tests
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Opaque RGBA copy, for writing snapshots to disk
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let [_, r, g, b] = self.pixel(x as usize, y as usize).to_be_bytes();
            Rgba([r, g, b, 0xFF])
        })
    }

    /// Pixel span covered by `rect`, clipped to the buffer
    fn span(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let clip = |v: f32, max: usize| (v.round().max(0.0) as usize).min(max);
        (
            clip(rect.x, self.width),
            clip(rect.y, self.height),
            clip(rect.x + rect.width, self.width),
            clip(rect.y + rect.height, self.height),
        )
    }
}

impl Surface for Framebuffer {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        for y in y0..y1 {
            self.pixels[y * self.width + x0..y * self.width + x1].fill(color);
        }
    }

    fn draw_sprite(&mut self, rect: Rect, sprite: &Sprite) {
        let src = sprite.pixels();
        let (x0, y0, x1, y1) = self.span(rect);
        if x1 <= x0 || y1 <= y0 || src.width() == 0 || src.height() == 0 {
            return;
        }
        let (dw, dh) = ((x1 - x0) as f32, (y1 - y0) as f32);

        // nearest neighbour, source-over alpha
        for y in y0..y1 {
            let sy = (((y - y0) as f32 + 0.5) * src.height() as f32 / dh) as u32;
            for x in x0..x1 {
                let sx = (((x - x0) as f32 + 0.5) * src.width() as f32 / dw) as u32;
                let [r, g, b, a] = src
                    .get_pixel(sx.min(src.width() - 1), sy.min(src.height() - 1))
                    .to_rgba()
                    .0;
                let dst = &mut self.pixels[y * self.width + x];
                *dst = blend(*dst, [r, g, b], a);
            }
        }
    }
}

fn blend(dst: u32, src: [u8; 3], alpha: u8) -> u32 {
    let alpha = alpha as u32;
    let channel = |shift: u32, s: u8| {
        let d = (dst >> shift) & 0xFF;
        (s as u32 * alpha + d * (255 - alpha) + 127) / 255
    };
    (channel(16, src[0]) << 16) | (channel(8, src[1]) << 8) | channel(0, src[2])
}

/// Paints into a window region, in the bounds of a canvas element.
pub struct WindowSurface<'a> {
    window: &'a mut Window,
    bounds: Bounds<Pixels>,
}

impl<'a> WindowSurface<'a> {
    pub fn new(window: &'a mut Window, bounds: Bounds<Pixels>) -> Self {
        Self { window, bounds }
    }

    fn to_window(&self, rect: Rect) -> Bounds<Pixels> {
        Bounds {
            origin: point(
                self.bounds.origin.x + px(rect.x),
                self.bounds.origin.y + px(rect.y),
            ),
            size: size(px(rect.width), px(rect.height)),
        }
    }
}

impl Surface for WindowSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (
            self.bounds.size.width.into(),
            self.bounds.size.height.into(),
        )
    }

    fn clear(&mut self) {
        self.window
            .paint_quad(fill(self.bounds, Hsla::from(rgb(PANEL_BG))));
    }

    fn fill_rect(&mut self, rect: Rect, color: u32) {
        let bounds = self.to_window(rect);
        self.window.paint_quad(fill(bounds, Hsla::from(rgb(color))));
    }

    fn draw_sprite(&mut self, rect: Rect, sprite: &Sprite) {
        let bounds = self.to_window(rect);
        if let Err(err) =
            self.window
                .paint_image(bounds, Corners::default(), sprite.render_image(), 0, false)
        {
            log::warn!("failed to paint sprite: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::assets::tests::solid_sprite;

    #[test]
    fn test_fill_rect_clips_to_buffer() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(Rect::new(2.0, 2.0, 10.0, 10.0), 0x123456);
        assert_eq!(fb.pixel(1, 1), 0);
        assert_eq!(fb.pixel(2, 2), 0x123456);
        assert_eq!(fb.pixel(3, 3), 0x123456);
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), 0xFFFFFF);
        fb.clear();
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_opaque_sprite_covers_rect() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_sprite(Rect::new(2.0, 2.0, 4.0, 4.0), &solid_sprite(2, [255, 0, 0, 255]));
        assert_eq!(fb.pixel(2, 2), 0xFF0000);
        assert_eq!(fb.pixel(5, 5), 0xFF0000);
        assert_eq!(fb.pixel(1, 2), 0);
        assert_eq!(fb.pixel(6, 5), 0);
    }

    #[test]
    fn test_transparent_sprite_keeps_background() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 0x00FF00);
        fb.draw_sprite(Rect::new(0.0, 0.0, 4.0, 4.0), &solid_sprite(1, [255, 0, 0, 0]));
        assert!(fb.pixels().iter().all(|&p| p == 0x00FF00));
    }

    #[test]
    fn test_to_image_unpacks_channels() {
        let mut fb = Framebuffer::new(2, 1);
        fb.fill_rect(Rect::new(1.0, 0.0, 1.0, 1.0), 0x102030);
        let image = fb.to_image();
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([0x10, 0x20, 0x30, 255]));
    }

    #[test]
    fn test_blend_half_alpha() {
        assert_eq!(blend(0x000000, [255, 255, 255], 128), 0x808080);
    }
}
