//! Piece sprites: filesystem lookup, decoding and concurrent loading.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use gpui::{AssetSource, RenderImage, SharedString};
use image::{Frame, RgbaImage};

use crate::domain::Piece;

/// Filesystem-based asset source that looks for assets in multiple locations
#[derive(Clone, Debug)]
pub struct FileAssets {
    base_path: PathBuf,
}

impl FileAssets {
    pub fn new() -> Self {
        let base_path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        Self { base_path }
    }

    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let mut paths = vec![self.base_path.join(path), PathBuf::from(path)];
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(path));
        }
        paths
    }
}

impl Default for FileAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        for p in &self.candidates(path) {
            if let Ok(data) = fs::read(p) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let dir_path = self.base_path.join(path);
        let mut results = Vec::new();

        if let Ok(entries) = fs::read_dir(&dir_path) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    results.push(SharedString::from(name.to_string()));
                }
            }
        }
        Ok(results)
    }
}

/// A decoded piece image.
///
/// Keeps the RGBA pixels for software surfaces and a BGRA copy that the
/// GPU surface can paint directly.
#[derive(Clone)]
pub struct Sprite {
    pixels: Arc<RgbaImage>,
    render_image: Arc<RenderImage>,
}

impl Sprite {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        // gpui expects BGRA
        let mut bgra = pixels.clone();
        for pixel in bgra.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
        let render_image = RenderImage::new(vec![Frame::new(bgra)]);
        Self {
            pixels: Arc::new(pixels),
            render_image: Arc::new(render_image),
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).context("failed to decode image")?;
        Ok(Self::from_rgba(image.into_rgba8()))
    }

    /// Resolve `path` through `assets`, then decode it.
    pub fn load(assets: &FileAssets, path: &str) -> Result<Self> {
        let bytes = assets
            .load(path)?
            .with_context(|| format!("image not found: {path}"))?;
        Self::decode(&bytes)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn render_image(&self) -> Arc<RenderImage> {
        self.render_image.clone()
    }
}

impl std::fmt::Debug for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sprite")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

pub type AssetMap = HashMap<Piece, Sprite>;

/// Result of loading every requested sprite.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub assets: AssetMap,
    pub failed: Vec<(Piece, String)>,
}

impl LoadOutcome {
    pub fn total(&self) -> usize {
        self.assets.len() + self.failed.len()
    }
}

/// Issue every load at once and wait until each one has either succeeded or
/// failed. A failure is logged and counted; it never cancels the others.
pub async fn load_assets<F, Fut>(requests: Vec<(Piece, String)>, mut load: F) -> LoadOutcome
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Sprite>>,
{
    let pending = requests.into_iter().map(|(piece, path)| {
        let task = load(path.clone());
        async move { (piece, path, task.await) }
    });

    let mut outcome = LoadOutcome::default();
    for (piece, path, result) in join_all(pending).await {
        match result {
            Ok(sprite) => {
                outcome.assets.insert(piece, sprite);
            }
            Err(err) => {
                log::error!("failed to load image {path} for {piece}: {err:#}");
                outcome.failed.push((piece, path));
            }
        }
    }

    log::info!(
        "loaded {}/{} piece images",
        outcome.assets.len(),
        outcome.total()
    );
    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::anyhow;
    use futures::executor::block_on;
    use image::{ImageFormat, Rgba};
    use std::cell::RefCell;
    use std::io::Cursor;

    pub(crate) fn solid_sprite(size: u32, color: [u8; 4]) -> Sprite {
        Sprite::from_rgba(RgbaImage::from_pixel(size, size, Rgba(color)))
    }

    fn png_bytes() -> Vec<u8> {
        let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn all_requests() -> Vec<(Piece, String)> {
        Piece::ALL
            .iter()
            .map(|p| (*p, p.default_asset_path().to_string()))
            .collect()
    }

    #[test]
    fn test_decode_png() {
        let sprite = Sprite::decode(&png_bytes()).unwrap();
        assert_eq!(sprite.pixels().dimensions(), (3, 2));
        assert_eq!(sprite.pixels().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(Sprite::decode(b"not an image").is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Sprite::load(&FileAssets::new(), "no/such/piece.png").unwrap_err();
        assert!(err.to_string().contains("image not found"));
    }

    #[test_log::test]
    fn test_all_loads_succeed() {
        let outcome = block_on(load_assets(all_requests(), |_| async {
            Ok::<_, anyhow::Error>(solid_sprite(4, [255, 0, 0, 255]))
        }));
        assert_eq!(outcome.assets.len(), 12);
        assert!(outcome.failed.is_empty());
    }

    #[test_log::test]
    fn test_partial_failure_settles_everything() {
        let outcome = block_on(load_assets(all_requests(), |path| async move {
            if path.contains("branc") {
                Ok(solid_sprite(4, [255, 255, 255, 255]))
            } else {
                Err(anyhow!("broken"))
            }
        }));
        assert_eq!(outcome.total(), 12);
        assert_eq!(outcome.assets.len(), 6);
        assert_eq!(outcome.failed.len(), 6);
        assert!(
            outcome
                .failed
                .iter()
                .all(|(piece, _)| piece.code().starts_with('b'))
        );
    }

    #[test_log::test]
    fn test_total_failure_still_completes() {
        let outcome = block_on(load_assets(all_requests(), |_| async {
            Err::<Sprite, _>(anyhow!("offline"))
        }));
        assert!(outcome.assets.is_empty());
        assert_eq!(outcome.failed.len(), 12);
    }

    #[test]
    fn test_each_path_is_requested_once() {
        let seen = RefCell::new(Vec::new());
        block_on(load_assets(all_requests(), |path| {
            seen.borrow_mut().push(path);
            async { Err::<Sprite, _>(anyhow!("skip")) }
        }));
        let mut seen = seen.into_inner();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_no_requests_resolves_immediately() {
        let outcome = block_on(load_assets(Vec::new(), |_| async {
            Ok::<_, anyhow::Error>(solid_sprite(1, [0, 0, 0, 0]))
        }));
        assert_eq!(outcome.total(), 0);
    }
}
