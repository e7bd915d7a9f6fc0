//! Startup configuration, read from an optional JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::Piece;
use crate::ui::theme::{EVEN_SQUARE, ODD_SQUARE};

/// Square colors as 0xRRGGBB, keyed by checkerboard parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Color of squares where `(row + col) % 2 == 0`
    pub even_square: u32,
    /// Color of squares where `(row + col) % 2 == 1`
    pub odd_square: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            even_square: EVEN_SQUARE,
            odd_square: ODD_SQUARE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Drawing surface width in logical pixels
    pub surface_width: f32,
    /// Drawing surface height in logical pixels
    pub surface_height: f32,
    pub palette: Palette,
    /// Piece code (`wp`, `bk`, ...) to image path
    pub pieces: BTreeMap<String, String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            surface_width: 480.0,
            surface_height: 480.0,
            palette: Palette::default(),
            pieces: Piece::ALL
                .iter()
                .map(|piece| (piece.code(), piece.default_asset_path().to_string()))
                .collect(),
        }
    }
}

impl BoardConfig {
    /// Load from `path`, or fall back to the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.surface_width > 0.0 && self.surface_height > 0.0,
            "surface size must be positive, got {}x{}",
            self.surface_width,
            self.surface_height
        );
        self.asset_requests().map(|_| ())
    }

    /// One `(piece, path)` load request per configured piece.
    pub fn asset_requests(&self) -> Result<Vec<(Piece, String)>> {
        self.pieces
            .iter()
            .map(|(code, path)| match Piece::from_code(code) {
                Some(piece) => Ok((piece, path.clone())),
                None => bail!("unknown piece code {code:?}"),
            })
            .collect()
    }
}

/// JSON Schema of the config file, pretty printed.
pub fn schema_json() -> Result<String> {
    let schema = schemars::schema_for!(BoardConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_piece() {
        let requests = BoardConfig::default().asset_requests().unwrap();
        assert_eq!(requests.len(), 12);
        for piece in Piece::ALL {
            assert!(requests.iter().any(|(p, _)| *p == piece));
        }
        let config = BoardConfig::default();
        assert_eq!(config.pieces["wr"], "img/torrebranca.png");
        assert_eq!(config.pieces["bb"], "img/bisporeto.png");
        assert_eq!(config.pieces["bk"], "img/reipreto.png");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(BoardConfig::from_json("{}").unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = BoardConfig::from_json(
            r#"{ "surface_width": 640, "palette": { "odd_square": 255 }, "pieces": { "wp": "img/pawn.png" } }"#,
        )
        .unwrap();
        assert_eq!(config.surface_width, 640.0);
        assert_eq!(config.surface_height, 480.0);
        assert_eq!(config.palette.even_square, EVEN_SQUARE);
        assert_eq!(config.palette.odd_square, 255);
        let requests = config.asset_requests().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.code(), "wp");
        assert_eq!(requests[0].1, "img/pawn.png");
    }

    #[test]
    fn test_rejects_unknown_piece_code() {
        let err = BoardConfig::from_json(r#"{ "pieces": { "zz": "x.png" } }"#).unwrap_err();
        assert!(err.to_string().contains("zz"));
    }

    #[test]
    fn test_rejects_bad_surface_size() {
        assert!(BoardConfig::from_json(r#"{ "surface_height": 0 }"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(BoardConfig::from_json(r#"{ "board_size": 10 }"#).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/chessboard.json");
        let err = BoardConfig::load(Some(path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = schema_json().unwrap();
        assert!(schema.contains("surface_width"));
        assert!(schema.contains("even_square"));
    }
}
