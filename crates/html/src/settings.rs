//! Converter settings loaded from the optional helper file.
//!
//! The helper lives at a known relative location; when it is missing or
//! unparseable the caller falls back to the no-op converter. Every field
//! has a default so a partial file still resolves.

use deck_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Layout parameters for the HTML converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Font size for heading blocks, in points.
    pub title_font_size: f64,

    /// Font size for body blocks, in points.
    pub body_font_size: f64,

    /// Page margin on all sides, in inches.
    pub margin_in: f64,

    /// Height reserved for a heading block, in inches.
    pub title_height_in: f64,

    /// Height reserved for a body block, in inches.
    pub line_height_in: f64,

    /// Vertical gap between consecutive blocks, in inches.
    pub block_gap_in: f64,

    /// Upper bound on blocks placed per slide.
    pub max_blocks_per_slide: usize,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            title_font_size: 32.0,
            body_font_size: 18.0,
            margin_in: 0.5,
            title_height_in: 1.0,
            line_height_in: 0.5,
            block_gap_in: 0.1,
            max_blocks_per_slide: 12,
        }
    }
}

impl ConverterSettings {
    /// Load settings from the helper file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::HelperUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::HelperUnavailable(format!("cannot parse {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ConverterSettings::default();
        assert_eq!(settings.title_font_size, 32.0);
        assert_eq!(settings.max_blocks_per_slide, 12);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html2pptx.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"title_font_size": 40.0}}"#).unwrap();

        let settings = ConverterSettings::load(&path).unwrap();
        assert_eq!(settings.title_font_size, 40.0);
        assert_eq!(settings.body_font_size, 18.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConverterSettings::load(Path::new("/nonexistent/html2pptx.json")).unwrap_err();
        assert!(matches!(err, Error::HelperUnavailable(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html2pptx.json");
        fs::write(&path, "not json").unwrap();

        let err = ConverterSettings::load(&path).unwrap_err();
        assert!(matches!(err, Error::HelperUnavailable(_)));
    }
}
