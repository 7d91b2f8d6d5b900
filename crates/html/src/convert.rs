//! The slide converter boundary and its two variants.
//!
//! The converter is selected once at startup: `HtmlConverter` when the
//! helper settings file resolves, `NoOpConverter` otherwise. Both are
//! invoked uniformly through the `SlideConverter` trait afterwards.

use crate::extract::{extract_fragments, FragmentKind};
use crate::settings::ConverterSettings;
use deck_core::{Result, TextBlock};
use std::fs;
use std::path::Path;

/// Console notice emitted when the stub converter is substituted.
pub const SIMPLIFIED_CONVERSION_NOTICE: &str = "Using simplified HTML conversion";

/// Result of one conversion call: the reported page dimensions plus the
/// text boxes extracted for the slide.
#[derive(Debug, Clone)]
pub struct ConvertedSlide {
    /// Reported page width in inches.
    pub width_in: f64,

    /// Reported page height in inches.
    pub height_in: f64,

    /// Extracted text boxes; empty for the no-op variant.
    pub blocks: Vec<TextBlock>,
}

/// Converts one HTML file into slide content.
pub trait SlideConverter {
    /// Convert the file at `html_path` for a page of the given size.
    fn convert(&self, html_path: &Path, width_in: f64, height_in: f64) -> Result<ConvertedSlide>;

    /// Short identifier for logging.
    fn name(&self) -> &'static str;
}

/// Real converter: reads the HTML file and lays extracted text out in a
/// simple vertical flow sized by the helper settings.
pub struct HtmlConverter {
    settings: ConverterSettings,
}

impl HtmlConverter {
    /// Create a converter with the given settings.
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }
}

impl SlideConverter for HtmlConverter {
    fn convert(&self, html_path: &Path, width_in: f64, height_in: f64) -> Result<ConvertedSlide> {
        let html = fs::read_to_string(html_path)?;
        let fragments = extract_fragments(&html);

        let s = &self.settings;
        let content_width = width_in - 2.0 * s.margin_in;
        let mut blocks = Vec::new();
        let mut y = s.margin_in;

        for fragment in fragments.iter().take(s.max_blocks_per_slide) {
            let (font_size, bold, block_height) = match fragment.kind {
                FragmentKind::Heading => (s.title_font_size, true, s.title_height_in),
                FragmentKind::Body => (s.body_font_size, false, s.line_height_in),
            };

            // Stop once the flow would run off the page.
            if y + block_height > height_in - s.margin_in {
                log::debug!(
                    "{}: content overflows page, dropping remaining blocks",
                    html_path.display()
                );
                break;
            }

            blocks.push(
                TextBlock::new(&fragment.text)
                    .with_frame(s.margin_in, y, content_width, block_height)
                    .with_font(font_size, bold),
            );
            y += block_height + s.block_gap_in;
        }

        Ok(ConvertedSlide {
            width_in,
            height_in,
            blocks,
        })
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

/// Stub converter: performs no reading and unconditionally reports success
/// with the requested dimensions and no content.
pub struct NoOpConverter;

impl SlideConverter for NoOpConverter {
    fn convert(&self, _html_path: &Path, width_in: f64, height_in: f64) -> Result<ConvertedSlide> {
        Ok(ConvertedSlide {
            width_in,
            height_in,
            blocks: Vec::new(),
        })
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// One-shot capability resolution for the conversion helper.
///
/// Attempts to load the helper settings from `helper_path`; on any failure
/// the stub is substituted and the run continues.
pub fn resolve_converter(helper_path: &Path) -> Box<dyn SlideConverter> {
    match ConverterSettings::load(helper_path) {
        Ok(settings) => {
            log::debug!("Loaded converter settings from {}", helper_path.display());
            Box::new(HtmlConverter::new(settings))
        }
        Err(e) => {
            log::debug!("Helper not resolved: {}", e);
            log::info!("{}", SIMPLIFIED_CONVERSION_NOTICE);
            Box::new(NoOpConverter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_slide(dir: &Path, name: &str, html: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, html).unwrap();
        path
    }

    #[test]
    fn test_noop_reports_requested_dimensions() {
        let converted = NoOpConverter
            .convert(Path::new("does-not-exist.html"), 10.0, 5.625)
            .unwrap();

        assert_eq!(converted.width_in, 10.0);
        assert_eq!(converted.height_in, 5.625);
        assert!(converted.blocks.is_empty());
    }

    #[test]
    fn test_html_converter_extracts_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_slide(
            dir.path(),
            "slide1.html",
            "<h1>Architecture</h1><p>Overview of the system</p>",
        );

        let converter = HtmlConverter::new(ConverterSettings::default());
        let converted = converter.convert(&path, 10.0, 5.625).unwrap();

        assert_eq!(converted.blocks.len(), 2);
        assert!(converted.blocks[0].bold);
        assert_eq!(converted.blocks[0].text, "Architecture");
        // Body flows below the heading
        assert!(converted.blocks[1].y > converted.blocks[0].y);
    }

    #[test]
    fn test_html_converter_missing_file_fails() {
        let converter = HtmlConverter::new(ConverterSettings::default());
        let result = converter.convert(Path::new("/nonexistent/slide.html"), 10.0, 5.625);

        assert!(result.is_err());
    }

    #[test]
    fn test_html_converter_overflow_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let many: String = (0..40).map(|i| format!("<p>Line {}</p>", i)).collect();
        let path = write_slide(dir.path(), "slide.html", &many);

        let converter = HtmlConverter::new(ConverterSettings::default());
        let converted = converter.convert(&path, 10.0, 5.625).unwrap();

        // Bounded by both the per-slide cap and the page height
        assert!(converted.blocks.len() <= 12);
        let last = converted.blocks.last().unwrap();
        assert!(last.y + last.h <= 5.625 - 0.5 + 1e-9);
    }

    #[test]
    fn test_resolver_falls_back_to_stub() {
        let dir = tempfile::tempdir().unwrap();
        let converter = resolve_converter(&dir.path().join("html2pptx.json"));
        assert_eq!(converter.name(), "noop");
    }

    #[test]
    fn test_fallback_notice_text() {
        // The exact wording is part of the tool's console contract.
        assert_eq!(SIMPLIFIED_CONVERSION_NOTICE, "Using simplified HTML conversion");
    }

    #[test]
    fn test_resolver_picks_real_converter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("html2pptx.json");
        fs::write(&path, "{}").unwrap();

        let converter = resolve_converter(&path);
        assert_eq!(converter.name(), "html");
    }
}
