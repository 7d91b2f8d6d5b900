//! Domain types for the deck being assembled.

use serde::{Deserialize, Serialize};

/// English Metric Units per inch, the base unit of OOXML geometry.
pub const EMU_PER_INCH: i64 = 914_400;

/// The in-memory slide deck: metadata plus an ordered sequence of slides.
///
/// Owned by the driver for its whole lifetime: created, mutated, serialized,
/// and discarded within one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Page geometry for every slide in the deck.
    pub layout: SlideLayout,

    /// Document creator, written to docProps/core.xml.
    pub author: String,

    /// Document title, written to docProps/core.xml.
    pub title: String,

    /// Slides in deck order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty presentation with the given metadata.
    pub fn new(layout: SlideLayout, author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            layout,
            author: author.into(),
            title: title.into(),
            slides: Vec::new(),
        }
    }

    /// Append a slide to the deck.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides currently in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Enumerated page geometry identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideLayout {
    /// 10 in x 5.625 in widescreen.
    Widescreen16x9,
    /// 10 in x 7.5 in classic.
    Standard4x3,
}

impl SlideLayout {
    /// Page width and height in inches.
    pub fn dimensions_in(&self) -> (f64, f64) {
        match self {
            Self::Widescreen16x9 => (10.0, 5.625),
            Self::Standard4x3 => (10.0, 7.5),
        }
    }

    /// Page width and height in EMU, as written into `p:sldSz`.
    pub fn dimensions_emu(&self) -> (i64, i64) {
        let (w, h) = self.dimensions_in();
        (inches_to_emu(w), inches_to_emu(h))
    }
}

/// Convert a length in inches to EMU, rounding to the nearest unit.
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// One ordered unit within the deck.
///
/// A slide may be empty: the driver adds it to the deck before attempting
/// conversion, and a failed conversion leaves it without content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Positioned text boxes on this slide, in source order.
    pub blocks: Vec<TextBlock>,
}

impl Slide {
    /// Create a slide with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a text box to this slide.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Whether the slide carries any content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// One positioned text box on a slide. Geometry is in inches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// The text content.
    pub text: String,

    /// Left edge.
    pub x: f64,

    /// Top edge.
    pub y: f64,

    /// Box width.
    pub w: f64,

    /// Box height.
    pub h: f64,

    /// Font size in points.
    pub font_size: f64,

    /// Bold run.
    pub bold: bool,
}

impl TextBlock {
    /// Create a text box with default geometry and font.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0.5,
            y: 0.5,
            w: 9.0,
            h: 0.8,
            font_size: 18.0,
            bold: false,
        }
    }

    /// Set the box frame (inches).
    pub fn with_frame(mut self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
        self
    }

    /// Set the font size (points) and weight.
    pub fn with_font(mut self, size: f64, bold: bool) -> Self {
        self.font_size = size;
        self.bold = bold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_dimensions() {
        let (w, h) = SlideLayout::Widescreen16x9.dimensions_in();
        assert_eq!(w, 10.0);
        assert_eq!(h, 5.625);

        let (cx, cy) = SlideLayout::Widescreen16x9.dimensions_emu();
        assert_eq!(cx, 9_144_000);
        assert_eq!(cy, 5_143_500);
    }

    #[test]
    fn test_inches_to_emu() {
        assert_eq!(inches_to_emu(1.0), 914_400);
        assert_eq!(inches_to_emu(0.5), 457_200);
        assert_eq!(inches_to_emu(0.0), 0);
    }

    #[test]
    fn test_presentation_add_slide() {
        let mut prs = Presentation::new(SlideLayout::Widescreen16x9, "Author", "Title");
        assert_eq!(prs.slide_count(), 0);

        prs.add_slide(Slide::empty());
        prs.add_slide(Slide::empty());
        assert_eq!(prs.slide_count(), 2);
        assert!(prs.slides[0].is_empty());
    }

    #[test]
    fn test_slide_blocks() {
        let mut slide = Slide::empty();
        slide.add_block(TextBlock::new("Heading").with_font(32.0, true));
        slide.add_block(TextBlock::new("Body").with_frame(0.5, 1.5, 9.0, 3.0));

        assert!(!slide.is_empty());
        assert_eq!(slide.blocks.len(), 2);
        assert!(slide.blocks[0].bold);
        assert_eq!(slide.blocks[1].y, 1.5);
    }
}
