//! HTML-to-slide conversion for deck assembly.
//!
//! Exposes the `SlideConverter` boundary with two variants selected once at
//! startup: the real `HtmlConverter` when the helper settings file resolves,
//! and the `NoOpConverter` stub when it does not.

pub mod convert;
pub mod extract;
pub mod settings;

pub use convert::{
    resolve_converter, ConvertedSlide, HtmlConverter, NoOpConverter, SlideConverter,
    SIMPLIFIED_CONVERSION_NOTICE,
};
pub use settings::ConverterSettings;
