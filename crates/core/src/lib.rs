//! Core domain types, error handling, and text helpers
//! for slide deck assembly.

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use types::{Presentation, Slide, SlideLayout, TextBlock, EMU_PER_INCH};
