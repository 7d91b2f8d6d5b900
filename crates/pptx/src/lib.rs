//! PPTX (Office Open XML) writer backend for deck assembly.
//!
//! Serializes an assembled `Presentation` into a `.pptx` package: a ZIP
//! archive of XML parts wired together by relationship files.

pub mod parts;
pub mod writer;

pub use writer::PptxWriter;
