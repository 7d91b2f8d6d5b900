//! Error types for deck assembly.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The converter helper settings could not be resolved or parsed.
    #[error("Converter helper unavailable: {0}")]
    HelperUnavailable(String),

    /// Failed to convert an HTML file into slide content.
    #[error("HTML conversion error: {0}")]
    ConversionError(String),

    /// Failed to serialize a part of the PPTX package.
    #[error("PPTX serialization error: {0}")]
    PptxWriteError(String),

    /// ZIP archive error (the PPTX container).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing error (PPTX parts).
    #[error("XML error: {0}")]
    XmlError(String),
}
