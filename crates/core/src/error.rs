//! Error types for script conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole conversion run.
///
/// Per-slide problems (missing slide, no shape tree) are never errors; they
/// are recorded in a [`crate::PatchReport`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The source is not a readable ZIP container, or the output could not be written.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// The script produced no slide blocks.
    #[error("No slide content found: add at least one [SLIDE N] block to the script")]
    NoSlideContent,
}
