//! Error types for bwfm-ex
//!
//! Only failures that make the whole file untrustworthy are errors. Missing
//! chunks, unknown frame rates and unusable timecode inputs degrade to absent
//! fields and never surface here.

use thiserror::Error;

/// Extraction error type
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// RIFF/WAVE chunk structure unreadable
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// iXML payload present but not a well-formed document
    #[error("Malformed iXML: {0}")]
    MalformedXml(String),

    /// File could not be read (I/O failure or aborted read)
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// Extraction cancelled by the caller
    #[error("Extraction cancelled")]
    Cancelled,

    /// Internal error (background task failure)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for extraction operations
pub type ExtractionResult<T> = Result<T, ExtractionError>;
