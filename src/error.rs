//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerceptronError {
    /// A pattern (or weight block) does not have the configured dimensions.
    #[error("Shape mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Malformed pattern text. `line` is 1-based within the parsed block.
    #[error("Format error on line {line}: {message}")]
    Format { line: usize, message: String },

    /// The knowledge base has the wrong number of blocks or a malformed block.
    #[error("Corrupt knowledge base: {0}")]
    CorruptKnowledgeBase(String),

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PerceptronError>;
