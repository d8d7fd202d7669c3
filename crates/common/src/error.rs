//! Error types for pagediff

use thiserror::Error;

/// Result type alias using the pagediff Error
pub type Result<T> = std::result::Result<T, Error>;

/// pagediff error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Empty input: zero-area image or region")]
    EmptyInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn dimensions(left: (u32, u32), right: (u32, u32)) -> Self {
        Error::DimensionMismatch {
            left_width: left.0,
            left_height: left.1,
            right_width: right.0,
            right_height: right.1,
        }
    }
}
