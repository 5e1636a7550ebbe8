use thiserror::Error;

#[derive(Error, Debug)]
pub enum HogError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Grid {width}x{height} is not divisible into {cell_size}x{cell_size} cells")]
    InvalidCellSize {
        width: usize,
        height: usize,
        cell_size: usize,
    },

    #[error("Shape mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    ShapeMismatch {
        /// (width, height) of the reference grid
        expected: (usize, usize),
        /// (width, height) of the offending grid
        actual: (usize, usize),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HogError>;
