//! Error types for texturefeat

use thiserror::Error;

/// Main error type for texturefeat operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid matrix dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in matrix of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Intensity {value} at ({x}, {y}) is outside [0, {max_gray})")]
    IntensityOutOfRange {
        x: usize,
        y: usize,
        value: u32,
        max_gray: u32,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The co-occurrence matrix holds no counts, so it cannot be normalized.
    #[error("No co-occurrences observed: the co-occurrence matrix is empty")]
    NoCooccurrences,

    #[error("Feature {index} is not finite ({value})")]
    NonFiniteFeature { index: usize, value: f64 },

    #[error("Malformed gray map: {0}")]
    Format(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for texturefeat operations
pub type Result<T> = std::result::Result<T, Error>;
