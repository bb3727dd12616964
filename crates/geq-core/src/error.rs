//! Error types for the graph EQ

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum GeqError {
    #[error("Degenerate bandwidth: low edge {low} Hz, high edge {high} Hz")]
    DegenerateBandwidth { low: f64, high: f64 },

    #[error("Filter not found: {0}")]
    FilterNotFound(usize),

    #[error("Singular screen transform (determinant {0})")]
    SingularTransform(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type GeqResult<T> = Result<T, GeqError>;
