//! Error types for the imaging frontend.

use thiserror::Error;

/// Errors that can occur while loading, corrupting or rendering images.
#[derive(Debug, Error)]
pub enum ImagingError {
    /// Underlying filesystem failure.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a well-formed binary PGM file.
    #[error("Malformed PGM data: {reason}")]
    Format {
        /// Description of the malformation
        reason: String,
    },

    /// Image or matrix dimensions do not agree.
    #[error("Image shape mismatch: {reason}")]
    Shape {
        /// Description of the disagreement
        reason: String,
    },

    /// The corruption probability is outside [0, 1].
    #[error("Invalid drop probability {value}: must lie in [0, 1]")]
    InvalidProbability {
        /// The offending value
        value: f64,
    },
}

impl ImagingError {
    /// Create a Format error with a custom reason.
    pub fn format_error<S: Into<String>>(reason: S) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }

    /// Create a Shape error with a custom reason.
    pub fn shape_error<S: Into<String>>(reason: S) -> Self {
        Self::Shape {
            reason: reason.into(),
        }
    }
}

/// Result type alias for imaging operations.
pub type Result<T> = std::result::Result<T, ImagingError>;
