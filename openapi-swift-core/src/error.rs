//! Error types for core type operations.

use thiserror::Error;

/// Core error type for type descriptor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Classification name not recognized.
    #[error("unknown schema classification '{name}'")]
    UnknownClassification {
        /// The unrecognized name.
        name: String,
    },

    /// A composite descriptor was built from an invalid part.
    #[error("invalid composition: {message}")]
    InvalidComposition {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Creates an unknown classification error.
    pub fn unknown_classification(name: impl Into<String>) -> Self {
        Self::UnknownClassification { name: name.into() }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
