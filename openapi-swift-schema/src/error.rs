//! Error types for document parsing and validation.

use thiserror::Error;

/// Error type for document parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },
}

/// Error type for document validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (schema, property, member, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Reference to a schema that does not exist.
    #[error("unknown schema '{name}' referenced from '{context}'")]
    UnknownReference {
        /// Referenced scoped name, dot separated.
        name: String,
        /// Referencing element.
        context: String,
    },

    /// Array or map usage without its component or key.
    #[error("{classification} usage in '{context}' is missing its {part} type")]
    MissingComponent {
        /// Classification of the usage.
        classification: String,
        /// Missing part (component or key).
        part: String,
        /// Referencing element.
        context: String,
    },

    /// Scoped name does not end with the schema name.
    #[error("scoped name '{scoped_name}' does not match schema '{name}'")]
    ScopedNameMismatch {
        /// Schema name.
        name: String,
        /// Scoped name, dot separated.
        scoped_name: String,
    },

    /// Enum without values.
    #[error("enum '{name}' has no values")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
