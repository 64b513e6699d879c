//! Error types for code generation.

use openapi_swift_core::Classification;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Document parsing error.
    #[error("document parse error: {0}")]
    Parse(#[from] openapi_swift_schema::ParseError),

    /// Document validation error.
    #[error("schema error: {0}")]
    Schema(#[from] openapi_swift_schema::SchemaError),

    /// Type descriptor error.
    #[error("type error: {0}")]
    Core(#[from] openapi_swift_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template loading or rendering error.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// Invalid configuration value.
    #[error("invalid configuration '{key}': {message}")]
    Config {
        /// Dotted configuration key.
        key: String,
        /// Error message.
        message: String,
    },

    /// Format not supported for a classification.
    #[error("unsupported {classification} format: {format}")]
    UnsupportedFormat {
        /// Classification.
        classification: Classification,
        /// Format qualifier.
        format: String,
    },

    /// Classification cannot be mapped to a scalar Swift type.
    #[error("unsupported schema type: {classification}")]
    UnsupportedSchemaType {
        /// Classification.
        classification: Classification,
    },

    /// Value cannot be written as a Swift literal.
    #[error("cannot format literal for {classification}: {reason}")]
    UnsupportedLiteral {
        /// Classification.
        classification: Classification,
        /// Why the literal is unsupported.
        reason: String,
    },

    /// Property override incompatible with the inherited property.
    #[error("property '{property}' of '{schema}' is incompatible with '{parent}': {reason}")]
    IncompatibleProperty {
        /// Overriding schema.
        schema: String,
        /// Parent schema or interface.
        parent: String,
        /// Property name.
        property: String,
        /// Why the properties differ.
        reason: String,
    },

    /// Interface declared inside another schema.
    #[error("interface '{name}' cannot be nested")]
    NestedInterface {
        /// Scoped name, dot separated.
        name: String,
    },

    /// Reference to a schema that does not exist.
    #[error("unknown schema '{name}'")]
    UnknownSchema {
        /// Scoped name, dot separated.
        name: String,
    },

    /// Map usage with a key type other than STRING or INTEGER.
    #[error("unsupported map key type {classification} in '{context}'")]
    InvalidMapKey {
        /// Key classification.
        classification: Classification,
        /// Referencing element.
        context: String,
    },

    /// Array or map usage without its component or key.
    #[error("{classification} usage is missing its {part} type")]
    MissingComponent {
        /// Classification of the usage.
        classification: Classification,
        /// Missing part (component or key).
        part: String,
    },
}

impl CodegenError {
    /// Creates a configuration error.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported literal error.
    pub fn unsupported_literal(classification: Classification, reason: impl Into<String>) -> Self {
        Self::UnsupportedLiteral {
            classification,
            reason: reason.into(),
        }
    }

    /// Creates an unknown schema error from a scoped name.
    pub fn unknown_schema(scoped_name: &[String]) -> Self {
        Self::UnknownSchema {
            name: scoped_name.join("."),
        }
    }
}

/// Result type alias for code generation operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
