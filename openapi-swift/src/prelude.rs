//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use openapi_swift::prelude::*;
//! ```

// Core types
pub use openapi_swift_core::error::{Error as CoreError, Result as CoreResult};
pub use openapi_swift_core::{Classification, NativeType, UsageTransform, UsageType};

// Document model
pub use openapi_swift_schema::{
    Document, ParseError, Schema, SchemaError, SchemaKind, TypeSpec, parse_document,
    parse_document_file, validate_document,
};

// Generator types
pub use openapi_swift_codegen::{
    CodegenError, CodegenOptions, CompositionStrategy, Config, DefaultValue, EnumMemberStyle,
    Generator, GeneratorExtension, NamingConvention, Renderer, ResolvedDocument, SwiftNaming,
    TeraRenderer, TypeContext, generate_from_json,
};
