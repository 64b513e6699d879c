//! # OpenAPI Swift Schema
//!
//! Abstract API document model consumed by the Swift client generator.
//!
//! This crate provides:
//! - Document, operation and security scheme definitions
//! - Schema definitions with a closed set of schema kinds
//! - JSON parsing of the serialized document form
//! - Structural validation

pub mod document;
pub mod error;
pub mod parser;
pub mod security;
pub mod types;
pub mod validation;

pub use document::{
    Document, HttpMethod, Info, Operation, OperationGroup, Parameter, ParameterLocation,
    RequestBody, Response, Server,
};
pub use error::{ParseError, SchemaError};
pub use parser::{parse_document, parse_document_file};
pub use security::{
    ApiKeyLocation, OAuthFlow, OAuthFlowType, SecurityRequirement, SecurityScheme,
    SecuritySchemeKind,
};
pub use types::{
    Discriminator, DiscriminatorMapping, EnumSchema, HierarchySchema, InterfaceSchema,
    ObjectSchema, OneOfMember, OneOfSchema, Property, Schema, SchemaKind, SchemaPurpose,
    ScopedName, TypeSpec, WrapperSchema,
};
pub use validation::validate_document;
