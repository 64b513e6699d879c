//! # OpenAPI Swift
//!
//! Swift client generation from abstract OpenAPI documents.
//!
//! The generator takes a document that has already been resolved into
//! schemas, operation groups and security schemes, chooses a Swift type for
//! every usage, synthesizes default values, and renders a Swift package.
//!
//! ## Features
//!
//! - **Swift type mapping** - Scalars, arrays, dictionaries and nested models
//! - **Usage-site wrapping** - `Nullable<T>` and optionals applied at the point of use
//! - **Literal synthesis** - Swift literals for defaults and enum members
//! - **Native oneOf** - Enums with associated values and unique case names
//! - **Extensible templates** - Custom template directories and generator extensions
//!
//! ## Quick Start
//!
//! ```ignore
//! use openapi_swift::prelude::*;
//!
//! let config = Config::from_file(Path::new("swift.json"))?;
//! let document = parse_document_file(Path::new("api.json"))?;
//!
//! let generator = Generator::from_config(&config)?;
//! let resolved = generator.post_process_document(document)?;
//! generator.export_templates(Path::new("out"), &resolved).await?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Classifications, native type descriptors, usage transforms
//! - [`schema`] - Abstract document model, parsing and validation
//! - [`codegen`] - Type resolution, literals, post-processing and export

pub mod prelude;

/// Classifications and native type descriptors.
pub mod core {
    pub use openapi_swift_core::*;
}

/// Abstract document model.
pub mod schema {
    pub use openapi_swift_schema::*;
}

/// Swift code generation.
pub mod codegen {
    pub use openapi_swift_codegen::*;
}

// Re-export commonly used items at the crate root
pub use openapi_swift_codegen::{CodegenError, Config, Generator, generate_from_json};
pub use openapi_swift_core::{Classification, NativeType, UsageTransform};
pub use openapi_swift_schema::{Document, parse_document, parse_document_file};
