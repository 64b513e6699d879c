//! # OpenAPI Swift Codegen
//!
//! Swift client generation from abstract OpenAPI documents.
//!
//! This crate provides:
//! - Swift type resolution for every schema and type usage
//! - Swift literals, default values and initial values
//! - oneOf member naming and property compatibility checks
//! - Template rendering of APIs, models and support files
//! - Extension points for additional templates and exports

pub mod defaults;
pub mod error;
pub mod export;
pub mod extension;
pub mod generator;
pub mod ir;
pub mod literal;
pub mod naming;
pub mod options;
pub mod postprocess;
pub mod resolve;
pub mod strategy;

pub use defaults::DefaultValue;
pub use error::{CodegenError, Result};
pub use export::{Renderer, TeraRenderer};
pub use extension::{GeneratorExtension, MergedExtensions};
pub use generator::Generator;
pub use ir::{ResolvedDocument, ResolvedProperty, ResolvedSchema, ResolvedSchemaKind, RootContext};
pub use literal::TypeContext;
pub use naming::{EnumMemberStyle, NamingConvention, SwiftNaming};
pub use options::{CodegenOptions, Config};
pub use strategy::{CompositionStrategy, SuggestedNameOptions};

/// Parses, resolves and exports a document in the JSON document format.
///
/// # Arguments
/// * `json` - Document content
/// * `config` - Generator configuration
/// * `output_path` - Directory receiving the generated package
///
/// # Errors
/// Returns `CodegenError` if parsing, resolution or export fails.
pub async fn generate_from_json(
    json: &str,
    config: &Config,
    output_path: &std::path::Path,
) -> Result<ResolvedDocument> {
    let document = openapi_swift_schema::parse_document(json)?;
    let generator = Generator::from_config(config)?;
    let resolved = generator.post_process_document(document)?;
    generator.export_templates(output_path, &resolved).await?;
    Ok(resolved)
}
