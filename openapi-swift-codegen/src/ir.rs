//! Resolved intermediate representation.
//!
//! This module provides the post-processed form of a document, in which every
//! type usage carries its Swift type, every property its default and initial
//! values, and every oneOf member its name. It is immutable once built and is
//! serialized into the template context.

use crate::defaults::DefaultValue;
use crate::options::CodegenOptions;
use openapi_swift_core::{Classification, NativeType, UsageType};
use openapi_swift_schema::{
    HttpMethod, Info, ParameterLocation, SchemaPurpose, ScopedName, SecurityRequirement,
    SecurityScheme, Server,
};
use serde::Serialize;
use serde_json::Value;

/// Post-processed document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDocument {
    /// Document metadata.
    pub info: Info,
    /// Server endpoints.
    pub servers: Vec<Server>,
    /// Operation groups.
    pub groups: Vec<ResolvedGroup>,
    /// Top-level schemas.
    pub schemas: Vec<ResolvedSchema>,
    /// Security schemes.
    pub security_schemes: Vec<SecurityScheme>,
    /// Options with document defaults applied.
    pub options: CodegenOptions,
}

impl ResolvedDocument {
    /// Looks up a resolved schema by scoped name.
    #[must_use]
    pub fn find_schema(&self, scoped_name: &[String]) -> Option<&ResolvedSchema> {
        fn find<'a>(schemas: &'a [ResolvedSchema], path: &[String]) -> Option<&'a ResolvedSchema> {
            let (first, rest) = path.split_first()?;
            let schema = schemas.iter().find(|s| &s.name == first)?;
            if rest.is_empty() {
                Some(schema)
            } else {
                find(&schema.nested, rest)
            }
        }
        find(&self.schemas, scoped_name)
    }
}

/// Resolved operation group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGroup {
    /// Group name.
    pub name: String,
    /// Class name of the API.
    pub class_name: String,
    /// Common path prefix.
    pub path: String,
    /// Group description.
    pub description: Option<String>,
    /// Operations.
    pub operations: Vec<ResolvedOperation>,
}

/// Resolved operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOperation {
    /// Operation name.
    pub name: String,
    /// Swift method name.
    pub method_name: String,
    /// HTTP method.
    pub http_method: HttpMethod,
    /// Path including the group prefix.
    pub full_path: String,
    /// Path relative to the group.
    pub path: String,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
    /// Parameters.
    pub parameters: Vec<ResolvedParameter>,
    /// Request body.
    pub request_body: Option<ResolvedRequestBody>,
    /// Responses.
    pub responses: Vec<ResolvedResponse>,
    /// Type of the first successful response body.
    pub return_type: Option<NativeType>,
    /// Security requirements.
    pub security_requirements: Vec<SecurityRequirement>,
}

/// Resolved operation parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParameter {
    /// Parameter name on the wire.
    pub name: String,
    /// Swift identifier.
    pub identifier: String,
    /// Where the parameter is sent.
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Whether the parameter may be null.
    pub nullable: bool,
    /// Parameter description.
    pub description: Option<String>,
    /// Classification of the parameter type.
    pub schema_type: Classification,
    /// Unwrapped type.
    pub native_type: NativeType,
    /// Type at the declaration site.
    pub usage_type: UsageType,
    /// Explicit default.
    pub default_value: Option<DefaultValue>,
    /// Initial value.
    pub initial_value: Option<DefaultValue>,
}

/// Resolved request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRequestBody {
    /// Whether the body must be supplied.
    pub required: bool,
    /// Media type.
    pub media_type: String,
    /// Unwrapped type.
    pub native_type: NativeType,
    /// Type at the declaration site.
    pub usage_type: UsageType,
}

/// Resolved response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedResponse {
    /// Status code; `None` is the default response.
    pub code: Option<u16>,
    /// Whether this is a 2xx response.
    pub is_success: bool,
    /// Description.
    pub description: String,
    /// Media type.
    pub media_type: Option<String>,
    /// Body type.
    pub native_type: Option<NativeType>,
}

/// Resolved property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProperty {
    /// Property name.
    pub name: String,
    /// Swift identifier.
    pub identifier: String,
    /// Name on the wire.
    pub serialized_name: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the property must be present.
    pub required: bool,
    /// Whether the property may be null.
    pub nullable: bool,
    /// Classification of the property type.
    pub schema_type: Classification,
    /// Unwrapped type.
    pub native_type: NativeType,
    /// Type at the declaration site.
    pub usage_type: UsageType,
    /// Explicit default.
    pub default_value: Option<DefaultValue>,
    /// Initial value.
    pub initial_value: Option<DefaultValue>,
}

/// Resolved discriminator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDiscriminator {
    /// Property name.
    pub name: String,
    /// Swift identifier.
    pub identifier: String,
    /// Name on the wire.
    pub serialized_name: String,
    /// Value mappings.
    pub mappings: Vec<ResolvedMapping>,
}

/// Discriminator value mapped to a type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMapping {
    /// Value on the wire.
    pub value: String,
    /// Target type.
    pub native_type: NativeType,
    /// Enum case or member name for the target.
    pub member_name: String,
}

/// Resolved enum member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEnumMember {
    /// Swift member name.
    pub name: String,
    /// Raw value.
    pub value: Value,
    /// Swift literal of the raw value.
    pub literal_value: String,
}

/// Resolved oneOf member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOneOfMember {
    /// Member name, unique within the schema.
    pub name: String,
    /// Enum case identifier.
    pub identifier: String,
    /// Classification of the member type.
    pub schema_type: Classification,
    /// Member type.
    pub native_type: NativeType,
}

/// Resolved object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedObject {
    /// Properties.
    pub properties: Vec<ResolvedProperty>,
    /// Parent type.
    pub parent: Option<NativeType>,
    /// Implemented protocols.
    pub implements: Vec<NativeType>,
    /// Discriminator.
    pub discriminator: Option<ResolvedDiscriminator>,
}

/// Resolved enum.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEnum {
    /// Raw value type.
    pub value_native_type: NativeType,
    /// Members.
    pub members: Vec<ResolvedEnumMember>,
}

/// Resolved interface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInterface {
    /// Properties.
    pub properties: Vec<ResolvedProperty>,
    /// Refined protocols.
    pub parents: Vec<NativeType>,
    /// Implementation type.
    pub implementation: Option<NativeType>,
}

/// Resolved hierarchy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHierarchy {
    /// Shared properties.
    pub properties: Vec<ResolvedProperty>,
    /// Discriminator.
    pub discriminator: ResolvedDiscriminator,
    /// Member types.
    pub members: Vec<NativeType>,
}

/// Resolved wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWrapper {
    /// Wrapped value.
    pub property: ResolvedProperty,
}

/// Resolved oneOf.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOneOf {
    /// Members.
    pub members: Vec<ResolvedOneOfMember>,
    /// Discriminator.
    pub discriminator: Option<ResolvedDiscriminator>,
}

/// Resolved schema kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolvedSchemaKind {
    /// Object.
    Object(ResolvedObject),
    /// Enum.
    Enum(ResolvedEnum),
    /// Interface.
    Interface(ResolvedInterface),
    /// Hierarchy.
    Hierarchy(ResolvedHierarchy),
    /// Wrapper.
    Wrapper(ResolvedWrapper),
    /// OneOf.
    OneOf(ResolvedOneOf),
}

/// Resolved schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSchema {
    /// Schema name.
    pub name: String,
    /// Swift type name.
    pub class_name: String,
    /// Scoped name.
    pub scoped_name: ScopedName,
    /// Description.
    pub description: Option<String>,
    /// Purpose.
    pub purpose: SchemaPurpose,
    /// Whether values may be null.
    pub nullable: bool,
    /// Classification.
    pub schema_type: Classification,
    /// Fully qualified Swift type.
    pub native_type: NativeType,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: ResolvedSchemaKind,
    /// Nested schemas.
    pub nested: Vec<ResolvedSchema>,
}

impl ResolvedSchema {
    /// Properties of the schema, if its kind has any.
    #[must_use]
    pub fn properties(&self) -> &[ResolvedProperty] {
        match &self.kind {
            ResolvedSchemaKind::Object(o) => &o.properties,
            ResolvedSchemaKind::Interface(i) => &i.properties,
            ResolvedSchemaKind::Hierarchy(h) => &h.properties,
            ResolvedSchemaKind::Wrapper(w) => std::slice::from_ref(&w.property),
            ResolvedSchemaKind::Enum(_) | ResolvedSchemaKind::OneOf(_) => &[],
        }
    }
}

/// Values shared by every template context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootContext {
    /// Generator options.
    #[serde(flatten)]
    pub options: CodegenOptions,
    /// Generator identifier.
    pub generator_class: &'static str,
    /// Generator version.
    pub generator_version: &'static str,
    /// Generation timestamp, unless hidden.
    pub generated_date: Option<String>,
}
