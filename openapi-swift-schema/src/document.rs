//! Document and operation definitions.

use crate::security::{SecurityRequirement, SecurityScheme};
use crate::types::{Schema, TypeSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Complete abstract API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document metadata.
    pub info: Info,
    /// Server endpoints.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Operation groups.
    #[serde(default)]
    pub groups: Vec<OperationGroup>,
    /// Top-level schemas.
    #[serde(default)]
    pub schemas: Vec<Schema>,
    /// Security schemes.
    #[serde(default)]
    pub security_schemes: Vec<SecurityScheme>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Info {
                title: title.into(),
                version: version.into(),
                description: None,
            },
            servers: Vec::new(),
            groups: Vec::new(),
            schemas: Vec::new(),
            security_schemes: Vec::new(),
        }
    }

    /// Looks up a schema by scoped name, descending into nested schemas.
    #[must_use]
    pub fn find_schema(&self, scoped_name: &[String]) -> Option<&Schema> {
        let (first, rest) = scoped_name.split_first()?;
        let top = self.schemas.iter().find(|s| &s.name == first)?;
        if rest.is_empty() {
            Some(top)
        } else {
            top.find_nested(rest)
        }
    }

    /// Returns true if a schema with the given scoped name exists.
    #[must_use]
    pub fn has_schema(&self, scoped_name: &[String]) -> bool {
        self.find_schema(scoped_name).is_some()
    }

    /// All schemas, parents before their nested schemas.
    #[must_use]
    pub fn all_schemas(&self) -> Vec<&Schema> {
        fn collect<'a>(schema: &'a Schema, out: &mut Vec<&'a Schema>) {
            out.push(schema);
            for nested in &schema.nested {
                collect(nested, out);
            }
        }

        let mut out = Vec::new();
        for schema in &self.schemas {
            collect(schema, &mut out);
        }
        out
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Base URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations grouped by tag or path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationGroup {
    /// Group name.
    pub name: String,
    /// Common path prefix.
    #[serde(default)]
    pub path: String,
    /// Group description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operations in this group.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET.
    Get,
    /// PUT.
    Put,
    /// POST.
    Post,
    /// DELETE.
    Delete,
    /// OPTIONS.
    Options,
    /// HEAD.
    Head,
    /// PATCH.
    Patch,
    /// TRACE.
    Trace,
}

/// API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the group path.
    pub path: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the operation is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses.
    #[serde(default)]
    pub responses: Vec<Response>,
    /// Security requirements; any one of them must be satisfied.
    #[serde(default)]
    pub security_requirements: Vec<SecurityRequirement>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

/// Operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Where the parameter is sent.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Parameter description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter type.
    #[serde(rename = "type")]
    pub type_spec: TypeSpec,
    /// Explicit default. `Some(Value::Null)` is an explicit null default.
    #[serde(
        default,
        deserialize_with = "crate::types::deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Whether the body must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Media type of the body.
    pub media_type: String,
    /// Body type.
    #[serde(rename = "type")]
    pub type_spec: TypeSpec,
}

/// Operation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Status code; `None` is the default response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Response description.
    #[serde(default)]
    pub description: String,
    /// Media type of the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Body type, if the response has a body.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<TypeSpec>,
}

impl Response {
    /// Returns true for a 2xx response.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code.is_some_and(|c| (200..300).contains(&c))
    }
}
