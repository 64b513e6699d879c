//! Security scheme definitions.

use serde::{Deserialize, Serialize};

/// Named security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// Scheme name.
    pub name: String,
    /// Scheme description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scheme-specific settings.
    #[serde(flatten)]
    pub kind: SecuritySchemeKind,
}

/// Security scheme variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecuritySchemeKind {
    /// API key sent in a header, query parameter or cookie.
    ApiKey {
        /// Name of the header, query parameter or cookie.
        #[serde(rename = "paramName")]
        param_name: String,
        /// Where the key is sent.
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    /// HTTP authentication.
    Http {
        /// Scheme, e.g. `basic` or `bearer`.
        scheme: String,
        /// Bearer token format hint.
        #[serde(
            default,
            rename = "bearerFormat",
            skip_serializing_if = "Option::is_none"
        )]
        bearer_format: Option<String>,
    },
    /// OAuth 2 flows.
    #[serde(rename = "oauth2")]
    OAuth2 {
        /// Supported flows.
        flows: Vec<OAuthFlow>,
    },
    /// OpenID Connect discovery.
    OpenIdConnect {
        /// Discovery URL.
        url: String,
    },
}

/// Location of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiKeyLocation {
    /// Request header.
    Header,
    /// Query string.
    Query,
    /// Cookie.
    Cookie,
}

/// OAuth 2 flow type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuthFlowType {
    /// Implicit grant.
    Implicit,
    /// Resource owner password grant.
    Password,
    /// Client credentials grant.
    ClientCredentials,
    /// Authorization code grant.
    AuthorizationCode,
}

/// OAuth 2 flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Flow type.
    #[serde(rename = "type")]
    pub flow_type: OAuthFlowType,
    /// Authorization URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// Token URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Refresh URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// Available scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Requirement of one security scheme with scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRequirement {
    /// Name of the required scheme.
    pub scheme: String,
    /// Scopes required.
    #[serde(default)]
    pub scopes: Vec<String>,
}
