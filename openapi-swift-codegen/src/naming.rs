//! Swift naming conventions.
//!
//! Converts names from the abstract document into Swift class names,
//! identifiers and enum member names, escaping Swift reserved words.

use serde::{Deserialize, Serialize};

/// Words that cannot be used unescaped as generated identifiers.
///
/// Includes Swift keywords, standard library types, and the types emitted by
/// the support and security templates.
pub const RESERVED_WORDS: &[&str] = &[
    "Any", "AnyObject", "Array", "Bool", "COLUMN", "Character", "Class", "ClosedRange",
    "Codable", "CountableClosedRange", "CountableRange", "Data", "Decodable", "Dictionary",
    "Double", "Encodable", "Error", "ErrorResponse", "FILE", "FUNCTION", "Float", "Float32",
    "Float64", "Float80", "Int", "Int16", "Int32", "Int64", "Int8", "LINE", "OptionSet",
    "Optional", "Protocol", "Range", "Response", "Self", "Set", "StaticString", "String",
    "Type", "UInt", "UInt16", "UInt32", "UInt64", "UInt8", "URL", "Unicode", "Void", "_", "as",
    "associatedtype", "associativity", "break", "case", "catch", "class", "continue",
    "convenience", "default", "defer", "deinit", "didSet", "do", "dynamic", "dynamicType",
    "else", "enum", "extension", "fallthrough", "false", "fileprivate", "final", "for", "func",
    "get", "guard", "if", "import", "in", "indirect", "infix", "init", "inout", "internal", "is",
    "lazy", "left", "let", "mutating", "nil", "none", "nonmutating", "open", "operator",
    "optional", "override", "postfix", "precedence", "prefix", "private", "protocol", "public",
    "repeat", "required", "rethrows", "return", "right", "self", "set", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "unowned",
    "var", "weak", "where", "while", "willSet", "Sendable", "Hashable", "LocalDate",
    "LocalTime", "OffsetDateTime", "Decimal", "File", "FormData", "unknown",
    "RetryConfiguration", "Configuration", "SecurityClient", "SecurityClientController",
    "SecurityScheme", "OAuthPasswordFlowClient", "OAuthClientCredentialsFlowClient",
    "OAuthAuthorizationCodeFlowClient", "OAuthAccessTokenManager", "AccessTokenHandler",
    "OAuthAccessToken", "BasicAuthenticationSecurityClient", "APIKeySecurityClient",
    "AbstractOAuthFlowClient", "OAuthConfiguration",
];

/// How enum member names are derived from enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumMemberStyle {
    /// Use the constant naming convention.
    #[default]
    Constant,
    /// Use the identifier naming convention.
    CamelCase,
    /// Keep the value, replacing characters that are not valid in identifiers.
    Preserve,
}

impl EnumMemberStyle {
    /// Parses a style name as used in configuration.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "constant" => Some(Self::Constant),
            "camelcase" | "camel-case" | "camel_case" => Some(Self::CamelCase),
            "preserve" => Some(Self::Preserve),
            _ => None,
        }
    }
}

/// Naming convention used by the generator.
pub trait NamingConvention: Send + Sync {
    /// Converts a name into a type name.
    fn to_class_name(&self, name: &str) -> String;

    /// Converts a name into a property, parameter or method identifier.
    fn to_identifier(&self, name: &str) -> String;

    /// Converts a name into a constant name.
    fn to_constant_name(&self, name: &str) -> String;

    /// Words that must be escaped when used as identifiers.
    fn reserved_words(&self) -> &[&str];

    /// Converts an enum value into an enum member name.
    fn to_enum_member_name(&self, value: &str, style: EnumMemberStyle) -> String {
        match style {
            EnumMemberStyle::Constant => self.to_constant_name(value),
            EnumMemberStyle::CamelCase => self.to_identifier(value),
            EnumMemberStyle::Preserve => {
                let safe: String = value
                    .chars()
                    .map(|c| if c.is_alphanumeric() { c } else { '_' })
                    .collect();
                self.escape(&safe)
            }
        }
    }

    /// Converts an operation name into a method name.
    fn to_operation_name(&self, name: &str) -> String {
        self.to_identifier(name)
    }

    /// Returns true if `word` is reserved.
    fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words().contains(&word)
    }

    /// Escapes an identifier that is reserved or not a valid identifier start.
    fn escape(&self, identifier: &str) -> String {
        if identifier.is_empty() {
            return "_".to_string();
        }
        if identifier.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("_{identifier}");
        }
        if self.is_reserved(identifier) {
            return format!("`{identifier}`");
        }
        identifier.to_string()
    }
}

/// Splits a name into words at separators and lower-to-upper case boundaries.
#[must_use]
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        }
        if let Some(p) = previous {
            if c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        previous = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    if word.chars().all(|c| !c.is_lowercase()) {
        return word.to_lowercase();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Swift naming convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftNaming;

impl NamingConvention for SwiftNaming {
    fn to_class_name(&self, name: &str) -> String {
        let class_name: String = split_words(name).iter().map(|w| upper_first(w)).collect();
        if class_name.is_empty() {
            return "_".to_string();
        }
        if class_name.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("_{class_name}");
        }
        class_name
    }

    fn to_identifier(&self, name: &str) -> String {
        let words = split_words(name);
        let identifier: String = words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { lower_first(w) } else { upper_first(w) })
            .collect();
        self.escape(&identifier)
    }

    fn to_constant_name(&self, name: &str) -> String {
        let words = split_words(name);
        let constant: String = words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let lower = w.to_lowercase();
                if i == 0 { lower } else { upper_first(&lower) }
            })
            .collect();
        self.escape(&constant)
    }

    fn reserved_words(&self) -> &[&str] {
        RESERVED_WORDS
    }
}
