//! Composition strategy policy.
//!
//! Decides how `allOf`, `anyOf` and `oneOf` compositions, interfaces and
//! hierarchies are represented in Swift.

use openapi_swift_core::Classification;
use openapi_swift_schema::SchemaPurpose;
use serde::Serialize;

/// Representation of `allOf` compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AllOfStrategy {
    /// Merge all members into one object.
    Object,
    /// Use native inheritance.
    Native,
    /// Protocol hierarchy with discriminated roots.
    Hierarchy,
}

/// Representation of `anyOf` compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnyOfStrategy {
    /// Flatten into one object with optional properties.
    Object,
    /// Use a native union.
    Native,
}

/// Representation of `oneOf` compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OneOfStrategy {
    /// Flatten into one object.
    Object,
    /// Enum with associated values.
    Native,
}

/// Kind of code the generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratorType {
    /// API client.
    Client,
    /// API server.
    Server,
    /// Documentation.
    Documentation,
}

/// How operations are grouped into API classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationGroupingStrategy {
    /// By first tag, falling back to the first path segment.
    TagOrPath,
    /// By first path segment.
    Path,
    /// All operations in one group.
    Single,
}

/// Options used to suggest a schema name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedNameOptions {
    /// Classification of the schema.
    pub schema_type: Classification,
    /// Purpose of the schema.
    pub purpose: SchemaPurpose,
}

/// Composition decisions of a generator.
pub trait CompositionStrategy {
    /// How `allOf` is represented.
    fn all_of_strategy(&self) -> AllOfStrategy;

    /// How `anyOf` is represented.
    fn any_of_strategy(&self) -> AnyOfStrategy;

    /// How `oneOf` is represented.
    fn one_of_strategy(&self) -> OneOfStrategy;

    /// Whether objects may extend other objects.
    fn supports_inheritance(&self) -> bool;

    /// Whether objects may extend several objects.
    fn supports_multiple_inheritance(&self) -> bool;

    /// Whether interfaces may be declared inside other schemas.
    fn interface_can_be_nested(&self) -> bool;

    /// Whether a native composition may contain nested schemas.
    fn native_composition_can_be_scope(&self) -> bool;

    /// Whether members of a native composition need names.
    fn native_composed_schema_requires_name(&self) -> bool;

    /// Whether members of a native composition must be objects or wrappers.
    fn native_composed_schema_requires_object_like_or_wrapper(&self) -> bool;

    /// Kind of code generated.
    fn generator_type(&self) -> GeneratorType;

    /// Operation grouping.
    fn operation_grouping_strategy(&self) -> OperationGroupingStrategy;
}

/// Swift composition decisions.
///
/// Swift models are structs, so there is no inheritance; allOf becomes a
/// protocol hierarchy and oneOf an enum with associated values, whose cases
/// need names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftStrategy;

impl CompositionStrategy for SwiftStrategy {
    fn all_of_strategy(&self) -> AllOfStrategy {
        AllOfStrategy::Hierarchy
    }

    fn any_of_strategy(&self) -> AnyOfStrategy {
        AnyOfStrategy::Object
    }

    fn one_of_strategy(&self) -> OneOfStrategy {
        OneOfStrategy::Native
    }

    fn supports_inheritance(&self) -> bool {
        false
    }

    fn supports_multiple_inheritance(&self) -> bool {
        false
    }

    fn interface_can_be_nested(&self) -> bool {
        false
    }

    fn native_composition_can_be_scope(&self) -> bool {
        true
    }

    fn native_composed_schema_requires_name(&self) -> bool {
        true
    }

    fn native_composed_schema_requires_object_like_or_wrapper(&self) -> bool {
        false
    }

    fn generator_type(&self) -> GeneratorType {
        GeneratorType::Client
    }

    fn operation_grouping_strategy(&self) -> OperationGroupingStrategy {
        OperationGroupingStrategy::TagOrPath
    }
}

/// Suggests a schema name from its purpose.
///
/// Enums keep their name. Interfaces, abstract implementations and
/// implementations are renamed so that they do not collide with each other.
#[must_use]
pub fn to_suggested_schema_name(name: &str, options: SuggestedNameOptions) -> String {
    if options.schema_type == Classification::Enum {
        return name.to_string();
    }
    match options.purpose {
        SchemaPurpose::Interface => format!("{name}_protocol"),
        SchemaPurpose::AbstractImplementation => format!("abstract_{name}"),
        SchemaPurpose::Implementation => format!("{name}_impl"),
        SchemaPurpose::Model | SchemaPurpose::Unknown => name.to_string(),
    }
}
