//! Schema type definitions.
//!
//! This module contains the data structures describing named schemas, their
//! properties, and the abstract usage of a type at a property, parameter or
//! response site.

use openapi_swift_core::Classification;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializes a present field as `Some`, keeping an explicit `null` as `Some(Value::Null)`.
pub(crate) fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Scoped name of a schema: the enclosing schema names followed by its own.
pub type ScopedName = Vec<String>;

/// Role a schema plays in the composition of another schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaPurpose {
    /// A regular model.
    Model,
    /// Protocol extracted from an allOf member.
    Interface,
    /// Abstract implementation of an interface.
    AbstractImplementation,
    /// Concrete implementation of an interface.
    Implementation,
    /// Purpose not known.
    #[default]
    Unknown,
}

/// Abstract usage of a type.
///
/// Arrays carry a `component`; maps carry both a `key` and a `component`.
/// Named classifications carry the `scoped_name` of the referenced schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSpec {
    /// Abstract classification.
    pub schema_type: Classification,
    /// Optional format qualifier, e.g. `int32` or `date-time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Whether the value may be explicitly null.
    #[serde(default)]
    pub nullable: bool,
    /// Referenced schema for named classifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoped_name: Option<ScopedName>,
    /// Element type for arrays, value type for maps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<TypeSpec>>,
    /// Key type for maps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<TypeSpec>>,
    /// Purpose of the referenced schema.
    #[serde(default)]
    pub purpose: SchemaPurpose,
}

impl TypeSpec {
    /// Creates a scalar type usage.
    #[must_use]
    pub fn scalar(schema_type: Classification, format: Option<&str>) -> Self {
        Self {
            schema_type,
            format: format.map(str::to_string),
            nullable: false,
            scoped_name: None,
            component: None,
            key: None,
            purpose: SchemaPurpose::Unknown,
        }
    }

    /// Creates an array usage of `component`.
    #[must_use]
    pub fn array(component: TypeSpec) -> Self {
        Self {
            component: Some(Box::new(component)),
            ..Self::scalar(Classification::Array, None)
        }
    }

    /// Creates a map usage from `key` to `component`.
    #[must_use]
    pub fn map(key: TypeSpec, component: TypeSpec) -> Self {
        Self {
            key: Some(Box::new(key)),
            component: Some(Box::new(component)),
            ..Self::scalar(Classification::Map, None)
        }
    }

    /// Creates a reference to a named schema.
    #[must_use]
    pub fn named<S: Into<String>>(
        schema_type: Classification,
        scoped_name: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            scoped_name: Some(scoped_name.into_iter().map(Into::into).collect()),
            ..Self::scalar(schema_type, None)
        }
    }

    /// Returns a copy marked nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns the format, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

/// A property of an object-like schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Name used on the wire, if different from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,
    /// Property description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the property must be present.
    #[serde(default)]
    pub required: bool,
    /// Property type.
    #[serde(rename = "type")]
    pub type_spec: TypeSpec,
    /// Explicit default. `Some(Value::Null)` is an explicit null default.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
}

impl Property {
    /// Creates a property.
    #[must_use]
    pub fn new(name: impl Into<String>, type_spec: TypeSpec, required: bool) -> Self {
        Self {
            name: name.into(),
            serialized_name: None,
            description: None,
            required,
            type_spec,
            default: None,
        }
    }

    /// Returns a copy with an explicit default.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Name used on the wire.
    #[must_use]
    pub fn serialized_name(&self) -> &str {
        self.serialized_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether the property may be explicitly null.
    #[must_use]
    pub const fn nullable(&self) -> bool {
        self.type_spec.nullable
    }
}

/// Discriminator of a hierarchy or oneOf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Property name carrying the discriminator.
    pub name: String,
    /// Wire name of the discriminator property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,
    /// Discriminator value to schema mappings.
    #[serde(default)]
    pub mappings: Vec<DiscriminatorMapping>,
}

/// Maps one discriminator value to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorMapping {
    /// Value on the wire.
    pub value: String,
    /// Target schema.
    pub scoped_name: ScopedName,
}

/// Object schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    /// Properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Parent object, for generators with inheritance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ScopedName>,
    /// Interfaces this object implements.
    #[serde(default)]
    pub implements: Vec<ScopedName>,
    /// Discriminator, when this object is a discriminated union root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
}

/// Enum schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumSchema {
    /// Type of the raw enum values.
    pub value_type: TypeSpec,
    /// Raw enum values.
    pub values: Vec<Value>,
}

/// Interface (protocol) schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSchema {
    /// Properties required by the protocol.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Interfaces this interface refines.
    #[serde(default)]
    pub parents: Vec<ScopedName>,
    /// Implementation generated for this interface, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<ScopedName>,
}

/// Hierarchy root produced for allOf with a discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySchema {
    /// Properties shared by all members.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Discriminator selecting a member.
    pub discriminator: Discriminator,
    /// Member schemas.
    #[serde(default)]
    pub members: Vec<ScopedName>,
}

/// Named wrapper around a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapperSchema {
    /// Wrapped value.
    pub property: Property,
}

/// One member of a oneOf schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOfMember {
    /// Explicit member name; assigned during post-processing when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Member type.
    #[serde(rename = "type")]
    pub type_spec: TypeSpec,
}

impl OneOfMember {
    /// Creates an unnamed member.
    #[must_use]
    pub const fn new(type_spec: TypeSpec) -> Self {
        Self {
            name: None,
            type_spec,
        }
    }
}

/// Exclusive choice schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOfSchema {
    /// Member types.
    pub members: Vec<OneOfMember>,
    /// Discriminator, if the choice is discriminated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
}

/// Schema kind variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaKind {
    /// Object with properties.
    Object(ObjectSchema),
    /// Enumeration.
    Enum(EnumSchema),
    /// Protocol.
    Interface(InterfaceSchema),
    /// Discriminated hierarchy root.
    Hierarchy(HierarchySchema),
    /// Single-value wrapper.
    Wrapper(WrapperSchema),
    /// Exclusive choice.
    OneOf(OneOfSchema),
}

impl SchemaKind {
    /// Classification of schemas of this kind.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        match self {
            Self::Object(_) => Classification::Object,
            Self::Enum(_) => Classification::Enum,
            Self::Interface(_) => Classification::Interface,
            Self::Hierarchy(_) => Classification::Hierarchy,
            Self::Wrapper(_) => Classification::Wrapper,
            Self::OneOf(_) => Classification::OneOf,
        }
    }

    /// Properties declared by this kind, if it has any.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        match self {
            Self::Object(o) => &o.properties,
            Self::Interface(i) => &i.properties,
            Self::Hierarchy(h) => &h.properties,
            Self::Wrapper(w) => std::slice::from_ref(&w.property),
            Self::Enum(_) | Self::OneOf(_) => &[],
        }
    }
}

/// Named schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema name.
    pub name: String,
    /// Full scoped name; its last segment is `name`.
    pub scoped_name: ScopedName,
    /// Schema description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Role of this schema.
    #[serde(default)]
    pub purpose: SchemaPurpose,
    /// Whether values of this schema may be null.
    #[serde(default)]
    pub nullable: bool,
    /// Kind-specific definition.
    #[serde(flatten)]
    pub kind: SchemaKind,
    /// Schemas scoped inside this one.
    #[serde(default)]
    pub nested: Vec<Schema>,
}

impl Schema {
    /// Creates a top-level schema.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        let name = name.into();
        Self {
            scoped_name: vec![name.clone()],
            name,
            description: None,
            purpose: SchemaPurpose::Model,
            nullable: false,
            kind,
            nested: Vec::new(),
        }
    }

    /// Classification of this schema.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.kind.classification()
    }

    /// Finds a nested schema by its path relative to this one.
    #[must_use]
    pub fn find_nested(&self, path: &[String]) -> Option<&Schema> {
        let (first, rest) = path.split_first()?;
        let child = self.nested.iter().find(|s| &s.name == first)?;
        if rest.is_empty() {
            Some(child)
        } else {
            child.find_nested(rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_default_distinguishes_null() {
        let absent: Property = serde_json::from_str(
            r#"{"name": "a", "type": {"schemaType": "STRING"}}"#,
        )
        .expect("Failed to parse");
        assert_eq!(absent.default, None);

        let null: Property = serde_json::from_str(
            r#"{"name": "a", "type": {"schemaType": "STRING"}, "default": null}"#,
        )
        .expect("Failed to parse");
        assert_eq!(null.default, Some(Value::Null));
    }

    #[test]
    fn test_property_serialized_name_falls_back() {
        let mut property = Property::new("firstName", TypeSpec::scalar(Classification::String, None), true);
        assert_eq!(property.serialized_name(), "firstName");
        property.serialized_name = Some("first_name".to_string());
        assert_eq!(property.serialized_name(), "first_name");
    }

    #[test]
    fn test_schema_kind_tagged() {
        let schema: Schema = serde_json::from_str(
            r#"{
                "name": "Colour",
                "scopedName": ["Colour"],
                "kind": "enum",
                "valueType": {"schemaType": "STRING"},
                "values": ["red", "green"]
            }"#,
        )
        .expect("Failed to parse");
        assert_eq!(schema.classification(), Classification::Enum);
        match &schema.kind {
            SchemaKind::Enum(e) => assert_eq!(e.values.len(), 2),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_find_nested() {
        let mut outer = Schema::new("Foo", SchemaKind::Object(ObjectSchema::default()));
        let mut inner = Schema::new("Bar", SchemaKind::Object(ObjectSchema::default()));
        inner.scoped_name = vec!["Foo".to_string(), "Bar".to_string()];
        outer.nested.push(inner);

        let found = outer.find_nested(&["Bar".to_string()]).expect("Failed to find");
        assert_eq!(found.scoped_name, vec!["Foo", "Bar"]);
        assert!(outer.find_nested(&["Baz".to_string()]).is_none());
    }

    #[test]
    fn test_type_spec_builders() {
        let spec = TypeSpec::map(
            TypeSpec::scalar(Classification::String, None),
            TypeSpec::array(TypeSpec::scalar(Classification::Integer, Some("int32"))),
        );
        assert_eq!(spec.schema_type, Classification::Map);
        let component = spec.component.as_deref().expect("Failed to get component");
        assert_eq!(component.schema_type, Classification::Array);
        assert_eq!(
            component.component.as_deref().and_then(TypeSpec::format),
            Some("int32")
        );
    }
}
