//! Native Swift type descriptors.
//!
//! A [`NativeType`] carries a Swift type expression plus the relations the
//! generator needs when composing it: the element or value type for
//! collections, the key type for dictionaries, the concrete type used to
//! instantiate values, and an optional supertype.
//!
//! Descriptors are immutable. Children are shared through [`Arc`], and every
//! composition builds a new descriptor instead of touching an existing one.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Describes a Swift type expression and its composition relations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeType {
    expression: String,
    component_type: Option<Arc<NativeType>>,
    key_type: Option<Arc<NativeType>>,
    concrete_type: Option<Arc<NativeType>>,
    parent_type: Option<Arc<NativeType>>,
}

impl NativeType {
    /// Creates a scalar or named type with the given expression.
    #[must_use]
    pub fn named(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            component_type: None,
            key_type: None,
            concrete_type: None,
            parent_type: None,
        }
    }

    /// Creates an array type `[C]` owning `component`.
    ///
    /// `C` is the component's full expression rather than only its outermost
    /// element, so arrays of arrays read `[[String]]`.
    #[must_use]
    pub fn array(component: NativeType) -> Self {
        let expression = format!("[{}]", component.composing_expression());
        Self {
            expression,
            component_type: Some(Arc::new(component)),
            key_type: None,
            concrete_type: None,
            parent_type: None,
        }
    }

    /// Creates a dictionary type `[K : V]` owning both `key` and `value`.
    ///
    /// # Errors
    /// Returns `Error::InvalidComposition` if the key is itself a collection.
    pub fn map(key: NativeType, value: NativeType) -> Result<Self> {
        if key.component_type.is_some() {
            return Err(Error::InvalidComposition {
                message: format!("dictionary key '{}' must be a scalar", key.expression),
            });
        }
        let expression = format!(
            "[{} : {}]",
            key.composing_expression(),
            value.composing_expression()
        );
        Ok(Self {
            expression,
            component_type: Some(Arc::new(value)),
            key_type: Some(Arc::new(key)),
            concrete_type: None,
            parent_type: None,
        })
    }

    /// Returns a copy of this type with an explicit concrete type.
    #[must_use]
    pub fn with_concrete(mut self, concrete: NativeType) -> Self {
        self.concrete_type = Some(Arc::new(concrete));
        self
    }

    /// Returns a copy of this type with a supertype.
    #[must_use]
    pub fn with_parent(mut self, parent: NativeType) -> Self {
        self.parent_type = Some(Arc::new(parent));
        self
    }

    /// The Swift type expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The expression used when this type is nested inside another.
    ///
    /// Swift generic and collection syntax accepts any type expression
    /// unchanged, so this is the full expression.
    #[must_use]
    pub fn composing_expression(&self) -> &str {
        &self.expression
    }

    /// Element type for arrays, value type for dictionaries.
    #[must_use]
    pub fn component_type(&self) -> Option<&NativeType> {
        self.component_type.as_deref()
    }

    /// Key type for dictionaries.
    #[must_use]
    pub fn key_type(&self) -> Option<&NativeType> {
        self.key_type.as_deref()
    }

    /// Type used to instantiate values; defaults to this type.
    #[must_use]
    pub fn concrete_type(&self) -> &NativeType {
        self.concrete_type.as_deref().unwrap_or(self)
    }

    /// Supertype, if any.
    #[must_use]
    pub fn parent_type(&self) -> Option<&NativeType> {
        self.parent_type.as_deref()
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.component_type.is_some() && self.key_type.is_none()
    }

    /// Returns true if this is a dictionary type.
    #[must_use]
    pub fn is_map(&self) -> bool {
        self.key_type.is_some()
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl Serialize for NativeType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.expression)
    }
}

/// Usage-site transformation applied to a [`NativeType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UsageTransform {
    /// Value may be explicitly null.
    pub nullable: bool,
    /// Value must be present.
    pub required: bool,
}

impl UsageTransform {
    /// Creates a usage transform.
    #[must_use]
    pub const fn new(nullable: bool, required: bool) -> Self {
        Self { nullable, required }
    }

    /// Wraps `native` for use at a property, parameter or response site.
    ///
    /// Nullable types become `Nullable<T>`, then optional types become `T?`.
    #[must_use]
    pub fn apply(&self, native: &NativeType) -> UsageType {
        let mut expression = native.expression().to_string();
        if self.nullable {
            expression = format!("Nullable<{expression}>");
        }
        if !self.required {
            expression.push('?');
        }
        UsageType {
            expression,
            native: native.clone(),
        }
    }
}

/// A [`NativeType`] after usage-site wrapping.
///
/// Only the usage expression changes; the concrete and parent types are those
/// of the wrapped type. A `UsageType` cannot be wrapped again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsageType {
    expression: String,
    native: NativeType,
}

impl UsageType {
    /// The wrapped Swift type expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The unwrapped type.
    #[must_use]
    pub fn native(&self) -> &NativeType {
        &self.native
    }

    /// Concrete type of the unwrapped type.
    #[must_use]
    pub fn concrete_type(&self) -> &NativeType {
        self.native.concrete_type()
    }

    /// Supertype of the unwrapped type.
    #[must_use]
    pub fn parent_type(&self) -> Option<&NativeType> {
        self.native.parent_type()
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl Serialize for UsageType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_concrete_defaults_to_self() {
        let string = NativeType::named("String");
        assert_eq!(string.expression(), "String");
        assert_eq!(string.concrete_type().expression(), "String");
        assert!(string.parent_type().is_none());
        assert!(!string.is_array());
    }

    #[test]
    fn test_array_composition() {
        let array = NativeType::array(NativeType::named("String"));
        assert_eq!(array.expression(), "[String]");
        assert!(array.is_array());
        assert_eq!(
            array.component_type().map(NativeType::expression),
            Some("String")
        );

        let nested = NativeType::array(array);
        assert_eq!(nested.expression(), "[[String]]");
    }

    #[test]
    fn test_map_composition() {
        let map = NativeType::map(NativeType::named("String"), NativeType::named("Int32"))
            .expect("Failed to compose");
        assert_eq!(map.expression(), "[String : Int32]");
        assert!(map.is_map());
        assert!(!map.is_array());
        assert_eq!(map.key_type().map(NativeType::expression), Some("String"));
    }

    #[test]
    fn test_map_rejects_collection_key() {
        let key = NativeType::array(NativeType::named("String"));
        let result = NativeType::map(key, NativeType::named("Int"));
        assert!(matches!(result, Err(Error::InvalidComposition { .. })));
    }

    #[test]
    fn test_composition_does_not_mutate_child() {
        let child = NativeType::named("Int");
        let array = NativeType::array(child.clone());
        let _map = NativeType::map(NativeType::named("String"), child.clone());
        assert_eq!(child.expression(), "Int");
        assert_eq!(array.component_type(), Some(&child));
    }

    #[test]
    fn test_usage_transform() {
        let string = NativeType::named("String");

        assert_eq!(UsageTransform::new(false, true).apply(&string).expression(), "String");
        assert_eq!(UsageTransform::new(false, false).apply(&string).expression(), "String?");
        assert_eq!(
            UsageTransform::new(true, true).apply(&string).expression(),
            "Nullable<String>"
        );
        assert_eq!(
            UsageTransform::new(true, false).apply(&string).expression(),
            "Nullable<String>?"
        );
    }

    #[test]
    fn test_usage_transform_keeps_concrete_and_parent() {
        let native = NativeType::named("Api.Dog").with_parent(NativeType::named("Api.Animal"));
        let usage = UsageTransform::new(true, false).apply(&native);
        assert_eq!(usage.concrete_type().expression(), "Api.Dog");
        assert_eq!(usage.parent_type().map(NativeType::expression), Some("Api.Animal"));
    }

    #[test]
    fn test_usage_transform_idempotent_on_raw_type() {
        let native = NativeType::named("Int");
        let transform = UsageTransform::new(true, false);
        let first = transform.apply(&native);
        let second = transform.apply(first.native());
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialize_as_expression() {
        let array = NativeType::array(NativeType::named("Bool"));
        let json = serde_json::to_string(&array).expect("Failed to serialize");
        assert_eq!(json, "\"[Bool]\"");
    }
}
