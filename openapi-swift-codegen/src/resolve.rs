//! Schema to native type resolution.
//!
//! Maps classifications onto Swift types and composes arrays, dictionaries
//! and object references from abstract type usages.

use crate::error::{CodegenError, Result};
use crate::literal::TypeContext;
use crate::naming::NamingConvention;
use openapi_swift_core::{Classification, NativeType};
use openapi_swift_schema::TypeSpec;

/// Maps a scalar classification and format onto a Swift type.
///
/// # Errors
/// Returns `CodegenError::UnsupportedFormat` for unknown integer or number
/// formats and `CodegenError::UnsupportedSchemaType` for composite
/// classifications.
pub fn to_native_type(classification: Classification, format: Option<&str>) -> Result<NativeType> {
    let unsupported_format = |format: &str| CodegenError::UnsupportedFormat {
        classification,
        format: format.to_string(),
    };

    let expression = match classification {
        Classification::Integer => match format {
            None => "Int",
            Some("int32") => "Int32",
            Some("int64") => "Int64",
            Some(other) => return Err(unsupported_format(other)),
        },
        Classification::Number => match format {
            None => "Decimal",
            Some("float") => "Float",
            Some("double") => "Double",
            Some(other) => return Err(unsupported_format(other)),
        },
        Classification::String => match format {
            Some("url") => "URL",
            _ => "String",
        },
        Classification::Date => "LocalDate",
        Classification::Time => "LocalTime",
        Classification::DateTime => "OffsetDateTime",
        Classification::Boolean => "Bool",
        Classification::Binary => "Data",
        Classification::File => "File",
        Classification::Any => "Any",
        Classification::Array
        | Classification::Map
        | Classification::Object
        | Classification::Enum
        | Classification::OneOf
        | Classification::Interface
        | Classification::Hierarchy
        | Classification::Wrapper => {
            return Err(CodegenError::UnsupportedSchemaType { classification });
        }
    };
    Ok(NativeType::named(expression))
}

/// Resolves abstract type usages into native types.
pub struct TypeResolver<'a, N: NamingConvention + ?Sized> {
    naming: &'a N,
    package: Option<&'a str>,
}

impl<'a, N: NamingConvention + ?Sized> TypeResolver<'a, N> {
    /// Creates a resolver qualifying object types with `package`.
    #[must_use]
    pub fn new(naming: &'a N, package: Option<&'a str>) -> Self {
        Self { naming, package }
    }

    /// Builds the fully qualified type of a named schema.
    #[must_use]
    pub fn to_native_object_type(&self, scoped_name: &[String]) -> NativeType {
        let mut expression = self.package.unwrap_or_default().to_string();
        for name in scoped_name {
            if !expression.is_empty() {
                expression.push('.');
            }
            expression.push_str(&self.naming.to_class_name(name));
        }
        NativeType::named(expression)
    }

    /// Builds an array of `component`.
    #[must_use]
    pub fn to_native_array_type(&self, component: NativeType) -> NativeType {
        NativeType::array(component)
    }

    /// Builds a dictionary from `key` to `value`.
    ///
    /// # Errors
    /// Returns an error if the key is not a scalar type.
    pub fn to_native_map_type(&self, key: NativeType, value: NativeType) -> Result<NativeType> {
        Ok(NativeType::map(key, value)?)
    }

    /// Resolves a type usage recursively.
    ///
    /// # Errors
    /// Returns an error if a classification or format is unsupported, a
    /// collection lacks its component or key, or a map key is not STRING or
    /// INTEGER.
    pub fn resolve(&self, spec: &TypeSpec, context: &str) -> Result<NativeType> {
        match spec.schema_type {
            Classification::Array => {
                let component = component_of(spec)?;
                Ok(self.to_native_array_type(self.resolve(component, context)?))
            }
            Classification::Map => {
                let component = component_of(spec)?;
                let key = spec.key.as_deref().ok_or_else(|| CodegenError::MissingComponent {
                    classification: spec.schema_type,
                    part: "key".to_string(),
                })?;
                if !key.schema_type.is_map_key() {
                    return Err(CodegenError::InvalidMapKey {
                        classification: key.schema_type,
                        context: context.to_string(),
                    });
                }
                let key = self.resolve(key, context)?;
                let value = self.resolve(component, context)?;
                self.to_native_map_type(key, value)
            }
            c if c.is_named() => match &spec.scoped_name {
                Some(scoped_name) => Ok(self.to_native_object_type(scoped_name)),
                None => Err(CodegenError::UnknownSchema {
                    name: format!("<unnamed {c} in {context}>"),
                }),
            },
            c => to_native_type(c, spec.format()),
        }
    }

    /// Builds the literal context of a type usage.
    ///
    /// # Errors
    /// Returns an error if the usage cannot be resolved.
    pub fn type_context(&self, spec: &TypeSpec, required: bool, context: &str) -> Result<TypeContext> {
        let native_type = self.resolve(spec, context)?;
        let component = match spec.schema_type {
            Classification::Array | Classification::Map => {
                Some(self.type_context(component_of(spec)?, true, context)?)
            }
            _ => None,
        };
        Ok(TypeContext {
            schema_type: spec.schema_type,
            format: spec.format.clone(),
            native_type,
            required,
            nullable: spec.nullable,
            component: component.map(Box::new),
        })
    }
}

fn component_of(spec: &TypeSpec) -> Result<&TypeSpec> {
    spec.component
        .as_deref()
        .ok_or_else(|| CodegenError::MissingComponent {
            classification: spec.schema_type,
            part: "component".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SwiftNaming;

    fn expr(classification: Classification, format: Option<&str>) -> String {
        to_native_type(classification, format)
            .expect("Failed to resolve")
            .expression()
            .to_string()
    }

    #[test]
    fn test_scalar_table() {
        assert_eq!(expr(Classification::Integer, None), "Int");
        assert_eq!(expr(Classification::Integer, Some("int32")), "Int32");
        assert_eq!(expr(Classification::Integer, Some("int64")), "Int64");
        assert_eq!(expr(Classification::Number, None), "Decimal");
        assert_eq!(expr(Classification::Number, Some("float")), "Float");
        assert_eq!(expr(Classification::Number, Some("double")), "Double");
        assert_eq!(expr(Classification::String, Some("url")), "URL");
        assert_eq!(expr(Classification::String, Some("email")), "String");
        assert_eq!(expr(Classification::String, None), "String");
        assert_eq!(expr(Classification::Date, Some("date")), "LocalDate");
        assert_eq!(expr(Classification::Time, None), "LocalTime");
        assert_eq!(expr(Classification::DateTime, None), "OffsetDateTime");
        assert_eq!(expr(Classification::Boolean, None), "Bool");
        assert_eq!(expr(Classification::Binary, None), "Data");
        assert_eq!(expr(Classification::File, None), "File");
        assert_eq!(expr(Classification::Any, None), "Any");
    }

    #[test]
    fn test_unsupported_format() {
        let err = to_native_type(Classification::Integer, Some("int16")).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnsupportedFormat { classification: Classification::Integer, ref format } if format == "int16"
        ));
        assert!(matches!(
            to_native_type(Classification::Number, Some("decimal")),
            Err(CodegenError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_composite_not_scalar() {
        for classification in [Classification::Array, Classification::Object, Classification::OneOf] {
            assert!(matches!(
                to_native_type(classification, None),
                Err(CodegenError::UnsupportedSchemaType { .. })
            ));
        }
    }

    #[test]
    fn test_object_type() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let native = resolver.to_native_object_type(&["foo".to_string(), "bar baz".to_string()]);
        assert_eq!(native.expression(), "Api.Foo.BarBaz");

        let unqualified = TypeResolver::new(&SwiftNaming, None);
        assert_eq!(
            unqualified.to_native_object_type(&["Foo".to_string()]).expression(),
            "Foo"
        );
    }

    #[test]
    fn test_resolve_collections() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let spec = TypeSpec::map(
            TypeSpec::scalar(Classification::String, None),
            TypeSpec::array(TypeSpec::array(TypeSpec::named(Classification::Object, ["Pet"]))),
        );
        let native = resolver.resolve(&spec, "test").expect("Failed to resolve");
        assert_eq!(native.expression(), "[String : [[Api.Pet]]]");
    }

    #[test]
    fn test_resolve_invalid_map_key() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let spec = TypeSpec::map(
            TypeSpec::scalar(Classification::Boolean, None),
            TypeSpec::scalar(Classification::String, None),
        );
        assert!(matches!(
            resolver.resolve(&spec, "test"),
            Err(CodegenError::InvalidMapKey { classification: Classification::Boolean, .. })
        ));
    }

    #[test]
    fn test_resolve_missing_component() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let spec = TypeSpec::scalar(Classification::Array, None);
        assert!(matches!(
            resolver.resolve(&spec, "test"),
            Err(CodegenError::MissingComponent { .. })
        ));
    }

    #[test]
    fn test_type_context_component() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let spec = TypeSpec::array(TypeSpec::scalar(Classification::Integer, Some("int32")));
        let ctx = resolver.type_context(&spec, false, "test").expect("Failed to build");
        assert_eq!(ctx.native_type.expression(), "[Int32]");
        assert!(!ctx.required);
        let component = ctx.component.as_deref().expect("Failed to get component");
        assert_eq!(component.native_type.expression(), "Int32");
        assert!(component.required);
    }
}
