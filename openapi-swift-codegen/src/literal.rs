//! Swift literal synthesis.
//!
//! Turns JSON values from the document into Swift source literals that match
//! the native type chosen for them.

use crate::defaults::default_value;
use crate::error::{CodegenError, Result};
use crate::naming::{EnumMemberStyle, NamingConvention};
use openapi_swift_core::{Classification, NativeType};
use serde_json::Value;

/// Literal context of a type usage.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeContext {
    /// Classification of the value.
    pub schema_type: Classification,
    /// Format qualifier.
    pub format: Option<String>,
    /// Resolved native type.
    pub native_type: NativeType,
    /// Whether the value must be present.
    pub required: bool,
    /// Whether the value may be null.
    pub nullable: bool,
    /// Element context for arrays, value context for maps.
    pub component: Option<Box<TypeContext>>,
}

impl TypeContext {
    /// Creates a required, non-nullable context without a component.
    #[must_use]
    pub fn new(schema_type: Classification, native_type: NativeType) -> Self {
        Self {
            schema_type,
            format: None,
            native_type,
            required: true,
            nullable: false,
            component: None,
        }
    }

    /// Returns a copy with the given format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Returns a copy with the given required flag.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns a copy with a component context.
    #[must_use]
    pub fn with_component(mut self, component: TypeContext) -> Self {
        self.component = Some(Box::new(component));
        self
    }

    fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

/// Escapes a string for use inside a Swift string literal.
#[must_use]
pub fn escape_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

/// Produces Swift literals for values of a resolved type.
pub struct LiteralSynthesizer<'a, N: NamingConvention + ?Sized> {
    naming: &'a N,
    enum_member_style: EnumMemberStyle,
}

impl<'a, N: NamingConvention + ?Sized> LiteralSynthesizer<'a, N> {
    /// Creates a synthesizer naming enum members with `enum_member_style`.
    #[must_use]
    pub fn new(naming: &'a N, enum_member_style: EnumMemberStyle) -> Self {
        Self {
            naming,
            enum_member_style,
        }
    }

    /// Converts a value into a Swift literal.
    ///
    /// An absent value yields the literal of the default value for `ctx`, if
    /// it has one. An explicit null yields `nil`.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedLiteral` if the value cannot be
    /// written for the classification of `ctx`.
    pub fn to_literal(&self, value: Option<&Value>, ctx: &TypeContext) -> Result<Option<String>> {
        let Some(value) = value else {
            let default = default_value(ctx, |v, c| self.to_literal(Some(v), c))?;
            return Ok(default.map(|d| d.literal_value));
        };
        self.literal_of(value, ctx).map(Some)
    }

    fn literal_of(&self, value: &Value, ctx: &TypeContext) -> Result<String> {
        if value.is_null() {
            return Ok("nil".to_string());
        }

        match ctx.schema_type {
            Classification::Enum => {
                let member = self
                    .naming
                    .to_enum_member_name(&scalar_text(value, ctx)?, self.enum_member_style);
                Ok(format!(
                    "{}.{}",
                    ctx.native_type.concrete_type().expression(),
                    member
                ))
            }
            Classification::Integer | Classification::Number | Classification::Boolean => {
                scalar_text(value, ctx)
            }
            Classification::String
            | Classification::Date
            | Classification::Time
            | Classification::DateTime
            | Classification::Binary => {
                let text = scalar_text(value, ctx)?;
                Ok(string_literal(ctx.schema_type, ctx.format(), &text))
            }
            Classification::Array => {
                let component = ctx.component.as_deref().ok_or_else(|| {
                    CodegenError::unsupported_literal(
                        ctx.schema_type,
                        format!("array literal without a component type: {value}"),
                    )
                })?;
                let items = match value {
                    Value::Array(items) => items.as_slice(),
                    single => std::slice::from_ref(single),
                };
                let literals = items
                    .iter()
                    .map(|item| self.literal_of(item, component))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("[{}]", literals.join(", ")))
            }
            Classification::Object
            | Classification::Map
            | Classification::OneOf
            | Classification::Interface
            | Classification::Hierarchy
            | Classification::Wrapper => {
                tracing::warn!(
                    "Literal value is unsupported for schema type {}: {}",
                    ctx.schema_type,
                    value
                );
                Ok("nil".to_string())
            }
            Classification::File | Classification::Any => Err(CodegenError::unsupported_literal(
                ctx.schema_type,
                format!("cannot format literal {value}"),
            )),
        }
    }
}

/// Textual form of a scalar value; strings are returned unquoted.
fn scalar_text(value: &Value, ctx: &TypeContext) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CodegenError::unsupported_literal(
            ctx.schema_type,
            format!("expected a scalar value, found {other}"),
        )),
    }
}

fn string_literal(classification: Classification, format: Option<&str>, text: &str) -> String {
    match (classification, format) {
        (Classification::Date, _) | (_, Some("date")) => {
            format!("DateFormatter.ISO8601DATE.date(from: \"{text}\")")
        }
        (Classification::Time, _) | (_, Some("time")) => {
            format!("DateFormatter.ISO8601TIME.date(from: \"{text}\")")
        }
        (Classification::DateTime, _) | (_, Some("date-time")) => {
            format!("DateFormatter.ISO8601DATETIME.date(from: \"{text}\")")
        }
        (Classification::Binary, _) | (_, Some("binary")) => {
            format!("\"{}\".data(using: .utf8)!", escape_string(text))
        }
        _ => format!("\"{}\"", escape_string(text)),
    }
}
