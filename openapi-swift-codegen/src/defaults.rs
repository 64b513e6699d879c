//! Default and initial values.
//!
//! The literal function is passed in by the caller so that default values
//! use the same literal rules as explicit values.

use crate::error::Result;
use crate::literal::TypeContext;
use openapi_swift_core::Classification;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// A value together with its Swift literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultValue {
    /// Raw value.
    pub value: Value,
    /// Swift literal for `value`.
    pub literal_value: String,
}

impl DefaultValue {
    /// Creates a default value.
    #[must_use]
    pub fn new(value: Value, literal_value: impl Into<String>) -> Self {
        Self {
            value,
            literal_value: literal_value.into(),
        }
    }

    /// The `nil` default of optional values.
    #[must_use]
    pub fn nil() -> Self {
        Self::new(Value::Null, "nil")
    }
}

/// Returns the value a missing value of `ctx` takes.
///
/// Optional values default to `nil`. Required numbers, integers, booleans,
/// arrays and maps default to their zero value. Other required values have no
/// default.
///
/// # Errors
/// Propagates errors from `literal`.
pub fn default_value<F>(ctx: &TypeContext, literal: F) -> Result<Option<DefaultValue>>
where
    F: Fn(&Value, &TypeContext) -> Result<Option<String>>,
{
    if !ctx.required {
        return Ok(Some(DefaultValue::nil()));
    }

    let zero = |value: Value| -> Result<Option<DefaultValue>> {
        Ok(literal(&value, ctx)?.map(|literal_value| DefaultValue::new(value, literal_value)))
    };

    match ctx.schema_type {
        Classification::Number => zero(json!(0.0)),
        Classification::Integer => zero(json!(0)),
        Classification::Boolean => Ok(Some(DefaultValue::new(json!(false), "false"))),
        Classification::Array => Ok(Some(DefaultValue::new(json!([]), "[]"))),
        Classification::Map => Ok(Some(DefaultValue::new(Value::Object(Map::new()), "[:]"))),
        _ => Ok(None),
    }
}

/// Returns the value a property or parameter is initialised with.
///
/// An explicit default is used as is. Otherwise optional values have no
/// initial value and required values start at their [`default_value`].
///
/// Defaults describe what a receiver fills in for a missing value. Using
/// them as initial values also pre-populates values that are sent, so a sent
/// message carries the default instead of omitting it.
///
/// # Errors
/// Propagates errors from `literal`.
pub fn initial_value<F>(
    ctx: &TypeContext,
    explicit_default: Option<&DefaultValue>,
    literal: F,
) -> Result<Option<DefaultValue>>
where
    F: Fn(&Value, &TypeContext) -> Result<Option<String>>,
{
    if let Some(explicit) = explicit_default {
        return Ok(Some(explicit.clone()));
    }
    if !ctx.required {
        return Ok(None);
    }
    default_value(ctx, literal)
}
