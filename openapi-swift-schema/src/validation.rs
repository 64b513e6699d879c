//! Document validation utilities.
//!
//! This module checks the structural consistency of an abstract document:
//! unique names, resolvable references and well-formed collection usages.

use crate::document::Document;
use crate::error::SchemaError;
use crate::types::{Property, Schema, SchemaKind, TypeSpec};
use openapi_swift_core::Classification;
use std::collections::HashSet;

/// Validates a document for structural correctness.
///
/// # Arguments
/// * `document` - The document to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_document(document: &Document) -> Result<(), SchemaError> {
    validate_schema_names(&document.schemas)?;
    for schema in document.all_schemas() {
        validate_schema(document, schema)?;
    }
    validate_operations(document)?;
    Ok(())
}

/// Validates that sibling schemas have distinct names and consistent scoped names.
fn validate_schema_names(schemas: &[Schema]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for schema in schemas {
        if !seen.insert(schema.name.as_str()) {
            return Err(SchemaError::duplicate("schema", schema.scoped_name.join(".")));
        }
        if schema.scoped_name.last() != Some(&schema.name) {
            return Err(SchemaError::ScopedNameMismatch {
                name: schema.name.clone(),
                scoped_name: schema.scoped_name.join("."),
            });
        }
        validate_schema_names(&schema.nested)?;
    }
    Ok(())
}

/// Validates a single schema definition.
fn validate_schema(document: &Document, schema: &Schema) -> Result<(), SchemaError> {
    let context = schema.scoped_name.join(".");
    validate_properties(document, &context, schema.kind.properties())?;

    match &schema.kind {
        SchemaKind::Object(object) => {
            if let Some(parent) = &object.parent {
                validate_reference(document, parent, &context)?;
            }
            for interface in &object.implements {
                validate_reference(document, interface, &context)?;
            }
        }
        SchemaKind::Enum(enum_schema) => {
            if enum_schema.values.is_empty() {
                return Err(SchemaError::EmptyEnum {
                    name: schema.name.clone(),
                });
            }
            validate_type_spec(document, &enum_schema.value_type, &context)?;
        }
        SchemaKind::Interface(interface) => {
            for parent in &interface.parents {
                validate_reference(document, parent, &context)?;
            }
        }
        SchemaKind::Hierarchy(hierarchy) => {
            for member in &hierarchy.members {
                validate_reference(document, member, &context)?;
            }
            for mapping in &hierarchy.discriminator.mappings {
                validate_reference(document, &mapping.scoped_name, &context)?;
            }
        }
        SchemaKind::Wrapper(_) => {}
        SchemaKind::OneOf(one_of) => {
            let mut names = HashSet::new();
            for member in &one_of.members {
                if let Some(name) = &member.name {
                    if !names.insert(name.as_str()) {
                        return Err(SchemaError::duplicate(
                            "oneOf member",
                            format!("{context}.{name}"),
                        ));
                    }
                }
                validate_type_spec(document, &member.type_spec, &context)?;
            }
        }
    }
    Ok(())
}

/// Validates property names and types.
fn validate_properties(
    document: &Document,
    context: &str,
    properties: &[Property],
) -> Result<(), SchemaError> {
    let mut names = HashSet::new();
    for property in properties {
        if !names.insert(property.name.as_str()) {
            return Err(SchemaError::duplicate(
                "property",
                format!("{context}.{}", property.name),
            ));
        }
        validate_type_spec(
            document,
            &property.type_spec,
            &format!("{context}.{}", property.name),
        )?;
    }
    Ok(())
}

/// Validates a type usage recursively.
fn validate_type_spec(
    document: &Document,
    spec: &TypeSpec,
    context: &str,
) -> Result<(), SchemaError> {
    match spec.schema_type {
        Classification::Array => {
            let component = spec.component.as_deref().ok_or_else(|| missing(spec, "component", context))?;
            validate_type_spec(document, component, context)
        }
        Classification::Map => {
            let component = spec.component.as_deref().ok_or_else(|| missing(spec, "component", context))?;
            let key = spec.key.as_deref().ok_or_else(|| missing(spec, "key", context))?;
            validate_type_spec(document, key, context)?;
            validate_type_spec(document, component, context)
        }
        c if c.is_named() => match &spec.scoped_name {
            Some(scoped_name) => validate_reference(document, scoped_name, context),
            None => Err(SchemaError::validation(format!(
                "{c} usage in '{context}' has no scoped name"
            ))),
        },
        _ => Ok(()),
    }
}

fn missing(spec: &TypeSpec, part: &str, context: &str) -> SchemaError {
    SchemaError::MissingComponent {
        classification: spec.schema_type.to_string(),
        part: part.to_string(),
        context: context.to_string(),
    }
}

fn validate_reference(
    document: &Document,
    scoped_name: &[String],
    context: &str,
) -> Result<(), SchemaError> {
    if document.has_schema(scoped_name) {
        Ok(())
    } else {
        Err(SchemaError::UnknownReference {
            name: scoped_name.join("."),
            context: context.to_string(),
        })
    }
}

/// Validates operation names, parameters and bodies.
fn validate_operations(document: &Document) -> Result<(), SchemaError> {
    for group in &document.groups {
        let mut names = HashSet::new();
        for operation in &group.operations {
            if !names.insert(operation.name.as_str()) {
                return Err(SchemaError::duplicate(
                    "operation",
                    format!("{}.{}", group.name, operation.name),
                ));
            }
            let context = format!("{}.{}", group.name, operation.name);
            for parameter in &operation.parameters {
                validate_type_spec(document, &parameter.type_spec, &context)?;
            }
            if let Some(body) = &operation.request_body {
                validate_type_spec(document, &body.type_spec, &context)?;
            }
            for response in &operation.responses {
                if let Some(spec) = &response.type_spec {
                    validate_type_spec(document, spec, &context)?;
                }
            }
        }
    }
    Ok(())
}
