//! Document post-processing.
//!
//! Names the members of oneOf schemas, resolves every schema, property,
//! parameter and body to its Swift type, computes default and initial
//! values, and checks that inherited properties are compatible.

use crate::defaults::{DefaultValue, initial_value};
use crate::error::{CodegenError, Result};
use crate::ir::{
    ResolvedDiscriminator, ResolvedEnum, ResolvedEnumMember, ResolvedGroup, ResolvedHierarchy,
    ResolvedInterface, ResolvedMapping, ResolvedObject, ResolvedOneOf, ResolvedOneOfMember,
    ResolvedOperation, ResolvedParameter, ResolvedProperty, ResolvedRequestBody,
    ResolvedResponse, ResolvedSchema, ResolvedSchemaKind, ResolvedWrapper,
};
use crate::literal::{LiteralSynthesizer, TypeContext};
use crate::naming::{EnumMemberStyle, NamingConvention};
use crate::resolve::TypeResolver;
use crate::strategy::{CompositionStrategy, SuggestedNameOptions, to_suggested_schema_name};
use openapi_swift_core::{NativeType, UsageTransform};
use openapi_swift_schema::{
    Discriminator, Document, OneOfMember, Operation, OperationGroup, Parameter, Property, Schema,
    SchemaKind,
};
use serde_json::Value;
use std::collections::HashSet;

/// Returns true if `child` may override `parent`.
///
/// Swift models use `Nullable` for nullable values and protocols for allOf,
/// so an override must keep the type, the nullability and the required flag.
#[must_use]
pub fn check_property_compatibility(parent: &ResolvedProperty, child: &ResolvedProperty) -> bool {
    incompatibility(parent, child).is_none()
}

fn incompatibility(parent: &ResolvedProperty, child: &ResolvedProperty) -> Option<String> {
    if parent.native_type.expression() != child.native_type.expression() {
        return Some(format!(
            "type {} does not match {}",
            child.native_type, parent.native_type
        ));
    }
    if parent.nullable != child.nullable {
        return Some(format!(
            "nullable {} does not match {}",
            child.nullable, parent.nullable
        ));
    }
    if parent.required != child.required {
        return Some(format!(
            "required {} does not match {}",
            child.required, parent.required
        ));
    }
    None
}

/// Name suggested for a oneOf member of the given type.
#[must_use]
pub fn suggested_name_for_type(native_type: &NativeType) -> String {
    match native_type.component_type() {
        Some(component) if native_type.is_array() => format!("{}_array", component.expression()),
        _ => native_type.expression().to_string(),
    }
}

/// Returns a class name derived from `suggested` that is not yet in `scope`, and adds it.
///
/// `scope` holds both names and their Swift identifiers, so two names that
/// differ only in case never produce the same enum case.
pub fn unique_name<N: NamingConvention + ?Sized>(
    suggested: &str,
    scope: &mut HashSet<String>,
    options: SuggestedNameOptions,
    naming: &N,
) -> String {
    let base = naming.to_class_name(&to_suggested_schema_name(suggested, options));
    let mut candidate = base.clone();
    let mut counter = 1;
    while scope.contains(&candidate) || scope.contains(&naming.to_identifier(&candidate)) {
        candidate = format!("{base}{counter}");
        counter += 1;
    }
    scope.insert(naming.to_identifier(&candidate));
    scope.insert(candidate.clone());
    candidate
}

/// Assigns a unique name to every unnamed oneOf member in `schema` and its nested schemas.
///
/// Explicit member names and nested schema names are reserved first.
///
/// # Errors
/// Returns an error if a member type cannot be resolved.
pub fn name_one_of_members<N: NamingConvention + ?Sized>(
    schema: &mut Schema,
    resolver: &TypeResolver<'_, N>,
    naming: &N,
) -> Result<()> {
    for nested in &mut schema.nested {
        name_one_of_members(nested, resolver, naming)?;
    }

    let context = schema.scoped_name.join(".");
    let mut scope: HashSet<String> = schema
        .nested
        .iter()
        .map(|n| naming.to_class_name(&n.name))
        .collect();

    let SchemaKind::OneOf(one_of) = &mut schema.kind else {
        return Ok(());
    };

    for name in one_of.members.iter().filter_map(|m| m.name.as_deref()) {
        scope.insert(naming.to_identifier(name));
        scope.insert(name.to_string());
    }

    for member in &mut one_of.members {
        if member.name.is_some() {
            continue;
        }
        let native_type = resolver.resolve(&member.type_spec, &context)?;
        let options = SuggestedNameOptions {
            schema_type: member.type_spec.schema_type,
            purpose: member.type_spec.purpose,
        };
        let name = unique_name(&suggested_name_for_type(&native_type), &mut scope, options, naming);
        tracing::debug!("Named oneOf member of {} as {}", context, name);
        member.name = Some(name);
    }
    Ok(())
}

/// Resolves a document whose oneOf members have been named.
pub struct PostProcessor<'a, N: NamingConvention + ?Sized> {
    document: &'a Document,
    naming: &'a N,
    strategy: &'a dyn CompositionStrategy,
    resolver: TypeResolver<'a, N>,
    literals: LiteralSynthesizer<'a, N>,
    enum_member_style: EnumMemberStyle,
}

impl<'a, N: NamingConvention + ?Sized> PostProcessor<'a, N> {
    /// Creates a post-processor qualifying types with `package`.
    #[must_use]
    pub fn new(
        document: &'a Document,
        naming: &'a N,
        strategy: &'a dyn CompositionStrategy,
        package: Option<&'a str>,
        enum_member_style: EnumMemberStyle,
    ) -> Self {
        Self {
            document,
            naming,
            strategy,
            resolver: TypeResolver::new(naming, package),
            literals: LiteralSynthesizer::new(naming, enum_member_style),
            enum_member_style,
        }
    }

    /// Resolves all operation groups.
    ///
    /// # Errors
    /// Returns the first resolution error.
    pub fn resolve_groups(&self) -> Result<Vec<ResolvedGroup>> {
        self.document
            .groups
            .iter()
            .map(|group| self.resolve_group(group))
            .collect()
    }

    /// Resolves all schemas.
    ///
    /// # Errors
    /// Returns the first resolution, nesting or compatibility error.
    pub fn resolve_schemas(&self) -> Result<Vec<ResolvedSchema>> {
        self.document
            .schemas
            .iter()
            .map(|schema| self.resolve_schema(schema, 0))
            .collect()
    }

    fn literal_fn(&self) -> impl Fn(&Value, &TypeContext) -> Result<Option<String>> + '_ {
        move |value: &Value, ctx: &TypeContext| self.literals.to_literal(Some(value), ctx)
    }

    fn explicit_default(&self, value: Option<&Value>, ctx: &TypeContext) -> Result<Option<DefaultValue>> {
        value
            .map(|value| {
                let literal = self.literals.to_literal(Some(value), ctx)?;
                Ok(DefaultValue::new(
                    value.clone(),
                    literal.unwrap_or_else(|| "nil".to_string()),
                ))
            })
            .transpose()
    }

    fn resolve_property(&self, property: &Property, context: &str) -> Result<ResolvedProperty> {
        let context = format!("{context}.{}", property.name);
        let ctx = self
            .resolver
            .type_context(&property.type_spec, property.required, &context)?;
        let usage_type =
            UsageTransform::new(property.nullable(), property.required).apply(&ctx.native_type);
        let default_value = self.explicit_default(property.default.as_ref(), &ctx)?;
        let initial_value = initial_value(&ctx, default_value.as_ref(), self.literal_fn())?;

        Ok(ResolvedProperty {
            name: property.name.clone(),
            identifier: self.naming.to_identifier(&property.name),
            serialized_name: property.serialized_name().to_string(),
            description: property.description.clone(),
            required: property.required,
            nullable: property.nullable(),
            schema_type: property.type_spec.schema_type,
            native_type: ctx.native_type,
            usage_type,
            default_value,
            initial_value,
        })
    }

    fn resolve_properties(&self, properties: &[Property], context: &str) -> Result<Vec<ResolvedProperty>> {
        properties
            .iter()
            .map(|p| self.resolve_property(p, context))
            .collect()
    }

    /// Checks the properties of `schema` against those it inherits from `parent_ref`.
    fn check_overrides(
        &self,
        schema: &Schema,
        parent_ref: &[String],
        properties: &[ResolvedProperty],
    ) -> Result<()> {
        let parent = self
            .document
            .find_schema(parent_ref)
            .ok_or_else(|| CodegenError::unknown_schema(parent_ref))?;
        let parent_context = parent.scoped_name.join(".");

        for parent_property in parent.kind.properties() {
            let Some(child) = properties.iter().find(|p| p.name == parent_property.name) else {
                continue;
            };
            let resolved_parent = self.resolve_property(parent_property, &parent_context)?;
            if let Some(reason) = incompatibility(&resolved_parent, child) {
                return Err(CodegenError::IncompatibleProperty {
                    schema: schema.scoped_name.join("."),
                    parent: parent_context,
                    property: child.name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn resolve_discriminator(
        &self,
        discriminator: &Discriminator,
        members: &[OneOfMember],
    ) -> ResolvedDiscriminator {
        let mappings = discriminator
            .mappings
            .iter()
            .map(|mapping| {
                let member_name = members
                    .iter()
                    .find(|m| m.type_spec.scoped_name.as_ref() == Some(&mapping.scoped_name))
                    .and_then(|m| m.name.as_deref())
                    .or_else(|| mapping.scoped_name.last().map(String::as_str))
                    .unwrap_or(mapping.value.as_str());
                ResolvedMapping {
                    value: mapping.value.clone(),
                    native_type: self.resolver.to_native_object_type(&mapping.scoped_name),
                    member_name: self.naming.to_identifier(member_name),
                }
            })
            .collect();

        ResolvedDiscriminator {
            name: discriminator.name.clone(),
            identifier: self.naming.to_identifier(&discriminator.name),
            serialized_name: discriminator
                .serialized_name
                .clone()
                .unwrap_or_else(|| discriminator.name.clone()),
            mappings,
        }
    }

    fn resolve_schema(&self, schema: &Schema, depth: usize) -> Result<ResolvedSchema> {
        let context = schema.scoped_name.join(".");
        if depth > 0
            && matches!(schema.kind, SchemaKind::Interface(_))
            && !self.strategy.interface_can_be_nested()
        {
            return Err(CodegenError::NestedInterface { name: context });
        }

        let kind = match &schema.kind {
            SchemaKind::Object(object) => {
                let properties = self.resolve_properties(&object.properties, &context)?;
                for parent_ref in object.parent.iter().chain(&object.implements) {
                    self.check_overrides(schema, parent_ref, &properties)?;
                }
                ResolvedSchemaKind::Object(ResolvedObject {
                    properties,
                    parent: object
                        .parent
                        .as_ref()
                        .map(|p| self.resolver.to_native_object_type(p)),
                    implements: object
                        .implements
                        .iter()
                        .map(|i| self.resolver.to_native_object_type(i))
                        .collect(),
                    discriminator: object
                        .discriminator
                        .as_ref()
                        .map(|d| self.resolve_discriminator(d, &[])),
                })
            }
            SchemaKind::Enum(enum_schema) => {
                let value_ctx = self
                    .resolver
                    .type_context(&enum_schema.value_type, true, &context)?;
                let members = enum_schema
                    .values
                    .iter()
                    .map(|value| {
                        let text = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        let literal_value = self
                            .literals
                            .to_literal(Some(value), &value_ctx)?
                            .unwrap_or_else(|| "nil".to_string());
                        Ok(ResolvedEnumMember {
                            name: self.naming.to_enum_member_name(&text, self.enum_member_style),
                            value: value.clone(),
                            literal_value,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                ResolvedSchemaKind::Enum(ResolvedEnum {
                    value_native_type: value_ctx.native_type,
                    members,
                })
            }
            SchemaKind::Interface(interface) => {
                let properties = self.resolve_properties(&interface.properties, &context)?;
                for parent_ref in &interface.parents {
                    self.check_overrides(schema, parent_ref, &properties)?;
                }
                ResolvedSchemaKind::Interface(ResolvedInterface {
                    properties,
                    parents: interface
                        .parents
                        .iter()
                        .map(|p| self.resolver.to_native_object_type(p))
                        .collect(),
                    implementation: interface
                        .implementation
                        .as_ref()
                        .map(|i| self.resolver.to_native_object_type(i)),
                })
            }
            SchemaKind::Hierarchy(hierarchy) => ResolvedSchemaKind::Hierarchy(ResolvedHierarchy {
                properties: self.resolve_properties(&hierarchy.properties, &context)?,
                discriminator: self.resolve_discriminator(&hierarchy.discriminator, &[]),
                members: hierarchy
                    .members
                    .iter()
                    .map(|m| self.resolver.to_native_object_type(m))
                    .collect(),
            }),
            SchemaKind::Wrapper(wrapper) => ResolvedSchemaKind::Wrapper(ResolvedWrapper {
                property: self.resolve_property(&wrapper.property, &context)?,
            }),
            SchemaKind::OneOf(one_of) => {
                let members = one_of
                    .members
                    .iter()
                    .map(|member| {
                        let native_type = self.resolver.resolve(&member.type_spec, &context)?;
                        let name = member
                            .name
                            .clone()
                            .unwrap_or_else(|| suggested_name_for_type(&native_type));
                        Ok(ResolvedOneOfMember {
                            identifier: self.naming.to_identifier(&name),
                            name,
                            schema_type: member.type_spec.schema_type,
                            native_type,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                ResolvedSchemaKind::OneOf(ResolvedOneOf {
                    members,
                    discriminator: one_of
                        .discriminator
                        .as_ref()
                        .map(|d| self.resolve_discriminator(d, &one_of.members)),
                })
            }
        };

        let nested = schema
            .nested
            .iter()
            .map(|n| self.resolve_schema(n, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedSchema {
            name: schema.name.clone(),
            class_name: self.naming.to_class_name(&schema.name),
            scoped_name: schema.scoped_name.clone(),
            description: schema.description.clone(),
            purpose: schema.purpose,
            nullable: schema.nullable,
            schema_type: schema.classification(),
            native_type: self.resolver.to_native_object_type(&schema.scoped_name),
            kind,
            nested,
        })
    }

    fn resolve_parameter(&self, parameter: &Parameter, context: &str) -> Result<ResolvedParameter> {
        let context = format!("{context}.{}", parameter.name);
        let spec = &parameter.type_spec;
        let ctx = self.resolver.type_context(spec, parameter.required, &context)?;
        let usage_type = UsageTransform::new(spec.nullable, parameter.required).apply(&ctx.native_type);
        let default_value = self.explicit_default(parameter.default.as_ref(), &ctx)?;
        let initial_value = initial_value(&ctx, default_value.as_ref(), self.literal_fn())?;

        Ok(ResolvedParameter {
            name: parameter.name.clone(),
            identifier: self.naming.to_identifier(&parameter.name),
            location: parameter.location,
            required: parameter.required,
            nullable: spec.nullable,
            description: parameter.description.clone(),
            schema_type: spec.schema_type,
            native_type: ctx.native_type,
            usage_type,
            default_value,
            initial_value,
        })
    }

    fn resolve_operation(&self, group: &OperationGroup, operation: &Operation) -> Result<ResolvedOperation> {
        let context = format!("{}.{}", group.name, operation.name);

        let parameters = operation
            .parameters
            .iter()
            .map(|p| self.resolve_parameter(p, &context))
            .collect::<Result<Vec<_>>>()?;

        let request_body = operation
            .request_body
            .as_ref()
            .map(|body| -> Result<ResolvedRequestBody> {
                let native_type = self.resolver.resolve(&body.type_spec, &context)?;
                let usage_type = UsageTransform::new(body.type_spec.nullable, body.required).apply(&native_type);
                Ok(ResolvedRequestBody {
                    required: body.required,
                    media_type: body.media_type.clone(),
                    native_type,
                    usage_type,
                })
            })
            .transpose()?;

        let responses = operation
            .responses
            .iter()
            .map(|response| -> Result<ResolvedResponse> {
                Ok(ResolvedResponse {
                    code: response.code,
                    is_success: response.is_success(),
                    description: response.description.clone(),
                    media_type: response.media_type.clone(),
                    native_type: response
                        .type_spec
                        .as_ref()
                        .map(|spec| self.resolver.resolve(spec, &context))
                        .transpose()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let return_type = responses
            .iter()
            .filter(|r| r.is_success)
            .find_map(|r| r.native_type.clone());

        Ok(ResolvedOperation {
            name: operation.name.clone(),
            method_name: self.naming.to_operation_name(&operation.name),
            http_method: operation.method,
            full_path: format!("{}{}", group.path, operation.path),
            path: operation.path.clone(),
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            deprecated: operation.deprecated,
            parameters,
            request_body,
            responses,
            return_type,
            security_requirements: operation.security_requirements.clone(),
        })
    }

    fn resolve_group(&self, group: &OperationGroup) -> Result<ResolvedGroup> {
        Ok(ResolvedGroup {
            name: group.name.clone(),
            class_name: self.naming.to_class_name(&group.name),
            path: group.path.clone(),
            description: group.description.clone(),
            operations: group
                .operations
                .iter()
                .map(|op| self.resolve_operation(group, op))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SwiftNaming;
    use crate::strategy::SwiftStrategy;
    use openapi_swift_core::Classification;
    use openapi_swift_schema::{InterfaceSchema, ObjectSchema, OneOfSchema, TypeSpec};

    fn string_spec() -> TypeSpec {
        TypeSpec::scalar(Classification::String, None)
    }

    fn one_of(members: Vec<OneOfMember>) -> Schema {
        Schema::new(
            "Choice",
            SchemaKind::OneOf(OneOfSchema {
                members,
                discriminator: None,
            }),
        )
    }

    fn member_names(schema: &Schema) -> Vec<String> {
        let SchemaKind::OneOf(one_of) = &schema.kind else {
            panic!("expected oneOf");
        };
        one_of
            .members
            .iter()
            .map(|m| m.name.clone().expect("Member not named"))
            .collect()
    }

    #[test]
    fn test_suggested_name_for_type() {
        assert_eq!(suggested_name_for_type(&NativeType::named("Int32")), "Int32");
        assert_eq!(
            suggested_name_for_type(&NativeType::array(NativeType::named("String"))),
            "String_array"
        );
    }

    #[test]
    fn test_one_of_colliding_suggestions() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let mut schema = one_of(vec![
            OneOfMember::new(string_spec()),
            OneOfMember::new(TypeSpec::scalar(Classification::String, Some("email"))),
            OneOfMember::new(TypeSpec::array(string_spec())),
        ]);
        name_one_of_members(&mut schema, &resolver, &SwiftNaming).expect("Failed to name");
        assert_eq!(member_names(&schema), vec!["String", "String1", "StringArray"]);
    }

    #[test]
    fn test_one_of_explicit_names_reserved() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let mut explicit = OneOfMember::new(TypeSpec::scalar(Classification::Integer, None));
        explicit.name = Some("String".to_string());
        let mut schema = one_of(vec![OneOfMember::new(string_spec()), explicit]);
        name_one_of_members(&mut schema, &resolver, &SwiftNaming).expect("Failed to name");

        let names = member_names(&schema);
        assert_eq!(names, vec!["String1", "String"]);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_one_of_identifiers_unique() {
        let resolver = TypeResolver::new(&SwiftNaming, Some("Api"));
        let mut explicit = OneOfMember::new(TypeSpec::scalar(Classification::Integer, None));
        explicit.name = Some("string".to_string());
        let mut schema = one_of(vec![explicit, OneOfMember::new(string_spec())]);
        name_one_of_members(&mut schema, &resolver, &SwiftNaming).expect("Failed to name");

        let names = member_names(&schema);
        assert_eq!(names, vec!["string", "String1"]);
        let identifiers: HashSet<_> = names.iter().map(|n| SwiftNaming.to_identifier(n)).collect();
        assert_eq!(identifiers.len(), names.len());
    }

    #[test]
    fn test_unique_name_purpose() {
        let mut scope = HashSet::new();
        let options = SuggestedNameOptions {
            schema_type: Classification::Object,
            purpose: openapi_swift_schema::SchemaPurpose::Interface,
        };
        assert_eq!(unique_name("pet", &mut scope, options, &SwiftNaming), "PetProtocol");
        assert_eq!(unique_name("pet", &mut scope, options, &SwiftNaming), "PetProtocol1");
    }

    fn property(name: &str, required: bool, nullable: bool) -> ResolvedProperty {
        let native_type = NativeType::named("String");
        ResolvedProperty {
            name: name.to_string(),
            identifier: name.to_string(),
            serialized_name: name.to_string(),
            description: None,
            required,
            nullable,
            schema_type: Classification::String,
            usage_type: UsageTransform::new(nullable, required).apply(&native_type),
            native_type,
            default_value: None,
            initial_value: None,
        }
    }

    #[test]
    fn test_property_compatibility() {
        let parent = property("name", true, false);
        assert!(check_property_compatibility(&parent, &property("name", true, false)));
        assert!(!check_property_compatibility(&parent, &property("name", false, false)));
        assert!(!check_property_compatibility(&parent, &property("name", true, true)));

        let mut other_type = property("name", true, false);
        other_type.native_type = NativeType::named("Int");
        assert!(!check_property_compatibility(&parent, &other_type));
    }

    #[test]
    fn test_incompatible_override_is_error() {
        let mut doc = Document::new("Api", "1");
        doc.schemas.push(Schema::new(
            "Named",
            SchemaKind::Interface(InterfaceSchema {
                properties: vec![Property::new("name", string_spec(), true)],
                ..InterfaceSchema::default()
            }),
        ));
        doc.schemas.push(Schema::new(
            "Pet",
            SchemaKind::Object(ObjectSchema {
                properties: vec![Property::new("name", string_spec(), false)],
                implements: vec![vec!["Named".to_string()]],
                ..ObjectSchema::default()
            }),
        ));

        let processor = PostProcessor::new(&doc, &SwiftNaming, &SwiftStrategy, Some("Api"), EnumMemberStyle::Constant);
        let err = processor.resolve_schemas().unwrap_err();
        assert!(matches!(
            err,
            CodegenError::IncompatibleProperty { ref property, .. } if property == "name"
        ));
    }

    #[test]
    fn test_nested_interface_rejected() {
        let mut doc = Document::new("Api", "1");
        let mut outer = Schema::new("Outer", SchemaKind::Object(ObjectSchema::default()));
        let mut inner = Schema::new("Inner", SchemaKind::Interface(InterfaceSchema::default()));
        inner.scoped_name = vec!["Outer".to_string(), "Inner".to_string()];
        outer.nested.push(inner);
        doc.schemas.push(outer);

        let processor = PostProcessor::new(&doc, &SwiftNaming, &SwiftStrategy, Some("Api"), EnumMemberStyle::Constant);
        assert!(matches!(
            processor.resolve_schemas(),
            Err(CodegenError::NestedInterface { ref name }) if name == "Outer.Inner"
        ));
    }
}
