//! Swift client generator.

use crate::defaults::{self, DefaultValue};
use crate::error::Result;
use crate::export::{TeraRenderer, plan_exports, run_jobs};
use crate::extension::{GeneratorExtension, MergedExtensions};
use crate::ir::{ResolvedDocument, ResolvedProperty, RootContext};
use crate::literal::{LiteralSynthesizer, TypeContext};
use crate::naming::{NamingConvention, SwiftNaming};
use crate::options::{CodegenOptions, Config};
use crate::postprocess::{self, PostProcessor};
use crate::resolve::{self, TypeResolver};
use crate::strategy::{
    AllOfStrategy, AnyOfStrategy, CompositionStrategy, GeneratorType, OneOfStrategy,
    OperationGroupingStrategy, SuggestedNameOptions, SwiftStrategy,
};
use openapi_swift_core::{Classification, NativeType, UsageTransform};
use openapi_swift_schema::{Document, Schema, validate_document};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifier of this generator in generated files.
pub const GENERATOR_CLASS: &str = "openapi-swift";

/// Directory of the built-in templates.
#[must_use]
pub fn builtin_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Generator of Swift clients.
///
/// Resolution and literal synthesis are synchronous; only
/// [`Generator::export_templates`] performs I/O.
pub struct Generator<N: NamingConvention = SwiftNaming> {
    options: CodegenOptions,
    naming: N,
    strategy: SwiftStrategy,
    extensions: MergedExtensions,
    builtin_templates: PathBuf,
}

impl Generator<SwiftNaming> {
    /// Creates a generator with Swift naming.
    #[must_use]
    pub fn new(options: CodegenOptions) -> Self {
        Self::with_naming(options, SwiftNaming)
    }

    /// Creates a generator from configuration.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if a configuration value is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(CodegenOptions::from_config(config)?))
    }
}

impl<N: NamingConvention> Generator<N> {
    /// Creates a generator with a custom naming convention.
    #[must_use]
    pub fn with_naming(options: CodegenOptions, naming: N) -> Self {
        Self {
            options,
            naming,
            strategy: SwiftStrategy,
            extensions: MergedExtensions::default(),
            builtin_templates: builtin_templates_dir(),
        }
    }

    /// Returns the generator with `extensions`, first taking priority.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<Arc<dyn GeneratorExtension>>) -> Self {
        self.extensions = MergedExtensions::merge(extensions);
        self
    }

    /// Returns the generator reading built-in templates from `dir`.
    #[must_use]
    pub fn with_builtin_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.builtin_templates = dir.into();
        self
    }

    /// Options as configured.
    #[must_use]
    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Naming convention.
    #[must_use]
    pub fn naming(&self) -> &N {
        &self.naming
    }

    fn resolver(&self) -> TypeResolver<'_, N> {
        TypeResolver::new(&self.naming, self.options.package_name())
    }

    fn literals(&self) -> LiteralSynthesizer<'_, N> {
        LiteralSynthesizer::new(&self.naming, self.options.enum_member_style)
    }

    /// Swift type of a scalar classification and format.
    ///
    /// # Errors
    /// Returns an error for unsupported classifications or formats.
    pub fn to_native_type(&self, classification: Classification, format: Option<&str>) -> Result<NativeType> {
        resolve::to_native_type(classification, format)
    }

    /// Fully qualified type of a named schema.
    #[must_use]
    pub fn to_native_object_type(&self, scoped_name: &[String]) -> NativeType {
        self.resolver().to_native_object_type(scoped_name)
    }

    /// Array of `component`.
    #[must_use]
    pub fn to_native_array_type(&self, component: NativeType) -> NativeType {
        self.resolver().to_native_array_type(component)
    }

    /// Dictionary from `key` to `value`.
    ///
    /// # Errors
    /// Returns an error if `key` is not a scalar type.
    pub fn to_native_map_type(&self, key: NativeType, value: NativeType) -> Result<NativeType> {
        self.resolver().to_native_map_type(key, value)
    }

    /// Transform applied to a type at its usage site.
    #[must_use]
    pub fn native_type_usage_transformer(&self, nullable: bool, required: bool) -> UsageTransform {
        UsageTransform::new(nullable, required)
    }

    /// Swift literal of `value`, or of the default value when absent.
    ///
    /// # Errors
    /// Returns an error if the value cannot be written as a literal.
    pub fn to_literal(&self, value: Option<&Value>, ctx: &TypeContext) -> Result<Option<String>> {
        self.literals().to_literal(value, ctx)
    }

    /// Value a missing value of `ctx` takes.
    ///
    /// # Errors
    /// Returns an error if the literal cannot be written.
    pub fn default_value(&self, ctx: &TypeContext) -> Result<Option<DefaultValue>> {
        let literals = self.literals();
        defaults::default_value(ctx, |v, c| literals.to_literal(Some(v), c))
    }

    /// Value a property or parameter is initialised with.
    ///
    /// # Errors
    /// Returns an error if the literal cannot be written.
    pub fn initial_value(&self, ctx: &TypeContext, explicit: Option<&DefaultValue>) -> Result<Option<DefaultValue>> {
        let literals = self.literals();
        defaults::initial_value(ctx, explicit, |v, c| literals.to_literal(Some(v), c))
    }

    /// Suggested name of a schema with the given purpose.
    #[must_use]
    pub fn to_suggested_schema_name(&self, name: &str, options: SuggestedNameOptions) -> String {
        crate::strategy::to_suggested_schema_name(name, options)
    }

    /// Returns true if `child` may override `parent`.
    #[must_use]
    pub fn check_property_compatibility(&self, parent: &ResolvedProperty, child: &ResolvedProperty) -> bool {
        postprocess::check_property_compatibility(parent, child)
    }

    /// Names the oneOf members of `schema` and its nested schemas.
    ///
    /// # Errors
    /// Returns an error if a member type cannot be resolved.
    pub fn post_process_schema(&self, mut schema: Schema) -> Result<Schema> {
        postprocess::name_one_of_members(&mut schema, &self.resolver(), &self.naming)?;
        Ok(schema)
    }

    /// Validates and resolves `document`.
    ///
    /// Options receive document defaults first, so an unset package name is
    /// inferred from the title before any type is qualified with it.
    ///
    /// # Errors
    /// Returns the first validation, resolution or compatibility error.
    pub fn post_process_document(&self, mut document: Document) -> Result<ResolvedDocument> {
        validate_document(&document)?;
        let options = self.options.with_document_defaults(&document.info, &self.naming);

        let resolver = TypeResolver::new(&self.naming, options.package_name());
        for schema in &mut document.schemas {
            postprocess::name_one_of_members(schema, &resolver, &self.naming)?;
        }

        let processor = PostProcessor::new(
            &document,
            &self.naming,
            &self.strategy,
            options.package_name(),
            options.enum_member_style,
        );
        let schemas = processor.resolve_schemas()?;
        let groups = processor.resolve_groups()?;
        tracing::info!(
            "Resolved {} schemas and {} operation groups",
            schemas.len(),
            groups.len()
        );

        Ok(ResolvedDocument {
            info: document.info.clone(),
            servers: document.servers.clone(),
            groups,
            schemas,
            security_schemes: document.security_schemes.clone(),
            options,
        })
    }

    /// Values shared by every template.
    #[must_use]
    pub fn template_root_context(&self, options: &CodegenOptions) -> RootContext {
        RootContext {
            options: options.clone(),
            generator_class: GENERATOR_CLASS,
            generator_version: env!("CARGO_PKG_VERSION"),
            generated_date: (!options.hide_generation_timestamp)
                .then(|| chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Glob patterns of generated files, relative to the output path.
    ///
    /// While the package name is still to be inferred from the document, the
    /// source directory is matched as any package below `Sources`.
    #[must_use]
    pub fn clean_path_patterns(&self) -> Vec<String> {
        let rel = match self.options.relative_source_output_path.trim_matches('/') {
            "" => "Sources/*",
            rel => rel,
        };
        let mut patterns = vec![
            format!("{rel}/Models/*.swift"),
            format!("{rel}/APIs/*Api.swift"),
            format!("{rel}/Support/*.swift"),
        ];
        patterns.extend(self.extensions.clean_path_patterns());
        patterns
    }

    /// Paths whose changes should trigger regeneration.
    #[must_use]
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.builtin_templates.clone()];
        paths.extend(self.extensions.watch_paths());
        paths.extend(self.options.custom_templates_path.clone());
        paths
    }

    /// Renders all files for `document` below `output_path`.
    ///
    /// Custom templates override extension templates, which override the
    /// built-in ones.
    ///
    /// # Errors
    /// Returns the first template, render or write failure.
    pub async fn export_templates(&self, output_path: &Path, document: &ResolvedDocument) -> Result<()> {
        let mut renderer = TeraRenderer::new();
        renderer.load_templates(&self.builtin_templates)?;
        self.extensions.load_templates(&mut renderer)?;
        if let Some(custom) = &self.options.custom_templates_path {
            renderer.load_templates(custom)?;
        }

        let root = self.template_root_context(&document.options);
        let jobs = plan_exports(output_path, document, &root, &self.builtin_templates).await?;
        run_jobs(&renderer, &jobs).await?;
        tracing::info!("Exported {} files to {}", jobs.len(), output_path.display());

        let root_context = tera::Context::from_serialize(&root)?;
        self.extensions
            .export_templates(output_path, document, &renderer, &root_context)
            .await
    }
}

impl<N: NamingConvention> CompositionStrategy for Generator<N> {
    fn all_of_strategy(&self) -> AllOfStrategy {
        self.strategy.all_of_strategy()
    }

    fn any_of_strategy(&self) -> AnyOfStrategy {
        self.strategy.any_of_strategy()
    }

    fn one_of_strategy(&self) -> OneOfStrategy {
        self.strategy.one_of_strategy()
    }

    fn supports_inheritance(&self) -> bool {
        self.strategy.supports_inheritance()
    }

    fn supports_multiple_inheritance(&self) -> bool {
        self.strategy.supports_multiple_inheritance()
    }

    fn interface_can_be_nested(&self) -> bool {
        self.strategy.interface_can_be_nested()
    }

    fn native_composition_can_be_scope(&self) -> bool {
        self.strategy.native_composition_can_be_scope()
    }

    fn native_composed_schema_requires_name(&self) -> bool {
        self.strategy.native_composed_schema_requires_name()
    }

    fn native_composed_schema_requires_object_like_or_wrapper(&self) -> bool {
        self.strategy.native_composed_schema_requires_object_like_or_wrapper()
    }

    fn generator_type(&self) -> GeneratorType {
        self.strategy.generator_type()
    }

    fn operation_grouping_strategy(&self) -> OperationGroupingStrategy {
        self.strategy.operation_grouping_strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ResolvedSchemaKind;
    use openapi_swift_schema::{
        InterfaceSchema, ObjectSchema, OneOfMember, OneOfSchema, Property, SchemaKind, SchemaPurpose,
        TypeSpec,
    };
    use serde_json::json;

    fn generator() -> Generator {
        Generator::new(CodegenOptions::default())
    }

    fn property<'a>(doc: &'a ResolvedDocument, schema: &str, name: &str) -> &'a ResolvedProperty {
        doc.find_schema(&[schema.to_string()])
            .expect("Schema not found")
            .properties()
            .iter()
            .find(|p| p.name == name)
            .expect("Property not found")
    }

    fn pet_document() -> Document {
        let mut doc = Document::new("Pet Store", "1.0");
        let mut foo = Schema::new("Foo", SchemaKind::Object(ObjectSchema::default()));
        let mut bar = Schema::new("Bar", SchemaKind::Object(ObjectSchema::default()));
        bar.scoped_name = vec!["Foo".to_string(), "Bar".to_string()];
        foo.nested.push(bar);
        doc.schemas.push(foo);

        doc.schemas.push(Schema::new(
            "Pet",
            SchemaKind::Object(ObjectSchema {
                properties: vec![
                    Property::new("age", TypeSpec::scalar(Classification::Integer, Some("int32")), true),
                    Property::new(
                        "nickname",
                        TypeSpec::scalar(Classification::String, None).nullable(),
                        false,
                    ),
                    Property::new(
                        "bar",
                        TypeSpec::named(Classification::Object, vec!["Foo", "Bar"]),
                        true,
                    ),
                ],
                ..ObjectSchema::default()
            }),
        ));
        doc
    }

    #[test]
    fn test_required_int32_initial_value() {
        let doc = generator()
            .post_process_document(pet_document())
            .expect("Failed to process");
        let age = property(&doc, "Pet", "age");
        assert_eq!(age.usage_type.expression(), "Int32");
        let initial = age.initial_value.as_ref().expect("Expected initial value");
        assert_eq!(initial.literal_value, "0");
    }

    #[test]
    fn test_nullable_optional_string() {
        let doc = generator()
            .post_process_document(pet_document())
            .expect("Failed to process");
        let nickname = property(&doc, "Pet", "nickname");
        assert_eq!(nickname.usage_type.expression(), "Nullable<String>?");
        assert_eq!(nickname.initial_value, None);

        let ctx = TypeContext::new(Classification::String, nickname.native_type.clone())
            .with_required(false);
        assert_eq!(
            generator().to_literal(None, &ctx).expect("Failed to format"),
            Some("nil".to_string())
        );
    }

    #[test]
    fn test_nested_reference_qualified() {
        let doc = generator()
            .post_process_document(pet_document())
            .expect("Failed to process");
        assert_eq!(property(&doc, "Pet", "bar").native_type.expression(), "Api.Foo.Bar");
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_package_inferred_from_title() {
        let config = Config::from_value(json!({ "package": { "name": "" } })).expect("Failed to parse");
        let generator = Generator::from_config(&config).expect("Failed to create generator");
        let doc = generator
            .post_process_document(pet_document())
            .expect("Failed to process");

        assert_eq!(doc.options.package_name(), Some("PetStore"));
        assert_eq!(doc.options.relative_source_output_path, "Sources/PetStore");
        assert_eq!(property(&doc, "Pet", "bar").native_type.expression(), "PetStore.Foo.Bar");
        assert!(logs_contain("Inferred package name"));
    }

    #[test]
    fn test_post_process_schema_names_members() {
        let schema = Schema::new(
            "Value",
            SchemaKind::OneOf(OneOfSchema {
                members: vec![
                    OneOfMember::new(TypeSpec::scalar(Classification::String, None)),
                    OneOfMember::new(TypeSpec::scalar(Classification::String, Some("uuid"))),
                ],
                discriminator: None,
            }),
        );
        let schema = generator().post_process_schema(schema).expect("Failed to process");
        let SchemaKind::OneOf(one_of) = &schema.kind else {
            panic!("expected oneOf");
        };
        let names: Vec<_> = one_of.members.iter().filter_map(|m| m.name.as_deref()).collect();
        assert_eq!(names, vec!["String", "String1"]);
    }

    #[test]
    fn test_one_of_resolved() {
        let mut doc = Document::new("Api", "1");
        doc.schemas.push(Schema::new(
            "Value",
            SchemaKind::OneOf(OneOfSchema {
                members: vec![
                    OneOfMember::new(TypeSpec::scalar(Classification::Integer, None)),
                    OneOfMember::new(TypeSpec::array(TypeSpec::scalar(Classification::String, None))),
                ],
                discriminator: None,
            }),
        ));
        let doc = generator().post_process_document(doc).expect("Failed to process");
        let ResolvedSchemaKind::OneOf(one_of) = &doc.schemas[0].kind else {
            panic!("expected oneOf");
        };
        let identifiers: Vec<_> = one_of.members.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["int", "stringArray"]);
    }

    #[test]
    fn test_interface_implementation_compatible() {
        let mut doc = Document::new("Api", "1");
        let mut named = Schema::new(
            "Named",
            SchemaKind::Interface(InterfaceSchema {
                properties: vec![Property::new("name", TypeSpec::scalar(Classification::String, None), true)],
                ..InterfaceSchema::default()
            }),
        );
        named.purpose = SchemaPurpose::Interface;
        doc.schemas.push(named);
        doc.schemas.push(Schema::new(
            "Dog",
            SchemaKind::Object(ObjectSchema {
                properties: vec![Property::new("name", TypeSpec::scalar(Classification::String, None), true)],
                implements: vec![vec!["Named".to_string()]],
                ..ObjectSchema::default()
            }),
        ));
        let doc = generator().post_process_document(doc).expect("Failed to process");
        let ResolvedSchemaKind::Object(dog) = &doc.schemas[1].kind else {
            panic!("expected object");
        };
        assert_eq!(dog.implements[0].expression(), "Api.Named");
    }

    #[test]
    fn test_delegated_queries() {
        let generator = generator();
        assert_eq!(generator.one_of_strategy(), OneOfStrategy::Native);
        assert!(!generator.interface_can_be_nested());
        assert_eq!(
            generator
                .to_native_type(Classification::Integer, Some("int64"))
                .expect("Failed to resolve")
                .expression(),
            "Int64"
        );
        let map = generator
            .to_native_map_type(NativeType::named("String"), NativeType::named("Int"))
            .expect("Failed to build map");
        assert_eq!(map.expression(), "[String : Int]");
        assert_eq!(
            generator.native_type_usage_transformer(false, false).apply(&map).expression(),
            "[String : Int]?"
        );
    }

    #[test]
    fn test_root_context_timestamp() {
        let generator = generator();
        let mut options = CodegenOptions::default();
        assert!(generator.template_root_context(&options).generated_date.is_some());
        options.hide_generation_timestamp = true;
        let root = generator.template_root_context(&options);
        assert_eq!(root.generated_date, None);
        assert_eq!(root.generator_class, GENERATOR_CLASS);
    }

    #[test]
    fn test_clean_and_watch_paths() {
        let generator = generator();
        assert_eq!(
            generator.clean_path_patterns(),
            vec![
                "Sources/Api/Models/*.swift",
                "Sources/Api/APIs/*Api.swift",
                "Sources/Api/Support/*.swift",
            ]
        );
        assert_eq!(generator.watch_paths(), vec![builtin_templates_dir()]);
    }

    #[test]
    fn test_clean_paths_stay_relative_for_inferred_package() {
        let config = Config::from_value(json!({ "package": { "name": "" } }))
            .expect("Failed to parse config");
        let generator = Generator::from_config(&config).expect("Failed to create generator");
        let patterns = generator.clean_path_patterns();
        assert_eq!(
            patterns,
            vec![
                "Sources/*/Models/*.swift",
                "Sources/*/APIs/*Api.swift",
                "Sources/*/Support/*.swift",
            ]
        );
        assert!(patterns.iter().all(|p| !p.starts_with('/')));
    }
}
