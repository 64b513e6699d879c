//! Template rendering and file emission.
//!
//! Every generated file is described by a [`RenderJob`]; all jobs of an export
//! run concurrently and the export fails on the first failing render.

use crate::error::{CodegenError, Result};
use crate::ir::{ResolvedDocument, ResolvedSchema, ResolvedSchemaKind, RootContext};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

/// File extension of template files.
pub const TEMPLATE_EXTENSION: &str = "jinja2";

/// Renders named templates and writes the results.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders `template` with `context`.
    ///
    /// # Errors
    /// Returns an error if the template is missing or fails to render.
    fn render(&self, template: &str, context: &Context) -> Result<String>;

    /// Returns true if a template named `template` is loaded.
    fn has_template(&self, template: &str) -> bool;

    /// Renders `template` and writes it to `output`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails.
    async fn emit(&self, template: &str, output: &Path, context: &Context) -> Result<()> {
        let content = self.render(template, context)?;
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, content).await?;
        tracing::debug!("Rendered {} to {}", template, output.display());
        Ok(())
    }
}

/// Tera-backed renderer.
///
/// Templates are named by their path relative to the directory they were
/// loaded from, without the `.jinja2` extension. Later loads replace earlier
/// templates of the same name.
#[derive(Debug, Default)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Creates a renderer without templates.
    #[must_use]
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        Self { tera }
    }

    /// Loads all `.jinja2` files below `dir`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read or a template does not parse.
    pub fn load_templates(&mut self, dir: &Path) -> Result<usize> {
        let mut templates = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| CodegenError::Io(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Ok(relative) = path.with_extension("").strip_prefix(dir).map(Path::to_path_buf) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            templates.push((name, std::fs::read_to_string(path)?));
        }

        let count = templates.len();
        self.tera.add_raw_templates(templates)?;
        tracing::debug!("Loaded {} templates from {}", count, dir.display());
        Ok(count)
    }

    /// Adds a single template from source.
    ///
    /// # Errors
    /// Returns an error if the template does not parse.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera.add_raw_template(name, source)?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for TeraRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }

    fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template)
    }
}

/// One file to render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Template name.
    pub template: String,
    /// Output file.
    pub output: PathBuf,
    /// Render context.
    pub context: Context,
}

/// Template and context key of a schema.
#[must_use]
pub fn schema_template(schema: &ResolvedSchema) -> (&'static str, &'static str) {
    match schema.kind {
        ResolvedSchemaKind::Object(_) => ("pojo", "pojo"),
        ResolvedSchemaKind::Enum(_) => ("enum", "enum"),
        ResolvedSchemaKind::Interface(_) => ("interface", "interface"),
        ResolvedSchemaKind::Hierarchy(_) => ("hierarchy", "hierarchy"),
        ResolvedSchemaKind::Wrapper(_) => ("wrapper", "schema"),
        ResolvedSchemaKind::OneOf(_) => ("oneOf", "oneOf"),
    }
}

/// Names of the static templates in `dir`, without the `.jinja2` extension.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub async fn static_templates(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Plans the files generated for `document`.
///
/// # Errors
/// Returns an error if a context cannot be built or the static template
/// directories cannot be read.
pub async fn plan_exports(
    output_path: &Path,
    document: &ResolvedDocument,
    root: &RootContext,
    builtin_templates: &Path,
) -> Result<Vec<RenderJob>> {
    let base = Context::from_serialize(root)?;
    let source = output_path.join(&document.options.relative_source_output_path);
    let mut jobs = Vec::new();

    for group in document.groups.iter().filter(|g| !g.operations.is_empty()) {
        let mut context = base.clone();
        context.insert("group", group);
        context.insert("operations", &group.operations);
        context.insert("servers", &document.servers);
        jobs.push(RenderJob {
            template: "api".to_string(),
            output: source.join("APIs").join(format!("{}Api.swift", group.class_name)),
            context,
        });
    }

    for schema in &document.schemas {
        let (template, key) = schema_template(schema);
        let mut context = base.clone();
        context.insert(key, schema);
        jobs.push(RenderJob {
            template: template.to_string(),
            output: source.join("Models").join(format!("{}.swift", schema.class_name)),
            context,
        });
    }

    for name in static_templates(&builtin_templates.join("support")).await? {
        jobs.push(RenderJob {
            template: format!("support/{name}"),
            output: source.join("Support").join(&name),
            context: base.clone(),
        });
    }

    for name in static_templates(&builtin_templates.join("security")).await? {
        let mut context = base.clone();
        context.insert("securitySchemes", &document.security_schemes);
        jobs.push(RenderJob {
            template: format!("security/{name}"),
            output: source.join("Security").join(&name),
            context,
        });
    }

    let mut context = base;
    context.insert("info", &document.info);
    jobs.push(RenderJob {
        template: "Package".to_string(),
        output: output_path.join("Package.swift"),
        context,
    });

    Ok(jobs)
}

/// Renders all jobs concurrently.
///
/// # Errors
/// Returns the first render or write failure. Files already written are kept.
pub async fn run_jobs(renderer: &dyn Renderer, jobs: &[RenderJob]) -> Result<()> {
    try_join_all(
        jobs.iter()
            .map(|job| renderer.emit(&job.template, &job.output, &job.context)),
    )
    .await?;
    Ok(())
}
