//! Generator extensions.
//!
//! An extension contributes templates, watch paths, clean patterns and extra
//! exports. Extensions are kept in an ordered list; the first extension in the
//! list takes priority for templates of the same name.

use crate::error::Result;
use crate::export::{Renderer, TeraRenderer};
use crate::ir::ResolvedDocument;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Additional generator behaviour.
#[async_trait]
pub trait GeneratorExtension: Send + Sync {
    /// Extension name used in logs.
    fn name(&self) -> &str;

    /// Directories of templates contributed by this extension.
    fn template_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Paths whose changes should trigger regeneration.
    fn watch_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Glob patterns of generated files this extension owns.
    fn clean_path_patterns(&self) -> Vec<String> {
        Vec::new()
    }

    /// Writes files beyond the built-in exports.
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails.
    async fn export_templates(
        &self,
        _output_path: &Path,
        _document: &ResolvedDocument,
        _renderer: &dyn Renderer,
        _root: &tera::Context,
    ) -> Result<()> {
        Ok(())
    }
}

/// Ordered list of extensions acting as one.
#[derive(Clone, Default)]
pub struct MergedExtensions {
    extensions: Vec<Arc<dyn GeneratorExtension>>,
}

impl fmt::Debug for MergedExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.extensions.iter().map(|e| e.name()))
            .finish()
    }
}

impl MergedExtensions {
    /// Merges extensions in priority order.
    #[must_use]
    pub fn merge(extensions: impl IntoIterator<Item = Arc<dyn GeneratorExtension>>) -> Self {
        Self {
            extensions: extensions.into_iter().collect(),
        }
    }

    /// Number of extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if there are no extensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Loads extension templates into `renderer`.
    ///
    /// Later loads replace earlier ones, so the list is loaded back to front.
    ///
    /// # Errors
    /// Returns an error if a template directory cannot be loaded.
    pub fn load_templates(&self, renderer: &mut TeraRenderer) -> Result<()> {
        for extension in self.extensions.iter().rev() {
            for dir in extension.template_dirs() {
                renderer.load_templates(&dir)?;
            }
        }
        Ok(())
    }

    /// Watch paths of all extensions in list order.
    #[must_use]
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        self.extensions.iter().flat_map(|e| e.watch_paths()).collect()
    }

    /// Clean patterns of all extensions in list order.
    #[must_use]
    pub fn clean_path_patterns(&self) -> Vec<String> {
        self.extensions
            .iter()
            .flat_map(|e| e.clean_path_patterns())
            .collect()
    }

    /// Runs the exports of all extensions in list order.
    ///
    /// # Errors
    /// Returns the first extension failure.
    pub async fn export_templates(
        &self,
        output_path: &Path,
        document: &ResolvedDocument,
        renderer: &dyn Renderer,
        root: &tera::Context,
    ) -> Result<()> {
        for extension in &self.extensions {
            tracing::debug!("Running exports of extension {}", extension.name());
            extension
                .export_templates(output_path, document, renderer, root)
                .await?;
        }
        Ok(())
    }
}
