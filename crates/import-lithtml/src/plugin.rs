//! The plugin a host pipeline holds.
//!
//! `ImportLitHtml` owns the file filter, the directive source and a handle
//! on the catalog cache. `transform` is called once per module and may be
//! called from several threads at once.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{build_catalog, CatalogCache, DirectiveSource, FsDirectiveSource};
use crate::config::PluginOptions;
use crate::error::Result;
use crate::filter::FileFilter;
use crate::transform::synthesize;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "import-lithtml";

/// Position mapping attached to transformed code. Always empty: no source
/// map is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    pub mappings: String,
}

/// Result handed back to the host for a transformed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub code: String,
    pub map: SourceMap,
}

pub struct ImportLitHtml {
    filter: FileFilter,
    source: Box<dyn DirectiveSource>,
    cache: Arc<CatalogCache>,
    directives: Vec<String>,
    use_cache: bool,
}

impl ImportLitHtml {
    /// Plugin rooted at the current working directory: patterns resolve
    /// against it and directives are read from its `node_modules`.
    pub fn new(options: PluginOptions) -> Result<Self> {
        Self::with_root(options, std::env::current_dir()?)
    }

    /// Plugin rooted at `root`.
    pub fn with_root(options: PluginOptions, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let source = FsDirectiveSource::new(&root);
        Self::with_source(options, root, source)
    }

    /// Plugin with a custom directive listing. `root` anchors the file patterns.
    pub fn with_source(
        options: PluginOptions,
        root: impl Into<PathBuf>,
        source: impl DirectiveSource + 'static,
    ) -> Result<Self> {
        let filter = FileFilter::new(
            options.include_patterns(),
            options.exclude_patterns(),
            root,
        )?;
        Ok(Self {
            filter,
            source: Box::new(source),
            cache: Arc::new(CatalogCache::new()),
            directives: options.directives,
            use_cache: options.cache,
        })
    }

    /// Share a catalog cache with other plugin instances.
    pub fn with_cache(mut self, cache: Arc<CatalogCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    /// Transform one module. Returns `None` when `id` is not selected by the
    /// include/exclude patterns.
    pub fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        if !self.filter.matches(id) {
            tracing::debug!(id, "Skipping module");
            return None;
        }

        let catalog = build_catalog(
            self.source.as_ref(),
            &self.cache,
            Some(self.directives.as_slice()),
            self.use_cache,
        );
        let result = synthesize(code, &catalog);

        tracing::debug!(
            id,
            imports = result.directive_imports.len(),
            "Wrapped template module"
        );

        Some(TransformOutput {
            code: result.code(),
            map: SourceMap::default(),
        })
    }
}
