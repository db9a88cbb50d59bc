/// import-lithtml
///
/// Bundler transform that turns HTML template files into lit modules.
/// Each matched file is wrapped in an `html` tagged template, and the
/// lit-html directives referenced by the template get imported automatically.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod plugin;
pub mod transform;

pub use catalog::{
    build_catalog, Catalog, CatalogCache, DirectiveEntry, DirectiveSource, FsDirectiveSource,
    StaticDirectiveSource,
};
pub use config::{Patterns, PluginOptions};
pub use error::{Error, Result};
pub use filter::FileFilter;
pub use plugin::{ImportLitHtml, SourceMap, TransformOutput};
pub use transform::{synthesize, ImportStatement, TransformResult};
