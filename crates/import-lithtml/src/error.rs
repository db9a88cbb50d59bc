//! Error types for the plugin glue: pattern compilation, options loading
//! and file access. The transform itself never fails.

use thiserror::Error;

/// Errors raised while setting up or driving the plugin.
#[derive(Debug, Error)]
pub enum Error {
    /// An include or exclude pattern could not be compiled.
    #[error("invalid file pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The options document is not valid JSON for `PluginOptions`.
    #[error("invalid plugin options: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
