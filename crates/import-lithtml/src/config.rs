//! Plugin options.
//!
//! Options are taken as given: `include` and `exclude` accept a single
//! pattern or a list, `directives` counts only when it is a list, and
//! `cache` defaults to on.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::filter::DEFAULT_INCLUDE;

/// One pattern or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Patterns::One(pattern) => vec![pattern.clone()],
            Patterns::Many(patterns) => patterns.clone(),
        }
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Patterns::One(pattern.to_string())
    }
}

impl From<Vec<String>> for Patterns {
    fn from(patterns: Vec<String>) -> Self {
        Patterns::Many(patterns)
    }
}

/// Options accepted by [`crate::ImportLitHtml`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    /// Files to transform. Defaults to every HTML file.
    pub include: Option<Patterns>,
    /// Files to leave alone, even when included.
    pub exclude: Option<Patterns>,
    /// Directive names to consider. When empty, every directive lit-html
    /// ships is a candidate.
    #[serde(deserialize_with = "list_or_none")]
    pub directives: Vec<String>,
    /// Reuse the directive catalog across transforms.
    pub cache: bool,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            include: None,
            exclude: None,
            directives: Vec::new(),
            cache: true,
        }
    }
}

impl PluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn include(mut self, include: impl Into<Patterns>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn exclude(mut self, exclude: impl Into<Patterns>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn directives<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Include patterns in effect, falling back to the HTML default.
    pub fn include_patterns(&self) -> Vec<String> {
        match &self.include {
            Some(patterns) => patterns.to_vec(),
            None => vec![DEFAULT_INCLUDE.to_string()],
        }
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        self.exclude.as_ref().map(Patterns::to_vec).unwrap_or_default()
    }
}

/// Anything other than a list of names means "no explicit directives".
fn list_or_none<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect())
}
