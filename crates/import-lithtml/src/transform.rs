//! Module synthesis
//!
//! Wraps template source in a lit module: imports for the directives the
//! template mentions, the base `html` import, and a default export that
//! renders the template.

use std::fmt;

use crate::catalog::Catalog;

/// Package the base templating function is imported from.
pub const TEMPLATE_PACKAGE: &str = "lit";

/// Tag function the template is rendered with.
pub const TEMPLATE_TAG: &str = "html";

/// Sentinel lit exports for rendering nothing.
pub const NOTHING_SENTINEL: &str = "nothing";

/// A single `import { ... } from '...';` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub names: Vec<String>,
    pub from: String,
}

impl ImportStatement {
    pub fn new(names: Vec<String>, from: impl Into<String>) -> Self {
        Self {
            names,
            from: from.into(),
        }
    }
}

impl fmt::Display for ImportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {{ {} }} from '{}';", self.names.join(", "), self.from)
    }
}

/// The pieces of a synthesized module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// One import per directive the template uses, in catalog order.
    pub directive_imports: Vec<ImportStatement>,
    /// The `html` import, plus `nothing` when the template needs it.
    pub base_import: ImportStatement,
    /// Default export returning the template as an `html` tagged template.
    pub wrapped_body: String,
}

impl TransformResult {
    /// The directive import lines joined by newlines; empty when none are needed.
    pub fn import_block(&self) -> String {
        self.directive_imports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the final module text.
    pub fn code(&self) -> String {
        format!(
            "{}\n\n{} {}",
            self.import_block(),
            self.base_import,
            self.wrapped_body
        )
    }
}

/// Build the module for `source` against `catalog`.
///
/// A directive is imported only when its name occurs somewhere in the source
/// text. This is a plain substring test, so a name inside an unrelated
/// literal still counts and aliased uses are missed.
pub fn synthesize(source: &str, catalog: &Catalog) -> TransformResult {
    let directive_imports: Vec<ImportStatement> = catalog
        .iter()
        .filter(|entry| source.contains(entry.name.as_str()))
        .map(|entry| ImportStatement::new(vec![entry.name.clone()], entry.import_path.as_str()))
        .collect();

    let mut base_names = vec![TEMPLATE_TAG.to_string()];
    let nothing_imported = directive_imports
        .iter()
        .any(|import| import.names.iter().any(|name| name == NOTHING_SENTINEL));
    if source.contains(NOTHING_SENTINEL) && !nothing_imported {
        base_names.push(NOTHING_SENTINEL.to_string());
    }

    TransformResult {
        directive_imports,
        base_import: ImportStatement::new(base_names, TEMPLATE_PACKAGE),
        wrapped_body: wrap_template(source),
    }
}

/// The source is embedded verbatim; no template-literal escaping is applied.
fn wrap_template(source: &str) -> String {
    format!(
        "export default function() {{ return {}`{}`; }}",
        TEMPLATE_TAG, source
    )
}
