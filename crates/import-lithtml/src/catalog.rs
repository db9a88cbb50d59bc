//! Directive catalog
//!
//! Enumerates the lit-html directive modules available to a build and
//! derives, for each one, the identifier templates use to call it and the
//! module path to import it from.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use regex::{Captures, Regex};

/// Package segment prefixed to every directive import path.
pub const DIRECTIVES_PACKAGE: &str = "lit-html/directives";

/// Conventional location of the directive modules, relative to the project root.
pub const DIRECTIVES_DIR: &str = "node_modules/lit-html/directives";

/// Internal helper module shipped alongside the directives. Never a public directive.
pub const PRIVATE_HELPERS_FILE: &str = "private-async-helpers.js";

const MODULE_EXTENSION: &str = ".js";

static HYPHEN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([0-9A-Za-z_])").unwrap());
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// One importable directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveEntry {
    /// Identifier templates reference, e.g. `ifDefined`.
    pub name: String,
    /// Module specifier used in the generated import, e.g. `lit-html/directives/if-defined.js`.
    pub import_path: String,
}

impl DirectiveEntry {
    /// Derive the entry for a directive module file name.
    pub fn from_file(file: &str) -> Self {
        Self {
            name: directive_name(file),
            import_path: format!("{}/{}", DIRECTIVES_PACKAGE, file),
        }
    }
}

/// Ordered, immutable set of directives available to a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<DirectiveEntry>,
}

impl Catalog {
    /// Build a catalog from entries, keeping the first entry for each name.
    pub fn new(entries: Vec<DirectiveEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.name.clone()))
            .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DirectiveEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectiveEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its derived identifier.
    pub fn get(&self, name: &str) -> Option<&DirectiveEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

/// Lists the candidate directive module file names.
pub trait DirectiveSource: Send + Sync {
    /// Return the file names in listing order.
    fn list(&self) -> io::Result<Vec<String>>;
}

/// Reads directive file names from `node_modules/lit-html/directives`.
#[derive(Debug, Clone)]
pub struct FsDirectiveSource {
    dir: PathBuf,
}

impl FsDirectiveSource {
    /// Directive directory under the given project root.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(DIRECTIVES_DIR),
        }
    }

}

impl DirectiveSource for FsDirectiveSource {
    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        // read_dir order is platform dependent
        names.sort();
        Ok(names)
    }
}

/// A fixed listing, for hosts that already know which directive files exist.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectiveSource {
    files: Vec<String>,
}

impl StaticDirectiveSource {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl DirectiveSource for StaticDirectiveSource {
    fn list(&self) -> io::Result<Vec<String>> {
        Ok(self.files.clone())
    }
}

/// Write-once store for a built catalog.
///
/// Shared between transform calls (and optionally between plugin instances).
/// The first catalog stored is kept for the lifetime of the cache; it is
/// never invalidated.
#[derive(Debug, Default)]
pub struct CatalogCache {
    slot: OnceCell<Arc<Catalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.slot.get().cloned()
    }

    /// Store `catalog` unless a catalog is already cached, and return the cached one.
    pub fn get_or_insert(&self, catalog: Arc<Catalog>) -> Arc<Catalog> {
        Arc::clone(self.slot.get_or_init(|| catalog))
    }

    pub fn is_populated(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// Resolve the catalog for one transform request.
///
/// With `use_cache`, a cached catalog is returned as-is and the source is not
/// consulted; otherwise the source is listed and filtered. A non-empty
/// `explicit_names` keeps only files matching one of the requested names,
/// else every `.js` module except the private helpers is kept. Listing
/// failures degrade to an empty catalog.
pub fn build_catalog(
    source: &dyn DirectiveSource,
    cache: &CatalogCache,
    explicit_names: Option<&[String]>,
    use_cache: bool,
) -> Arc<Catalog> {
    if use_cache {
        if let Some(cached) = cache.get() {
            return cached;
        }
    }

    let files = match source.list() {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("Could not list directive modules: {}", e);
            Vec::new()
        }
    };

    let explicit_names = explicit_names.filter(|names| !names.is_empty());
    let entries = files
        .iter()
        .filter(|file| match explicit_names {
            Some(names) => names.iter().any(|name| matches_requested(file, name)),
            None => is_public_directive(file),
        })
        .map(|file| DirectiveEntry::from_file(file))
        .collect();
    let catalog = Arc::new(Catalog::new(entries));

    tracing::debug!(
        directives = catalog.len(),
        explicit = explicit_names.is_some(),
        "Built directive catalog"
    );

    if use_cache {
        cache.get_or_insert(catalog)
    } else {
        catalog
    }
}

/// Derive the public identifier for a directive module file name.
///
/// `if-defined.js` becomes `ifDefined`; `Svg` and `Html` are spelled
/// `SVG` and `HTML` wherever they occur, so `unsafe-html.js` becomes `unsafeHTML`.
pub fn directive_name(file: &str) -> String {
    let base = file.strip_suffix(MODULE_EXTENSION).unwrap_or(file);
    let camel = HYPHEN_WORD.replace_all(base, |caps: &Captures| caps[1].to_uppercase());
    camel.replace("Svg", "SVG").replace("Html", "HTML")
}

/// Convert a camelCase identifier to the lower-case hyphenated file stem.
pub fn dashed_case(name: &str) -> String {
    CAMEL_BOUNDARY.replace_all(name, "$1-$2").to_lowercase()
}

/// Whether `file` provides the directive `name`. Matches on the end of the
/// file name so that prefixed modules still resolve.
fn matches_requested(file: &str, name: &str) -> bool {
    let wanted = format!("{}{}", dashed_case(name), MODULE_EXTENSION);
    file.to_lowercase().ends_with(&wanted)
}

fn is_public_directive(file: &str) -> bool {
    let is_module = Path::new(file)
        .extension()
        .is_some_and(|ext| ext == "js");
    is_module && file != PRIVATE_HELPERS_FILE
}
