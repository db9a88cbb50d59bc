//! Include/exclude matching over module ids.
//!
//! Relative patterns are anchored at a base directory, so `**/*.html`
//! means "any HTML file under the project". Ids that contain a NUL byte
//! belong to virtual modules and never match.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Default include pattern.
pub const DEFAULT_INCLUDE: &str = "**/*.html";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides which module ids the transform applies to.
#[derive(Debug, Clone)]
pub struct FileFilter {
    base_dir: PathBuf,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileFilter {
    /// Compile include and exclude patterns relative to `base_dir`.
    ///
    /// An empty include list accepts every id not excluded.
    pub fn new<I, E>(include: I, exclude: E, base_dir: impl Into<PathBuf>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let base_dir = base_dir.into();
        let include = compile_all(include, &base_dir)?;
        let exclude = compile_all(exclude, &base_dir)?;
        Ok(Self {
            base_dir,
            include,
            exclude,
        })
    }

    /// Whether the transform should process `id`.
    pub fn matches(&self, id: &str) -> bool {
        if id.contains('\0') {
            return false;
        }

        let path = anchor(&self.base_dir, id, false);
        if self.exclude.iter().any(|p| p.matches_with(&path, MATCH_OPTIONS)) {
            return false;
        }
        if self.include.is_empty() {
            return true;
        }
        self.include.iter().any(|p| p.matches_with(&path, MATCH_OPTIONS))
    }
}

fn compile_all<P>(patterns: P, base_dir: &Path) -> Result<Vec<Pattern>>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| compile(pattern.as_ref(), base_dir))
        .collect()
}

fn compile(pattern: &str, base_dir: &Path) -> Result<Pattern> {
    Pattern::new(&anchor(base_dir, pattern, true)).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Resolve `path` against `base_dir` lexically: `.` segments are dropped and
/// `..` removes the previous segment. The result uses forward slashes. With
/// `escape_base`, segments taken from `base_dir` are escaped so that the
/// result can be compiled as a pattern.
fn anchor(base_dir: &Path, path: &str, escape_base: bool) -> String {
    let path = Path::new(path);
    let mut root = String::new();
    let mut segments: Vec<String> = Vec::new();

    if !path.is_absolute() {
        for component in base_dir.components() {
            fold(&mut root, &mut segments, component, escape_base);
        }
    }
    for component in path.components() {
        fold(&mut root, &mut segments, component, false);
    }

    format!("{}{}", root, segments.join("/"))
}

fn fold(root: &mut String, segments: &mut Vec<String>, component: Component<'_>, escape: bool) {
    match component {
        Component::Prefix(prefix) => *root = prefix.as_os_str().to_string_lossy().into_owned(),
        Component::RootDir => root.push('/'),
        Component::CurDir => {}
        Component::ParentDir => {
            segments.pop();
        }
        Component::Normal(segment) => {
            let segment = segment.to_string_lossy();
            segments.push(if escape {
                Pattern::escape(&segment)
            } else {
                segment.into_owned()
            });
        }
    }
}
