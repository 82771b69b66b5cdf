//! Source file lookup for test classes.
//!
//! Given a [`ClassDescriptor`], find the path of the file that declares it, relative to the checkout root.
//!
//! ## Strategies
//!
//! - **Upward** (primary): start at the directory the class was loaded from and walk towards the repository
//!   root, probing `<Simple>.<ext>`, `<pkg>/<Simple>.<ext>`, `src/test/<lang>/...` and `src/it/<lang>/...` at
//!   every level. This is what keeps `module/submodule` classes from resolving to the top-level module.
//! - **Search**: look below the search root (bounded depth, parallel) for any regular file ending with
//!   `<pkg>/<Simple>.<ext>`. When several files match, which one wins is not deterministic.
//!
//! Not finding anything is not an error: the locator falls back to a conventional path that may not exist.
//! I/O failures while probing abort the lookup with [`LocateError::Io`].

mod config;
mod paths;
mod search;
mod upward;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use gha_annotate_core::ClassDescriptor;
use miette::Diagnostic;
use thiserror::Error;

pub use config::{DEFAULT_MAX_DEPTH, GITHUB_WORKSPACE_ENV, LocatorConfig, LookupStrategy, SearchRoot};

/// Directories marking the top of a repository checkout.
pub const VCS_MARKERS: &[&str] = &[".git", ".hg", ".svn"];

/// Errors that abort a lookup.
#[derive(Debug, Error, Diagnostic)]
pub enum LocateError {
    #[error("I/O error while looking up sources at {}: {source}", path.display())]
    #[diagnostic(
        code(gha_annotate::locate::io),
        help("check that the search root exists and is readable by the current user")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LocateError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        LocateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Best-guess source file, relative to the search root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// `/`-separated rendering, independent of the host's separator.
    pub fn to_slash_string(&self) -> String {
        paths::to_slash(&self.0)
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

impl From<&str> for ResolvedPath {
    fn from(path: &str) -> Self {
        ResolvedPath(paths::from_slash(path))
    }
}

/// Anything able to map a class to its source file.
pub trait SourceLookup {
    fn source_path_for(&self, class: &ClassDescriptor) -> Result<ResolvedPath, LocateError>;
}

/// Filesystem-backed [`SourceLookup`].
#[derive(Debug, Clone, Default)]
pub struct SourceLocator {
    config: LocatorConfig,
}

impl SourceLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    fn root(&self) -> &Path {
        self.config.search_root.path()
    }

    /// Upward walk from the class's load location. `None` when the location is unknown or nothing matched.
    pub fn find_from_origin(&self, class: &ClassDescriptor) -> Result<Option<ResolvedPath>, LocateError> {
        let Some(origin) = class.origin.as_deref() else {
            return Ok(None);
        };
        // Relative origins are taken relative to the search root.
        let origin = self.root().join(origin);
        let Some(start) = upward::start_dir(&origin)? else {
            tracing::debug!(origin = %origin.display(), "class origin does not exist");
            return Ok(None);
        };

        let candidates = upward::candidates(class, self.config.language);
        match upward::find_upward(&start, &candidates)? {
            Some(found) => Ok(Some(self.relative_to_root(&found)?)),
            None => Ok(None),
        }
    }

    /// Bounded search below the search root. `None` when nothing matched.
    pub fn find_below_root(&self, class: &ClassDescriptor) -> Result<Option<ResolvedPath>, LocateError> {
        let suffix = paths::from_slash(&class.source_file_suffix(self.config.language));
        match search::find_by_suffix(self.root(), &suffix, self.config.max_depth)? {
            Some(found) => Ok(Some(self.relative_to_root(&found)?)),
            None => Ok(None),
        }
    }

    /// Path used when no source file was found.
    ///
    /// `src/test/<lang>/<pkg>/<Simple>.<ext>` whenever the root search is enabled, `<pkg>/<Simple>.<ext>`
    /// for the upward-only strategy.
    pub fn fallback_path(&self, class: &ClassDescriptor) -> ResolvedPath {
        let suffix = paths::from_slash(&class.source_file_suffix(self.config.language));
        if self.config.strategy.searches_root() {
            let source_set = Path::new("src").join("test").join(self.config.language.source_dir());
            ResolvedPath(source_set.join(suffix))
        } else {
            ResolvedPath(suffix)
        }
    }

    /// Express `found` relative to the search root, lexically first and canonically second.
    ///
    /// A match outside the root is kept as a normalized absolute path.
    fn relative_to_root(&self, found: &Path) -> Result<ResolvedPath, LocateError> {
        if let Some(relative) = paths::relativize(self.root(), found) {
            return Ok(ResolvedPath(relative));
        }
        let root = self
            .root()
            .canonicalize()
            .map_err(|source| LocateError::io(self.root(), source))?;
        let canonical = found.canonicalize().map_err(|source| LocateError::io(found, source))?;
        match canonical.strip_prefix(&root) {
            Ok(relative) => Ok(ResolvedPath(paths::normalize(relative))),
            Err(_) => {
                tracing::debug!(path = %canonical.display(), "source file lies outside the search root");
                Ok(ResolvedPath(paths::normalize(found)))
            }
        }
    }
}

impl SourceLookup for SourceLocator {
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class.name))]
    fn source_path_for(&self, class: &ClassDescriptor) -> Result<ResolvedPath, LocateError> {
        let strategy = self.config.strategy;

        if strategy.walks_upward() {
            if let Some(found) = self.find_from_origin(class)? {
                return Ok(found);
            }
        }
        if strategy.searches_root() {
            if let Some(found) = self.find_below_root(class)? {
                return Ok(found);
            }
        }

        let fallback = self.fallback_path(class);
        tracing::debug!(path = %fallback, "no source file found, using fallback");
        Ok(fallback)
    }
}
