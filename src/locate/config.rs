//! Locator configuration.
//!
//! The search root is resolved once by whoever builds the config (the CLI does it at startup) and then
//! carried around explicitly; nothing in the locator reads the environment on its own.

use std::env;
use std::path::{Path, PathBuf};

use gha_annotate_core::LanguageId;

/// Environment variable the Actions runner sets to the checkout directory.
pub const GITHUB_WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

/// Default bound on directory depth for the root-relative search.
pub const DEFAULT_MAX_DEPTH: usize = 42;

/// Checkout directory used as the base for relative paths and as the root of the recursive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot(PathBuf);

impl SearchRoot {
    /// Root from an optional override; unset or blank means the current directory.
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.trim().is_empty() => SearchRoot(PathBuf::from(value)),
            _ => SearchRoot::current_dir(),
        }
    }

    /// Root from `GITHUB_WORKSPACE`.
    pub fn from_env() -> Self {
        SearchRoot::resolve(env::var(GITHUB_WORKSPACE_ENV).ok().as_deref())
    }

    pub fn current_dir() -> Self {
        SearchRoot(PathBuf::from("."))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Default for SearchRoot {
    fn default() -> Self {
        SearchRoot::current_dir()
    }
}

impl From<PathBuf> for SearchRoot {
    fn from(path: PathBuf) -> Self {
        SearchRoot(path)
    }
}

/// Which lookup strategies run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    /// Walk up from the class's load location, then search the root.
    #[default]
    Auto,
    /// Walk up from the class's load location only.
    Upward,
    /// Search the root only.
    Search,
}

impl LookupStrategy {
    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(LookupStrategy::Auto),
            "upward" => Some(LookupStrategy::Upward),
            "search" => Some(LookupStrategy::Search),
            _ => None,
        }
    }

    pub fn walks_upward(self) -> bool {
        matches!(self, LookupStrategy::Auto | LookupStrategy::Upward)
    }

    pub fn searches_root(self) -> bool {
        matches!(self, LookupStrategy::Auto | LookupStrategy::Search)
    }
}

/// Source locator configuration
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub search_root: SearchRoot,
    /// Language deciding `src/test/<dir>` and the file extension
    pub language: LanguageId,
    pub strategy: LookupStrategy,
    /// Maximum directory depth visited by the root search
    pub max_depth: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            search_root: SearchRoot::current_dir(),
            language: LanguageId::Java,
            strategy: LookupStrategy::Auto,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LocatorConfig {
    /// Create a config searching below `search_root` with default settings
    pub fn new(search_root: SearchRoot) -> Self {
        Self {
            search_root,
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: LanguageId) -> Self {
        self.language = language;
        self
    }

    pub fn with_strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
