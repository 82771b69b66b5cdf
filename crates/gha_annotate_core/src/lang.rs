//! Source language registry.
//!
//! Centralizes the source-set directory names and file extensions used when a class name is turned
//! into a file path, so downstream code doesn't need stringly-typed comparisons.
//!
//! ## Examples
//! ```rust
//! use gha_annotate_core::lang::{self, LanguageId};
//!
//! assert_eq!(lang::from_str("kt"), Some(LanguageId::Kotlin));
//! assert_eq!(lang::info_for(LanguageId::Kotlin).extension, "kt");
//! ```

/// Stable identifier for supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    Java,
    Kotlin,
    Groovy,
    Scala,
}

/// Metadata entry for a source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    pub id: LanguageId,
    /// Canonical spelling (used on the command line).
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Directory under `src/test/` and `src/it/` holding sources of this language.
    pub source_dir: &'static str,
    /// File extension without the leading dot.
    pub extension: &'static str,
}

/// Registry of supported languages.
pub const LANGUAGES: &[LanguageInfo] = &[
    info(LanguageId::Java, "java", &[], "java", "java"),
    info(LanguageId::Kotlin, "kotlin", &["kt"], "kotlin", "kt"),
    info(LanguageId::Groovy, "groovy", &[], "groovy", "groovy"),
    info(LanguageId::Scala, "scala", &[], "scala", "scala"),
];

const fn info(
    id: LanguageId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    source_dir: &'static str,
    extension: &'static str,
) -> LanguageInfo {
    LanguageInfo {
        id,
        canonical,
        aliases,
        source_dir,
        extension,
    }
}

/// Resolve a language name (canonical or alias) to its stable id.
pub fn from_str(name: &str) -> Option<LanguageId> {
    LANGUAGES
        .iter()
        .find(|l| l.canonical == name || l.aliases.contains(&name))
        .map(|l| l.id)
}

/// Return the canonical spelling for a language.
pub fn as_str(id: LanguageId) -> &'static str {
    info_for(id).canonical
}

/// Return the registry entry for a language.
pub fn info_for(id: LanguageId) -> &'static LanguageInfo {
    match LANGUAGES.iter().find(|l| l.id == id) {
        Some(info) => info,
        None => &LANGUAGES[0],
    }
}

impl LanguageId {
    pub fn source_dir(self) -> &'static str {
        info_for(self).source_dir
    }

    pub fn extension(self) -> &'static str {
        info_for(self).extension
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
