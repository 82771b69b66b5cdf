//! Upward search from a class's load location.
//!
//! Compiled classes live somewhere under their module (`module/target/test-classes`,
//! `module/build/classes/java/test`, ...). Walking up from there and probing a short list of source-set
//! layouts at every level finds the module's own sources before those of any enclosing module.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gha_annotate_core::{ClassDescriptor, LanguageId};

use super::{LocateError, VCS_MARKERS};

/// Candidate paths for `class`, most specific first, relative to each visited directory.
pub(crate) fn candidates(class: &ClassDescriptor, language: LanguageId) -> Vec<PathBuf> {
    let file_name = format!("{}.{}", class.simple_name(), language.extension());
    let package: PathBuf = class.package_segments().into_iter().collect();
    let in_package = package.join(&file_name);

    vec![
        PathBuf::from(&file_name),
        in_package.clone(),
        Path::new("src").join("test").join(language.source_dir()).join(&in_package),
        Path::new("src").join("it").join(language.source_dir()).join(&in_package),
    ]
}

/// Directory to start walking from: the origin itself, or its parent when it is an archive.
///
/// Returns `None` when the origin does not exist.
pub(crate) fn start_dir(origin: &Path) -> Result<Option<PathBuf>, LocateError> {
    match fs::metadata(origin) {
        Ok(metadata) if metadata.is_dir() => Ok(Some(origin.to_path_buf())),
        Ok(_) => Ok(origin.parent().map(Path::to_path_buf)),
        Err(e) if is_absent(&e) => Ok(None),
        Err(source) => Err(LocateError::io(origin, source)),
    }
}

/// Walk from `start` towards the filesystem root, returning the first existing candidate.
///
/// The walk ends after the first directory holding a VCS marker has been probed.
#[tracing::instrument(level = "debug", skip_all, fields(start = %start.display()))]
pub(crate) fn find_upward(start: &Path, candidates: &[PathBuf]) -> Result<Option<PathBuf>, LocateError> {
    for dir in start.ancestors().filter(|dir| !dir.as_os_str().is_empty()) {
        for candidate in candidates {
            let path = dir.join(candidate);
            if is_regular_file(&path)? {
                tracing::debug!(path = %path.display(), "candidate matched");
                return Ok(Some(path));
            }
        }
        if is_repository_root(dir)? {
            tracing::trace!(dir = %dir.display(), "reached repository root");
            break;
        }
    }
    Ok(None)
}

fn is_repository_root(dir: &Path) -> Result<bool, LocateError> {
    for marker in VCS_MARKERS {
        let path = dir.join(marker);
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_dir() => return Ok(true),
            Ok(_) => {}
            Err(e) if is_absent(&e) => {}
            Err(source) => return Err(LocateError::io(&path, source)),
        }
    }
    Ok(false)
}

fn is_regular_file(path: &Path) -> Result<bool, LocateError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if is_absent(&e) => Ok(false),
        Err(source) => Err(LocateError::io(path, source)),
    }
}

/// "Nothing there": missing entry, or a path component that is a plain file.
fn is_absent(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}
