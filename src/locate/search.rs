//! Root-relative search: find a regular file whose path ends with a given suffix.
//!
//! Each directory's entries are probed in parallel. The first hit any worker reports wins, so when several
//! files share the suffix the one returned is not deterministic.

use std::fs::{self, FileType};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::{LocateError, VCS_MARKERS};

/// Search `root` (down to `max_depth` levels) for a regular file ending with `suffix`.
///
/// A symlinked `root` is followed; symbolic links below it are not. Any I/O error aborts the search.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display(), suffix = %suffix.display()))]
pub(crate) fn find_by_suffix(root: &Path, suffix: &Path, max_depth: usize) -> Result<Option<PathBuf>, LocateError> {
    let metadata = fs::metadata(root).map_err(|source| LocateError::io(root, source))?;
    if metadata.is_file() {
        return Ok(root.ends_with(suffix).then(|| root.to_path_buf()));
    }
    if !metadata.is_dir() || max_depth == 0 {
        return Ok(None);
    }
    search_dir(root, 1, max_depth, suffix)
}

/// Probe the entries of `dir`, which sit at `depth` below the root.
fn search_dir(dir: &Path, depth: usize, max_depth: usize, suffix: &Path) -> Result<Option<PathBuf>, LocateError> {
    let entries = read_entries(dir)?;

    entries
        .par_iter()
        .map(|(path, file_type)| {
            if file_type.is_file() {
                return Ok(path.ends_with(suffix).then(|| path.clone()));
            }
            if file_type.is_dir() && depth < max_depth && !is_vcs_dir(path) {
                return search_dir(path, depth + 1, max_depth, suffix);
            }
            Ok(None)
        })
        .find_map_any(|result| match result {
            Ok(None) => None,
            Ok(Some(path)) => Some(Ok(path)),
            Err(e) => Some(Err(e)),
        })
        .transpose()
}

fn read_entries(dir: &Path) -> Result<Vec<(PathBuf, FileType)>, LocateError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| LocateError::io(dir, source))? {
        let entry = entry.map_err(|source| LocateError::io(dir, source))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LocateError::io(&path, source))?;
        entries.push((path, file_type));
    }
    tracing::trace!(dir = %dir.display(), count = entries.len(), "read directory");
    Ok(entries)
}

/// VCS metadata never holds sources; skip it instead of walking its object store.
fn is_vcs_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| VCS_MARKERS.contains(&name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "class X {}\n").unwrap();
        path
    }

    #[test]
    fn test_finds_nested_file() {
        let tmp = tempfile::tempdir().unwrap();
        let expected = touch(tmp.path(), "module/src/test/java/a/b/C.java");

        let found = find_by_suffix(tmp.path(), Path::new("a/b/C.java"), 42).unwrap();
        assert_eq!(found, Some(expected));
    }

    #[test]
    fn test_suffix_matches_whole_segments() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "src/test/java/xa/b/C.java");

        let found = find_by_suffix(tmp.path(), Path::new("a/b/C.java"), 42).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_directories_named_like_suffix_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/C.java")).unwrap();

        let found = find_by_suffix(tmp.path(), Path::new("a/b/C.java"), 42).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_depth_bound() {
        let tmp = tempfile::tempdir().unwrap();
        // File sits at depth 4 below the root.
        let expected = touch(tmp.path(), "x/y/a/C.java");

        assert_eq!(find_by_suffix(tmp.path(), Path::new("a/C.java"), 3).unwrap(), None);
        assert_eq!(
            find_by_suffix(tmp.path(), Path::new("a/C.java"), 4).unwrap(),
            Some(expected)
        );
    }

    #[test]
    fn test_vcs_directory_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), ".git/a/C.java");

        assert_eq!(find_by_suffix(tmp.path(), Path::new("a/C.java"), 42).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_is_searched() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "checkout/module/src/test/java/a/C.java");
        let link = tmp.path().join("workspace");
        std::os::unix::fs::symlink(tmp.path().join("checkout"), &link).unwrap();

        assert_eq!(
            find_by_suffix(&link, Path::new("a/C.java"), 42).unwrap(),
            Some(link.join("module/src/test/java/a/C.java"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_below_root_not_followed() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "elsewhere/a/C.java");
        fs::create_dir(tmp.path().join("root")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("elsewhere"), tmp.path().join("root/linked")).unwrap();

        assert_eq!(find_by_suffix(&tmp.path().join("root"), Path::new("a/C.java"), 42).unwrap(), None);
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let err = find_by_suffix(&missing, Path::new("a/C.java"), 42).unwrap_err();
        assert!(matches!(err, LocateError::Io { ref path, .. } if path == &missing));
    }
}
