//! Lexical path helpers shared by both lookup strategies.

use std::path::{Component, Path, PathBuf};

/// Remove `.` segments and fold `name/..` pairs without touching the filesystem.
///
/// Leading `..` segments that cannot be folded are kept.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.into_iter().collect()
}

/// `base`-relative form of `path`, compared after normalizing both.
pub(crate) fn relativize(base: &Path, path: &Path) -> Option<PathBuf> {
    let base = normalize(base);
    let path = normalize(path);
    if base == Path::new(".") && path.is_relative() {
        return Some(path);
    }
    path.strip_prefix(&base).ok().map(Path::to_path_buf)
}

/// Render a relative path with `/` separators regardless of the host convention.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir => None,
            Component::RootDir | Component::Prefix(_) => Some(String::new()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a relative path from `/`-separated segments.
pub(crate) fn from_slash(path: &str) -> PathBuf {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
