//! Lexical path helpers
//!
//! Chain identity is the absolute, lexically normalized path of a file. None
//! of these helpers touch the filesystem, so they work the same for every
//! content provider.

use std::path::{Component, Path, PathBuf};

/// Name used for root content that was supplied without a path.
pub(crate) const ANONYMOUS: &str = "<anonymous>";

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` at the root is dropped, matching how URLs and Node's `path.resolve`
/// behave.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// The directory a file lives in, or the path itself if it has no parent.
pub fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(path)
}

/// Express `to` relative to the directory `from`.
///
/// Both paths are expected to be absolute and normalized.
pub fn relative(to: &Path, from: &Path) -> PathBuf {
    let to_components: Vec<_> = to.components().collect();
    let from_components: Vec<_> = from.components().collect();

    let common_len = to_components
        .iter()
        .zip(from_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common_len..from_components.len() {
        result.push("..");
    }
    for component in &to_components[common_len..] {
        result.push(component);
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Render a path with `/` separators, as map documents expect.
pub fn to_slash(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Final component of a path as a string, empty if there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
