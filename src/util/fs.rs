//! Filesystem and path utilities.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Get the relative path from `base` to `path`.
///
/// `base` itself maps to `.`. Paths that cannot be expressed relative to
/// `base` (a relative `path` against an absolute `base`) are returned as-is.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    match pathdiff::diff_paths(path, base) {
        Some(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Some(rel) => rel,
        None => path.to_path_buf(),
    }
}

/// The deepest directory containing every path, compared component-wise.
///
/// Returns `None` for an empty list or when the paths share no component
/// (for absolute paths the filesystem root does not count).
pub fn common_ancestor<P: AsRef<Path>>(paths: &[P]) -> Option<PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut common: Vec<Component<'_>> = first.as_ref().components().collect();

    for path in rest {
        let shared = common
            .iter()
            .zip(path.as_ref().components())
            .take_while(|(a, b)| *a == b)
            .count();
        common.truncate(shared);
    }

    let meaningful = common
        .iter()
        .any(|c| matches!(c, Component::Normal(_)));
    if !meaningful {
        return None;
    }

    Some(common.iter().collect())
}

/// File names in a directory, sorted. Unreadable directories have none.
pub fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_common_ancestor() {
        assert_eq!(
            common_ancestor(&["/w/a/src/java", "/w/a/src/scala"]),
            Some(PathBuf::from("/w/a/src"))
        );
        assert_eq!(
            common_ancestor(&["/w/a/src/java"]),
            Some(PathBuf::from("/w/a/src/java"))
        );
        assert_eq!(common_ancestor(&["a/x", "a/xy"]), Some(PathBuf::from("a")));
    }

    #[test]
    fn test_common_ancestor_none() {
        let empty: [&str; 0] = [];
        assert_eq!(common_ancestor(&empty), None);
        assert_eq!(common_ancestor(&["a/x", "b/y"]), None);
        assert_eq!(common_ancestor(&["/a", "/b"]), None);
    }

    #[test]
    fn test_relative_path() {
        let base = Path::new("/w/project");
        assert_eq!(relative_path(base, Path::new("/w/project/a/src")), PathBuf::from("a/src"));
        assert_eq!(relative_path(base, Path::new("/w/project")), PathBuf::from("."));
        assert_eq!(relative_path(base, Path::new("/w/shared/src")), PathBuf::from("../shared/src"));
        assert_eq!(relative_path(base, Path::new("/w/projectx")), PathBuf::from("../projectx"));
        assert_eq!(relative_path(base, Path::new("a/src")), PathBuf::from("a/src"));
    }

    #[test]
    fn test_file_names() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("BUILD"), "").unwrap();
        fs::write(tmp.path().join("Foo.java"), "").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        assert_eq!(file_names(tmp.path()), vec!["BUILD", "Foo.java"]);
        assert!(file_names(&tmp.path().join("missing")).is_empty());
    }
}
