//! Per-resolution context.
//!
//! Everything a resolution needs from the outside world is held here: the
//! build root the payload was produced in, whether library artifacts must
//! exist, and how to look up build definition files. Nothing in here is
//! shared between resolutions.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::util::config::DEFAULT_BUILD_FILE_NAME;
use crate::util::fs::{file_names, relative_path};

/// Finds the build definition file for a target directory.
pub trait BuildFileLookup: fmt::Debug {
    /// The build definition file in `dir` (relative to the build root).
    ///
    /// The returned path is relative to the build root as well.
    fn find_build_file(&self, dir: &Path) -> Option<PathBuf>;
}

/// Lookup used when there is no build root to probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBuildFiles;

impl BuildFileLookup for NoBuildFiles {
    fn find_build_file(&self, _dir: &Path) -> Option<PathBuf> {
        None
    }
}

/// Looks for build definition files on disk under a build root.
#[derive(Debug, Clone)]
pub struct FsBuildFiles {
    root: PathBuf,
    names: Vec<String>,
}

impl FsBuildFiles {
    /// Probe for `BUILD` / `BUILD.*` files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsBuildFiles {
            root: root.into(),
            names: vec![DEFAULT_BUILD_FILE_NAME.to_string()],
        }
    }

    /// Use different build file name stems.
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }
}

impl BuildFileLookup for FsBuildFiles {
    fn find_build_file(&self, dir: &Path) -> Option<PathBuf> {
        file_names(&self.root.join(dir))
            .into_iter()
            .find(|name| is_build_file_name(name, &self.names))
            .map(|name| dir.join(name))
    }
}

/// Whether `name` is one of the build file names or a dotted variant of
/// one (`BUILD`, `BUILD.tools`).
pub fn is_build_file_name(name: &str, stems: &[String]) -> bool {
    stems.iter().any(|stem| {
        name == stem
            || name
                .strip_prefix(stem.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// State for one resolution.
#[derive(Debug)]
pub struct ResolutionContext {
    /// Build root the payload's paths are relative to
    work_dir: Option<PathBuf>,

    /// Whether library artifacts must be present (false in preview mode)
    generate_artifacts: bool,

    /// Build definition file lookup
    build_files: Box<dyn BuildFileLookup>,
}

impl ResolutionContext {
    /// Create a context for a full (non-preview) resolution.
    pub fn new(work_dir: Option<PathBuf>) -> Self {
        ResolutionContext {
            work_dir,
            generate_artifacts: true,
            build_files: Box::new(NoBuildFiles),
        }
    }

    /// Set preview mode: dependency structure only, artifacts optional.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.generate_artifacts = !preview;
        self
    }

    /// Set the build file lookup.
    pub fn with_build_files(mut self, lookup: Box<dyn BuildFileLookup>) -> Self {
        self.build_files = lookup;
        self
    }

    /// The build root, if known.
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Whether missing library artifacts should be reported.
    pub fn requires_artifacts(&self) -> bool {
        self.generate_artifacts
    }

    /// Express a path relative to the build root, when one is known.
    pub fn relativize(&self, path: &Path) -> PathBuf {
        match self.work_dir.as_deref() {
            Some(root) => relative_path(root, path),
            None => path.to_path_buf(),
        }
    }

    /// The build definition file of a target directory.
    pub fn find_build_file(&self, dir: &Path) -> Option<PathBuf> {
        self.build_files.find_build_file(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_file_names() {
        let stems = vec!["BUILD".to_string()];
        assert!(is_build_file_name("BUILD", &stems));
        assert!(is_build_file_name("BUILD.tools", &stems));
        assert!(!is_build_file_name("BUILDER", &stems));
        assert!(!is_build_file_name("build", &stems));
    }

    #[test]
    fn test_fs_build_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        std::fs::write(tmp.path().join("a/b/BUILD.jvm"), "").unwrap();
        std::fs::write(tmp.path().join("a/b/Main.java"), "").unwrap();

        let lookup = FsBuildFiles::new(tmp.path());
        assert_eq!(
            lookup.find_build_file(Path::new("a/b")),
            Some(PathBuf::from("a/b/BUILD.jvm"))
        );
        assert_eq!(lookup.find_build_file(Path::new("a")), None);
        assert_eq!(lookup.find_build_file(Path::new("missing")), None);
    }

    #[test]
    fn test_relativize() {
        let ctx = ResolutionContext::new(Some(PathBuf::from("/w/project")));
        assert_eq!(ctx.relativize(Path::new("/w/project/a/src")), PathBuf::from("a/src"));
        assert_eq!(ctx.relativize(Path::new("/w/project")), PathBuf::from("."));
        assert_eq!(ctx.relativize(Path::new("/w/shared/src")), PathBuf::from("../shared/src"));
        assert_eq!(ctx.relativize(Path::new("a/src")), PathBuf::from("a/src"));

        let ctx = ResolutionContext::new(None);
        assert_eq!(ctx.relativize(Path::new("/w/a")), PathBuf::from("/w/a"));
    }

    #[test]
    fn test_preview_mode() {
        assert!(ResolutionContext::new(None).requires_artifacts());
        assert!(!ResolutionContext::new(None).with_preview(true).requires_artifacts());
    }
}
