//! Test utilities and mocks for depmap unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use depmap::test_support::{MockBuildFiles, PayloadBuilder};
//!
//! #[test]
//! fn test_example() {
//!     let payload = PayloadBuilder::new()
//!         .target("a:main", TargetSpec::new().root("a/src"))
//!         .build();
//!     let lookup = MockBuildFiles::new().with_file("a/BUILD");
//!     // Resolve with the payload and lookup...
//! }
//! ```

pub mod fixtures;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::resolver::BuildFileLookup;

// Re-export fixtures for convenience
pub use fixtures::*;

/// In-memory build file lookup.
///
/// Knows a fixed set of build file paths (relative to the build root) and
/// never touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MockBuildFiles {
    files: BTreeSet<PathBuf>,
}

impl MockBuildFiles {
    /// Create a lookup that knows no build files.
    pub fn new() -> Self {
        MockBuildFiles::default()
    }

    /// Add a build file.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.insert(path.as_ref().to_path_buf());
        self
    }
}

impl BuildFileLookup for MockBuildFiles {
    fn find_build_file(&self, dir: &Path) -> Option<PathBuf> {
        self.files
            .iter()
            .find(|file| file.parent() == Some(dir))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_build_files() {
        let lookup = MockBuildFiles::new()
            .with_file("a/b/BUILD")
            .with_file("a/BUILD.tools");

        assert_eq!(lookup.find_build_file(Path::new("a/b")), Some(PathBuf::from("a/b/BUILD")));
        assert_eq!(lookup.find_build_file(Path::new("a")), Some(PathBuf::from("a/BUILD.tools")));
        assert_eq!(lookup.find_build_file(Path::new("c")), None);
    }
}
