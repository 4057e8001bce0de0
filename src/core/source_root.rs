//! Source roots - the unit of sharing between targets.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::source_type::SourceKind;

/// A source directory plus the package prefix its files live under.
///
/// Two roots are the same root when both the path and the prefix match,
/// regardless of which target declared them. An empty prefix and a missing
/// prefix are the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRoot {
    /// Directory containing the sources
    pub source_root: PathBuf,

    /// Package (namespace) prefix of the sources, if any
    #[serde(default, deserialize_with = "nullize")]
    pub package_prefix: Option<String>,
}

fn nullize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl SourceRoot {
    /// Create a root without a package prefix.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        SourceRoot {
            source_root: source_root.into(),
            package_prefix: None,
        }
    }

    /// Set the package prefix. An empty prefix clears it.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.package_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// The declared path.
    pub fn path(&self) -> &Path {
        &self.source_root
    }

    /// The package prefix, if any.
    pub fn package_prefix(&self) -> Option<&str> {
        self.package_prefix.as_deref()
    }

    /// The path to register for a given source kind.
    ///
    /// Code roots are registered as declared. Resource roots cannot carry a
    /// package prefix in the IDE, so when the declared path ends in the
    /// prefix's directories (`res/com/example` with prefix `com.example`)
    /// the resource base above them (`res`) is registered instead.
    pub fn path_for(&self, kind: SourceKind) -> PathBuf {
        if !kind.is_resource() {
            return self.source_root.clone();
        }

        let Some(prefix) = self.package_prefix() else {
            return self.source_root.clone();
        };

        let prefix_dirs: PathBuf = prefix.split('.').collect();
        let mut base = self.source_root.clone();
        if prefix_dirs.as_os_str().is_empty() || !base.ends_with(&prefix_dirs) {
            return base;
        }
        for _ in prefix_dirs.components() {
            base.pop();
        }
        base
    }

    /// The package prefix to register for a given source kind.
    pub fn package_prefix_for(&self, kind: SourceKind) -> Option<&str> {
        if kind.is_resource() {
            None
        } else {
            self.package_prefix()
        }
    }
}

impl fmt::Display for SourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.package_prefix() {
            Some(prefix) => write!(f, "{} ({})", self.source_root.display(), prefix),
            None => write!(f, "{}", self.source_root.display()),
        }
    }
}
