//! Resolved modules - the output side of the project model.
//!
//! Module-to-module edges live on the [`ModuleGraph`](crate::resolver::ModuleGraph);
//! everything a module owns by itself lives here.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::address::TargetAddress;
use crate::core::source_root::SourceRoot;
use crate::core::source_type::SourceKind;

/// A source root path that cannot be registered under a content root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("source root `{}` is not under content root `{}`", path.display(), content_root.display())]
pub struct InvalidSourceRootPath {
    pub path: PathBuf,
    pub content_root: PathBuf,
}

/// A classified source root attached to a content root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRootEntry {
    pub path: PathBuf,
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_prefix: Option<String>,
}

/// The directory a module covers, with the source roots registered in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRoot {
    path: PathBuf,
    source_roots: Vec<SourceRootEntry>,
}

impl ContentRoot {
    /// Create a content root with no source roots.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ContentRoot {
            path: path.into(),
            source_roots: Vec::new(),
        }
    }

    /// The content root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registered source roots, in registration order.
    pub fn source_roots(&self) -> &[SourceRootEntry] {
        &self.source_roots
    }

    /// Register a source root under this content root.
    ///
    /// Returns `Ok(false)` when the same path is already registered with the
    /// same kind.
    pub fn store_path(
        &mut self,
        kind: SourceKind,
        path: PathBuf,
        package_prefix: Option<&str>,
    ) -> Result<bool, InvalidSourceRootPath> {
        if !self.contains(&path) {
            return Err(InvalidSourceRootPath {
                path,
                content_root: self.path.clone(),
            });
        }

        if self
            .source_roots
            .iter()
            .any(|entry| entry.path == path && entry.kind == kind)
        {
            return Ok(false);
        }

        self.source_roots.push(SourceRootEntry {
            path,
            kind,
            package_prefix: package_prefix.map(str::to_string),
        });
        Ok(true)
    }

    fn contains(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        if self.path == Path::new(".") {
            return path.is_relative()
                && !path.components().any(|c| matches!(c, Component::ParentDir));
        }
        path.starts_with(&self.path)
    }
}

/// A dependency on an external library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryDependency {
    pub library: String,
    pub artifacts: Vec<PathBuf>,
    pub exported: bool,
}

/// Where a module came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleOrigin {
    /// Created for a single target
    Target { address: TargetAddress },
    /// Synthesized for a source root shared by several targets
    Merged { root: SourceRoot },
}

/// A resolved module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    origin: ModuleOrigin,
    content_root: ContentRoot,
    config_path: PathBuf,
    libraries: Vec<LibraryDependency>,
}

impl Module {
    /// Create a module with an empty content root.
    pub fn new(
        name: impl Into<String>,
        origin: ModuleOrigin,
        content_root: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        Module {
            name: name.into(),
            origin,
            content_root: ContentRoot::new(content_root),
            config_path: config_path.into(),
            libraries: Vec::new(),
        }
    }

    /// Internal module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn origin(&self) -> &ModuleOrigin {
        &self.origin
    }

    /// Address of the target this module was created for, if any.
    pub fn address(&self) -> Option<&TargetAddress> {
        match &self.origin {
            ModuleOrigin::Target { address } => Some(address),
            ModuleOrigin::Merged { .. } => None,
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self.origin, ModuleOrigin::Merged { .. })
    }

    pub fn content_root(&self) -> &ContentRoot {
        &self.content_root
    }

    pub fn content_root_mut(&mut self) -> &mut ContentRoot {
        &mut self.content_root
    }

    /// Build definition file (or directory) this module is linked to.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn libraries(&self) -> &[LibraryDependency] {
        &self.libraries
    }

    /// Add a library dependency. A library that is already present is kept
    /// as first added.
    pub fn add_library(&mut self, dependency: LibraryDependency) -> bool {
        if self
            .libraries
            .iter()
            .any(|existing| existing.library == dependency.library)
        {
            return false;
        }
        self.libraries.push(dependency);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_module(name: &str, root: &str) -> Module {
        Module::new(
            name,
            ModuleOrigin::Target {
                address: TargetAddress::new(format!("{name}:{name}")),
            },
            root,
            root,
        )
    }

    #[test]
    fn test_store_path_under_content_root() {
        let mut root = ContentRoot::new("a/src");
        assert_eq!(
            root.store_path(SourceKind::Source, "a/src/java".into(), Some("com.a")),
            Ok(true)
        );
        assert_eq!(root.store_path(SourceKind::Source, "a/src".into(), None), Ok(true));
        assert_eq!(root.source_roots().len(), 2);
        assert_eq!(root.source_roots()[0].package_prefix.as_deref(), Some("com.a"));
    }

    #[test]
    fn test_store_path_outside_content_root() {
        let mut root = ContentRoot::new("a/src");
        let err = root
            .store_path(SourceKind::Source, "b/src".into(), None)
            .unwrap_err();
        assert_eq!(err.path, PathBuf::from("b/src"));

        // component-wise, not textual
        assert!(root
            .store_path(SourceKind::Source, "a/srcgen".into(), None)
            .is_err());
        assert!(root.store_path(SourceKind::Source, "".into(), None).is_err());
    }

    #[test]
    fn test_store_path_under_working_directory_root() {
        let mut root = ContentRoot::new(".");
        assert_eq!(root.store_path(SourceKind::Test, "a/test".into(), None), Ok(true));
        assert!(root.store_path(SourceKind::Test, "../x".into(), None).is_err());
    }

    #[test]
    fn test_store_path_dedupes() {
        let mut root = ContentRoot::new("a");
        assert_eq!(root.store_path(SourceKind::Source, "a/src".into(), None), Ok(true));
        assert_eq!(root.store_path(SourceKind::Source, "a/src".into(), None), Ok(false));
        assert_eq!(root.source_roots().len(), 1);
    }

    #[test]
    fn test_add_library_keeps_first() {
        let mut module = target_module("a", "a");
        assert!(module.add_library(LibraryDependency {
            library: "junit".into(),
            artifacts: vec!["junit.jar".into()],
            exported: true,
        }));
        assert!(!module.add_library(LibraryDependency {
            library: "junit".into(),
            artifacts: vec![],
            exported: false,
        }));
        assert_eq!(module.libraries().len(), 1);
        assert!(module.libraries()[0].exported);
    }
}
