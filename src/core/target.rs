//! Target definitions - build units as reported by the build tool.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::address::TargetAddress;
use crate::core::source_root::SourceRoot;
use crate::core::source_type::SourceKind;

/// One build unit from the target graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Type tag (`source`, `test`, `resource`, ...), if reported
    #[serde(default)]
    pub target_type: Option<String>,

    /// Source roots, in declaration order
    #[serde(default)]
    pub roots: Vec<SourceRoot>,

    /// Addresses of the targets this one depends on
    #[serde(default)]
    pub targets: Vec<TargetAddress>,

    /// Library ids this target depends on
    #[serde(default)]
    pub libraries: Vec<String>,
}

impl Target {
    /// Create an empty target with the given type tag.
    pub fn new(target_type: Option<&str>) -> Self {
        Target {
            target_type: target_type.map(str::to_string),
            ..Target::default()
        }
    }

    /// Add a source root.
    pub fn with_root(mut self, root: SourceRoot) -> Self {
        self.roots.push(root);
        self
    }

    /// Add a dependency on another target.
    pub fn with_dependency(mut self, address: impl Into<TargetAddress>) -> Self {
        self.targets.push(address.into());
        self
    }

    /// Add a library dependency.
    pub fn with_library(mut self, library_id: impl Into<String>) -> Self {
        self.libraries.push(library_id.into());
        self
    }

    /// A target with nothing to contribute: no roots, no dependencies and
    /// no libraries.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.targets.is_empty() && self.libraries.is_empty()
    }

    /// The source kind of this target's roots.
    pub fn source_kind(&self) -> SourceKind {
        SourceKind::for_target_type(self.target_type.as_deref())
    }

    /// Source roots with repeated declarations removed, in declaration order.
    pub fn unique_roots(&self) -> IndexSet<&SourceRoot> {
        self.roots.iter().collect()
    }

    /// Whether the target has exactly one distinct source root.
    pub fn has_single_root(&self) -> bool {
        self.unique_roots().len() == 1
    }

    /// Dependency addresses with repeats removed, in declaration order.
    pub fn dependencies(&self) -> IndexSet<&TargetAddress> {
        self.targets.iter().collect()
    }

    /// Library ids with repeats removed, in declaration order.
    pub fn library_ids(&self) -> IndexSet<&str> {
        self.libraries.iter().map(String::as_str).collect()
    }
}
