//! Resolver extensions - post-processing hooks run after the builder passes.
//!
//! Extensions are registered by name up front and enabled per resolution.
//! Each one runs in isolation: an error from one is recorded as a warning
//! and the others still run.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

use crate::core::TargetGraph;
use crate::resolver::context::ResolutionContext;
use crate::resolver::module_graph::ModuleGraph;
use crate::resolver::scala::ScalaSdkExtension;

/// A named post-processing step over a resolved module graph.
pub trait ResolverExtension: fmt::Debug {
    /// Name the extension is enabled by.
    fn name(&self) -> &str;

    /// Mutate the module graph using the full target graph.
    ///
    /// Changes made before an error is returned are kept.
    fn resolve(
        &self,
        graph: &TargetGraph,
        modules: &mut ModuleGraph,
        ctx: &ResolutionContext,
    ) -> Result<()>;
}

/// Registry of available extensions.
///
/// Construction never fails; whether an extension is used is decided by
/// the list of enabled names passed to the resolver.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Box<dyn ResolverExtension>>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ExtensionRegistry::default()
    }

    /// Create a registry with the built-in extensions.
    pub fn with_builtins() -> Self {
        let mut registry = ExtensionRegistry::new();
        registry.register(Box::new(ScalaSdkExtension));
        registry
    }

    /// Register an extension, replacing one with the same name.
    pub fn register(&mut self, extension: Box<dyn ResolverExtension>) {
        let name = extension.name().to_string();
        if self.extensions.insert(name.clone(), extension).is_some() {
            tracing::debug!("extension `{}` replaced", name);
        }
    }

    /// Get an extension by name.
    pub fn get(&self, name: &str) -> Option<&dyn ResolverExtension> {
        self.extensions.get(name).map(|e| e.as_ref())
    }

    /// Registered extension names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check if an extension is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
