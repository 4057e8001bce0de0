//! Project resolution.
//!
//! Turns the build tool's target graph into a module graph. The resolver is
//! pure apart from the build file lookup injected through the
//! [`ResolutionContext`]: the same payload and context always yield the same
//! graph.

pub mod builder;
pub mod common_roots;
pub mod context;
pub mod errors;
pub mod extension;
pub mod module_graph;
pub mod scala;

pub use builder::ModuleGraphBuilder;
pub use common_roots::{plan_common_roots, CommonRoots, MergePlan, RootPlan};
pub use context::{BuildFileLookup, FsBuildFiles, NoBuildFiles, ResolutionContext};
pub use errors::{ResolveError, ResolveWarning, SuppressedCycle};
pub use extension::{ExtensionRegistry, ResolverExtension};
pub use module_graph::{EdgeOutcome, ModuleDependency, ModuleGraph, ModuleId};
pub use scala::{is_scala_library, ScalaSdkExtension, SCALA_LIBRARY_PREFIX};

use crate::core::TargetGraph;

/// Result of one resolution: the module graph plus everything that was
/// worked around to build it.
#[derive(Debug, Clone)]
pub struct Resolution {
    modules: ModuleGraph,
    warnings: Vec<ResolveWarning>,
}

impl Resolution {
    /// The resolved module graph.
    pub fn modules(&self) -> &ModuleGraph {
        &self.modules
    }

    /// Non-fatal conditions, in the order they were met.
    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// Module dependencies dropped to avoid two-module cycles.
    pub fn suppressed_cycles(&self) -> &[SuppressedCycle] {
        self.modules.suppressed_cycles()
    }
}

/// Resolves target graphs into module graphs.
#[derive(Debug)]
pub struct ProjectResolver {
    ctx: ResolutionContext,
    registry: ExtensionRegistry,
    extensions: Vec<String>,
}

impl ProjectResolver {
    /// Create a resolver with the built-in extensions registered but none
    /// enabled.
    pub fn new(ctx: ResolutionContext) -> Self {
        ProjectResolver {
            ctx,
            registry: ExtensionRegistry::with_builtins(),
            extensions: Vec::new(),
        }
    }

    /// Use a different extension registry.
    pub fn with_registry(mut self, registry: ExtensionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enable extensions by name. They run in the given order.
    pub fn with_extensions(mut self, names: Vec<String>) -> Self {
        self.extensions = names;
        self
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.ctx
    }

    /// Parse a payload and resolve it.
    ///
    /// Fails only when the payload is not a target graph; no partial graph
    /// is returned in that case.
    pub fn resolve(&self, payload: &str) -> Result<Resolution, ResolveError> {
        let graph = TargetGraph::parse(payload)?;
        tracing::debug!("parsed {} targets", graph.len());
        Ok(self.resolve_graph(&graph))
    }

    /// Resolve an already parsed target graph.
    pub fn resolve_graph(&self, graph: &TargetGraph) -> Resolution {
        let (mut modules, mut warnings) = ModuleGraphBuilder::new(graph, &self.ctx).build();

        for name in &self.extensions {
            let Some(extension) = self.registry.get(name) else {
                let warning = ResolveWarning::UnknownExtension {
                    extension: name.clone(),
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
                continue;
            };

            tracing::debug!("running extension {}", name);
            if let Err(e) = extension.resolve(graph, &mut modules, &self.ctx) {
                let warning = ResolveWarning::ExtensionFailure {
                    extension: name.clone(),
                    message: format!("{:#}", e),
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
            }
        }

        tracing::debug!(
            "resolved {} modules with {} warnings",
            modules.len(),
            warnings.len()
        );
        Resolution { modules, warnings }
    }
}
