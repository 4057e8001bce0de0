//! Module graph builder.
//!
//! Turns a parsed [`TargetGraph`] into a [`ModuleGraph`] in fixed passes:
//!
//! 1. one module per target that has something to contribute
//! 2. common-root ownership: owners recorded, merged modules synthesized
//! 3. source roots attached, or routed to the root's owner
//! 4. target dependencies
//! 5. library dependencies
//!
//! Edges are discovered in that order and in payload order within a pass,
//! which decides the winner whenever cycle suppression drops an edge.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::{
    canonical_module_name, LibraryDependency, Module, ModuleOrigin, SourceKind, SourceRoot,
    Target, TargetAddress, TargetGraph,
};
use crate::resolver::common_roots::{plan_common_roots, MergePlan, RootPlan};
use crate::resolver::context::ResolutionContext;
use crate::resolver::errors::ResolveWarning;
use crate::resolver::module_graph::{ModuleGraph, ModuleId};
use crate::resolver::scala::is_scala_library;
use crate::util::fs::common_ancestor;

/// Builds the module graph for one resolution.
pub struct ModuleGraphBuilder<'a> {
    graph: &'a TargetGraph,
    ctx: &'a ResolutionContext,
    modules: ModuleGraph,
    owners: HashMap<&'a SourceRoot, ModuleId>,
    warnings: Vec<ResolveWarning>,
}

impl<'a> ModuleGraphBuilder<'a> {
    pub fn new(graph: &'a TargetGraph, ctx: &'a ResolutionContext) -> Self {
        ModuleGraphBuilder {
            graph,
            ctx,
            modules: ModuleGraph::new(),
            owners: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Run every pass and return the graph with the warnings met.
    pub fn build(mut self) -> (ModuleGraph, Vec<ResolveWarning>) {
        self.create_modules();
        self.apply_common_roots();
        self.attach_source_roots();
        self.add_target_dependencies();
        self.add_libraries();
        (self.modules, self.warnings)
    }

    fn create_modules(&mut self) {
        for (address, target) in self.graph.targets() {
            if address.is_runtime_placeholder() {
                tracing::debug!("Skipping runtime library placeholder {}", address);
                continue;
            }
            if target.is_empty() {
                tracing::info!("Skipping empty target {}", address);
                continue;
            }

            let dir = target_dir(address);
            let content_root = self.content_root(target, &dir);
            let config_path = self
                .ctx
                .find_build_file(&dir)
                .unwrap_or_else(|| dir.clone());

            let module = Module::new(
                address.module_name(),
                ModuleOrigin::Target {
                    address: address.clone(),
                },
                content_root,
                self.ctx.relativize(&config_path),
            );
            self.modules.add_module(module);
        }
    }

    /// The deepest directory holding all of a target's roots, else its
    /// own directory.
    fn content_root(&self, target: &Target, dir: &Path) -> PathBuf {
        let kind = target.source_kind();
        let paths: Vec<PathBuf> = target
            .unique_roots()
            .iter()
            .map(|root| self.ctx.relativize(&root.path_for(kind)))
            .collect();

        common_ancestor(&paths)
            .or_else(|| (paths.len() == 1).then(|| paths[0].clone()))
            .unwrap_or_else(|| self.ctx.relativize(dir))
    }

    fn apply_common_roots(&mut self) {
        let modules = &self.modules;
        let plan = plan_common_roots(self.graph, |address| modules.for_target(address).is_some());
        self.warnings.extend(plan.warnings);

        for root_plan in plan.plans {
            match root_plan {
                RootPlan::Owner { root, owner } => {
                    if let Some(id) = self.modules.for_target(owner) {
                        self.owners.insert(root, id);
                    }
                }
                RootPlan::Merge(merge) => {
                    let id = self.add_merged_module(&merge);
                    self.owners.insert(merge.root, id);
                }
            }
        }
    }

    fn add_merged_module(&mut self, plan: &MergePlan<'a>) -> ModuleId {
        let root = plan.root;
        let path = self.ctx.relativize(&root.path_for(plan.kind));
        let name = match root.package_prefix() {
            Some(prefix) => prefix.to_string(),
            None => canonical_module_name(&path.to_string_lossy()),
        };

        let module = Module::new(
            name,
            ModuleOrigin::Merged { root: root.clone() },
            path.clone(),
            path,
        );
        let id = self.modules.add_module(module);
        tracing::debug!(
            "Created module {} for common source root {}",
            self.modules.module(id).name(),
            root
        );
        self.store_root(id, root, plan.kind);

        for dependency in &plan.dependencies {
            self.add_dependency_on_target(id, dependency, false);
        }
        for library in &plan.libraries {
            self.add_library(id, library, false);
        }
        id
    }

    fn attach_source_roots(&mut self) {
        for (address, target) in self.graph.targets() {
            let Some(id) = self.modules.for_target(address) else {
                continue;
            };

            let kind = target.source_kind();
            for root in target.unique_roots() {
                match self.owners.get(root).copied() {
                    Some(owner) if owner != id => {
                        self.modules.add_dependency(id, owner, true);
                    }
                    _ => self.store_root(id, root, kind),
                }
            }
        }
    }

    fn store_root(&mut self, id: ModuleId, root: &SourceRoot, kind: SourceKind) {
        let path = self.ctx.relativize(&root.path_for(kind));
        let module = self.modules.module_mut(id);
        if let Err(error) =
            module
                .content_root_mut()
                .store_path(kind, path, root.package_prefix_for(kind))
        {
            let warning = ResolveWarning::InvalidSourceRootPath {
                module: module.name().to_string(),
                root: root.clone(),
                error,
            };
            tracing::warn!("{}", warning);
            self.warnings.push(warning);
        }
    }

    fn add_target_dependencies(&mut self) {
        for (address, target) in self.graph.targets() {
            let Some(id) = self.modules.for_target(address) else {
                continue;
            };
            for dependency in target.dependencies() {
                self.add_dependency_on_target(id, dependency, true);
            }
        }
    }

    fn add_dependency_on_target(&mut self, id: ModuleId, dependency: &TargetAddress, exported: bool) {
        match self.modules.for_target(dependency) {
            Some(to) => {
                self.modules.add_dependency(id, to, exported);
            }
            None => tracing::debug!("no module for dependency {}", dependency),
        }
    }

    fn add_libraries(&mut self) {
        for (address, target) in self.graph.targets() {
            let Some(id) = self.modules.for_target(address) else {
                continue;
            };
            for library in target.library_ids() {
                self.add_library(id, library, true);
            }
        }
    }

    fn add_library(&mut self, id: ModuleId, library: &str, exported: bool) {
        if is_scala_library(library) {
            return;
        }

        let artifacts = self.graph.library(library);
        let module = self.modules.module_mut(id);
        if artifacts.is_empty() {
            if self.ctx.requires_artifacts() {
                let warning = ResolveWarning::MissingLibraryArtifacts {
                    module: module.name().to_string(),
                    library: library.to_string(),
                };
                tracing::warn!("{}", warning);
                self.warnings.push(warning);
            }
            return;
        }

        module.add_library(LibraryDependency {
            library: library.to_string(),
            artifacts: artifacts.to_vec(),
            exported,
        });
    }
}

/// A target's directory: the path part of its address, or the build root.
fn target_dir(address: &TargetAddress) -> PathBuf {
    match address.spec_path() {
        "" => PathBuf::from("."),
        path => PathBuf::from(path),
    }
}
