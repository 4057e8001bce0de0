//! ModuleGraph - the resolved project model.
//!
//! Modules are nodes; module dependencies are edges weighted with their
//! exported flag. The graph is built in one resolution pass and is
//! read-only for the consumer afterwards.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::core::{Module, TargetAddress};
use crate::resolver::errors::SuppressedCycle;

/// Identifier of a module within one graph.
pub type ModuleId = NodeIndex;

/// An outgoing module dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDependency {
    pub module: ModuleId,
    pub exported: bool,
}

/// What happened to a requested module dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was added
    Added,
    /// The same edge already existed; the first one is kept
    Duplicate,
    /// A module never depends on itself
    SelfEdge,
    /// The reverse edge already existed; this one was dropped
    Cycle,
}

/// The resolved module graph.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    /// Modules and their dependencies
    graph: DiGraph<Module, bool>,

    /// Module by name
    by_name: HashMap<String, ModuleId>,

    /// Module created for each target address
    by_address: HashMap<TargetAddress, ModuleId>,

    /// Edges dropped to keep the graph free of two-module cycles
    suppressed: Vec<SuppressedCycle>,
}

impl ModuleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        ModuleGraph::default()
    }

    /// Add a module.
    ///
    /// A module whose name is taken gets the first free `_2`, `_3`, ...
    /// suffix.
    pub fn add_module(&mut self, mut module: Module) -> ModuleId {
        if self.by_name.contains_key(module.name()) {
            let base = module.name().to_string();
            let mut n = 2;
            let mut unique = format!("{}_{}", base, n);
            while self.by_name.contains_key(&unique) {
                n += 1;
                unique = format!("{}_{}", base, n);
            }
            tracing::debug!("module name `{}` is taken, using `{}`", module.name(), unique);
            module.set_name(unique);
        }

        let name = module.name().to_string();
        let address = module.address().cloned();
        let id = self.graph.add_node(module);

        self.by_name.insert(name, id);
        if let Some(address) = address {
            self.by_address.insert(address, id);
        }
        id
    }

    /// Get a module.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.graph[id]
    }

    /// Get a module mutably.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.graph[id]
    }

    /// Find a module by name.
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.by_name.get(name).copied()
    }

    /// The module created for a target, if one was.
    pub fn for_target(&self, address: &TargetAddress) -> Option<ModuleId> {
        self.by_address.get(address).copied()
    }

    /// Iterate over modules in creation order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Add a dependency edge `from -> to`.
    ///
    /// The edge is dropped when `to` already depends on `from`: whichever
    /// direction is added first wins.
    pub fn add_dependency(&mut self, from: ModuleId, to: ModuleId, exported: bool) -> EdgeOutcome {
        if from == to {
            return EdgeOutcome::SelfEdge;
        }

        if self.graph.contains_edge(to, from) {
            let cycle = SuppressedCycle {
                from: self.graph[from].name().to_string(),
                to: self.graph[to].name().to_string(),
            };
            tracing::debug!(
                "Found cyclic dependency between {} and {}",
                cycle.to,
                cycle.from
            );
            self.suppressed.push(cycle);
            return EdgeOutcome::Cycle;
        }

        if self.graph.contains_edge(from, to) {
            return EdgeOutcome::Duplicate;
        }

        self.graph.add_edge(from, to, exported);
        EdgeOutcome::Added
    }

    /// Direct dependencies of a module, in the order they were added.
    pub fn dependencies(&self, id: ModuleId) -> Vec<ModuleDependency> {
        let mut edges: Vec<_> = self
            .graph
            .edges(id)
            .map(|edge| {
                (
                    edge.id(),
                    ModuleDependency {
                        module: edge.target(),
                        exported: *edge.weight(),
                    },
                )
            })
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, dep)| dep).collect()
    }

    /// Modules that depend on the given module, in creation order.
    pub fn dependents(&self, id: ModuleId) -> Vec<ModuleId> {
        let mut dependents: Vec<_> = self
            .graph
            .neighbors_directed(id, Direction::Incoming)
            .collect();
        dependents.sort();
        dependents.dedup();
        dependents
    }

    /// Whether `from` depends directly on `to`.
    pub fn depends_on(&self, from: ModuleId, to: ModuleId) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// Edges dropped by cycle suppression, in the order they were met.
    pub fn suppressed_cycles(&self) -> &[SuppressedCycle] {
        &self.suppressed
    }
}
