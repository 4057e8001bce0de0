//! The `scala-sdk` extension.
//!
//! The builder leaves Scala standard library ids alone; this extension
//! wires them as non-exported library dependencies so that only the module
//! that declares the SDK compiles against it.

use anyhow::{bail, Result};

use crate::core::{LibraryDependency, TargetGraph};
use crate::resolver::context::ResolutionContext;
use crate::resolver::extension::ResolverExtension;
use crate::resolver::module_graph::ModuleGraph;

/// Library id prefix of the Scala standard library.
pub const SCALA_LIBRARY_PREFIX: &str = "org.scala-lang:scala-library";

/// Whether a library id names the Scala standard library.
pub fn is_scala_library(library_id: &str) -> bool {
    library_id.starts_with(SCALA_LIBRARY_PREFIX)
}

/// Adds Scala standard library dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalaSdkExtension;

impl ScalaSdkExtension {
    pub const NAME: &'static str = "scala-sdk";
}

impl ResolverExtension for ScalaSdkExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn resolve(
        &self,
        graph: &TargetGraph,
        modules: &mut ModuleGraph,
        ctx: &ResolutionContext,
    ) -> Result<()> {
        let mut missing = Vec::new();

        for (address, target) in graph.targets() {
            let Some(id) = modules.for_target(address) else {
                continue;
            };

            for library in target.library_ids().into_iter().filter(|l| is_scala_library(l)) {
                let artifacts = graph.library(library);
                if artifacts.is_empty() {
                    if ctx.requires_artifacts() {
                        missing.push(library.to_string());
                    }
                    continue;
                }

                let module = modules.module_mut(id);
                if module.add_library(LibraryDependency {
                    library: library.to_string(),
                    artifacts: artifacts.to_vec(),
                    exported: false,
                }) {
                    tracing::debug!("added Scala SDK `{}` to {}", library, module.name());
                }
            }
        }

        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            bail!("no artifacts for Scala SDK {}", missing.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Module, ModuleOrigin, Target, TargetAddress};
    use std::path::PathBuf;

    const SDK: &str = "org.scala-lang:scala-library:2.12.8";

    fn setup(with_artifacts: bool) -> (TargetGraph, ModuleGraph) {
        let mut graph = TargetGraph::new();
        graph.add_target("a:main", Target::new(None).with_library(SDK).with_library("guava"));
        if with_artifacts {
            graph.add_library(SDK, vec![PathBuf::from("/jars/scala-library.jar")]);
        }

        let mut modules = ModuleGraph::new();
        let address = TargetAddress::new("a:main");
        modules.add_module(Module::new(
            address.module_name(),
            ModuleOrigin::Target { address },
            "a",
            "a",
        ));
        (graph, modules)
    }

    #[test]
    fn test_is_scala_library() {
        assert!(is_scala_library(SDK));
        assert!(is_scala_library("org.scala-lang:scala-library"));
        assert!(!is_scala_library("org.scala-lang:scala-reflect:2.12.8"));
    }

    #[test]
    fn test_adds_non_exported_sdk() {
        let (graph, mut modules) = setup(true);
        let ctx = ResolutionContext::new(None);
        ScalaSdkExtension.resolve(&graph, &mut modules, &ctx).unwrap();

        let id = modules.find("a_main").unwrap();
        let libraries = modules.module(id).libraries();
        assert_eq!(libraries.len(), 1);
        assert_eq!(libraries[0].library, SDK);
        assert!(!libraries[0].exported);
        assert_eq!(libraries[0].artifacts, vec![PathBuf::from("/jars/scala-library.jar")]);
    }

    #[test]
    fn test_missing_sdk_fails() {
        let (graph, mut modules) = setup(false);
        let ctx = ResolutionContext::new(None);
        let err = ScalaSdkExtension.resolve(&graph, &mut modules, &ctx).unwrap_err();
        assert!(err.to_string().contains(SDK));
    }

    #[test]
    fn test_missing_sdk_in_preview_is_skipped() {
        let (graph, mut modules) = setup(false);
        let ctx = ResolutionContext::new(None).with_preview(true);
        ScalaSdkExtension.resolve(&graph, &mut modules, &ctx).unwrap();

        let id = modules.find("a_main").unwrap();
        assert!(modules.module(id).libraries().is_empty());
    }
}
