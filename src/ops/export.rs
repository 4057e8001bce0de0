//! Rendering a resolution for the consumer.
//!
//! The JSON form is the machine-readable project model; the text form is
//! for people.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{LibraryDependency, Module, SourceRootEntry};
use crate::resolver::{ModuleGraph, ModuleId, Resolution, ResolveWarning, SuppressedCycle};

/// Serializable view of a resolution.
#[derive(Debug, Serialize)]
pub struct ResolutionReport<'a> {
    pub modules: Vec<ModuleReport<'a>>,
    pub warnings: Vec<WarningReport>,
    pub suppressed_cycles: &'a [SuppressedCycle],
}

/// Serializable view of one module.
#[derive(Debug, Serialize)]
pub struct ModuleReport<'a> {
    pub name: &'a str,
    pub content_root: &'a Path,
    pub config_path: &'a Path,
    pub source_roots: &'a [SourceRootEntry],
    pub module_dependencies: Vec<ModuleDependencyReport<'a>>,
    pub library_dependencies: &'a [LibraryDependency],
}

#[derive(Debug, Serialize)]
pub struct ModuleDependencyReport<'a> {
    pub module: &'a str,
    pub exported: bool,
}

#[derive(Debug, Serialize)]
pub struct WarningReport {
    pub code: &'static str,
    pub message: String,
}

impl From<&ResolveWarning> for WarningReport {
    fn from(warning: &ResolveWarning) -> Self {
        WarningReport {
            code: warning.code(),
            message: warning.to_string(),
        }
    }
}

/// Build the serializable view of a resolution.
pub fn report(resolution: &Resolution) -> ResolutionReport<'_> {
    let graph = resolution.modules();
    ResolutionReport {
        modules: graph
            .modules()
            .map(|(id, module)| module_report(graph, id, module))
            .collect(),
        warnings: resolution.warnings().iter().map(WarningReport::from).collect(),
        suppressed_cycles: resolution.suppressed_cycles(),
    }
}

fn module_report<'a>(graph: &'a ModuleGraph, id: ModuleId, module: &'a Module) -> ModuleReport<'a> {
    ModuleReport {
        name: module.name(),
        content_root: module.content_root().path(),
        config_path: module.config_path(),
        source_roots: module.content_root().source_roots(),
        module_dependencies: graph
            .dependencies(id)
            .into_iter()
            .map(|dep| ModuleDependencyReport {
                module: graph.module(dep.module).name(),
                exported: dep.exported,
            })
            .collect(),
        library_dependencies: module.libraries(),
    }
}

/// Render a resolution as pretty-printed JSON.
pub fn to_json(resolution: &Resolution) -> Result<String> {
    serde_json::to_string_pretty(&report(resolution)).context("failed to serialize module graph")
}

/// Render a resolution as text, one block per module.
pub fn format_text(resolution: &Resolution) -> String {
    let graph = resolution.modules();
    let mut out = String::new();

    for (id, module) in graph.modules() {
        let merged = if module.is_merged() { " (merged)" } else { "" };
        let _ = writeln!(out, "{}{}", module.name(), merged);
        let _ = writeln!(out, "  content root: {}", module.content_root().path().display());
        let _ = writeln!(out, "  config: {}", module.config_path().display());

        for entry in module.content_root().source_roots() {
            match &entry.package_prefix {
                Some(prefix) => {
                    let _ = writeln!(out, "  {} root: {} ({})", entry.kind, entry.path.display(), prefix);
                }
                None => {
                    let _ = writeln!(out, "  {} root: {}", entry.kind, entry.path.display());
                }
            }
        }

        for dep in graph.dependencies(id) {
            let _ = writeln!(
                out,
                "  → {}{}",
                graph.module(dep.module).name(),
                exported_marker(dep.exported)
            );
        }

        for library in module.libraries() {
            let _ = writeln!(
                out,
                "  library {} ({} artifacts){}",
                library.library,
                library.artifacts.len(),
                exported_marker(library.exported)
            );
        }
    }

    if !resolution.suppressed_cycles().is_empty() {
        let _ = writeln!(out, "\nSuppressed cycles:");
        for cycle in resolution.suppressed_cycles() {
            let _ = writeln!(out, "  {} → {}", cycle.from, cycle.to);
        }
    }

    out
}

/// Marker appended to exported edges.
pub fn exported_marker(exported: bool) -> &'static str {
    if exported {
        " [exported]"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ProjectResolver, ResolutionContext};
    use crate::test_support::{main_and_test_payload, PayloadBuilder, TargetSpec};
    use serde_json::Value;

    fn resolve(payload: &str) -> Resolution {
        ProjectResolver::new(ResolutionContext::new(None))
            .resolve(payload)
            .unwrap()
    }

    #[test]
    fn test_json_shape() {
        let resolution = resolve(&main_and_test_payload());
        let json: Value = serde_json::from_str(&to_json(&resolution).unwrap()).unwrap();

        let modules = json["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 2);

        let test = &modules[1];
        assert_eq!(test["name"], "a_test");
        assert_eq!(test["content_root"], "a/src/test");
        assert_eq!(test["source_roots"][0]["kind"], "test");
        assert_eq!(test["module_dependencies"][0]["module"], "a_main");
        assert_eq!(test["module_dependencies"][0]["exported"], true);
        assert_eq!(test["library_dependencies"][0]["library"], "junit:junit:4.12");
        assert_eq!(
            test["library_dependencies"][0]["artifacts"][0],
            "/jars/junit-4.12.jar"
        );

        assert!(json["warnings"].as_array().unwrap().is_empty());
        assert!(json["suppressed_cycles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_warnings_and_cycles() {
        let payload = PayloadBuilder::new()
            .target("a:main", TargetSpec::new().root("a/src").depends_on("b:main").library("lib:foo"))
            .target("b:main", TargetSpec::new().root("b/src").depends_on("a:main"))
            .build();
        let resolution = resolve(&payload);
        let json: Value = serde_json::from_str(&to_json(&resolution).unwrap()).unwrap();

        assert_eq!(json["warnings"][0]["code"], "missing-library-artifacts");
        assert_eq!(json["suppressed_cycles"][0]["from"], "b_main");
        assert_eq!(json["suppressed_cycles"][0]["to"], "a_main");
    }

    #[test]
    fn test_text_format() {
        let resolution = resolve(&main_and_test_payload());
        let text = format_text(&resolution);

        assert!(text.contains("a_test\n"));
        assert!(text.contains("  test root: a/src/test"));
        assert!(text.contains("  → a_main [exported]"));
        assert!(text.contains("  library junit:junit:4.12 (1 artifacts) [exported]"));
        assert!(!text.contains("Suppressed cycles"));
    }
}
