//! The parsed target graph.
//!
//! This is the build tool's dependency report as-is: targets keyed by
//! address plus a table from library id to artifact paths. Both maps keep
//! the order of the payload so every pass over the graph is deterministic.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::address::TargetAddress;
use crate::core::target::Target;
use crate::resolver::errors::ResolveError;

/// Name used for the payload in diagnostics.
const PAYLOAD_NAME: &str = "depmap.json";

/// Targets and libraries reported by the build tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGraph {
    /// Targets by address, in payload order
    targets: IndexMap<TargetAddress, Target>,

    /// Artifact paths by library id
    #[serde(default)]
    libraries: IndexMap<String, Vec<PathBuf>>,
}

impl TargetGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        TargetGraph::default()
    }

    /// Parse the build tool's JSON output.
    ///
    /// Fails with [`ResolveError::MalformedPayload`] when the text is empty
    /// or is not a target graph.
    pub fn parse(payload: &str) -> Result<Self, ResolveError> {
        if payload.trim().is_empty() {
            return Err(ResolveError::malformed(
                "no output from the build tool",
                PAYLOAD_NAME,
                payload,
                None,
            ));
        }

        serde_json::from_str(payload).map_err(|e| {
            tracing::debug!("can't parse payload: {}", e);
            let offset = offset_of(payload, e.line(), e.column());
            ResolveError::malformed(
                format!("can't parse project structure: {}", e),
                PAYLOAD_NAME,
                payload,
                offset,
            )
        })
    }

    /// Add a target, replacing any target with the same address.
    pub fn add_target(&mut self, address: impl Into<TargetAddress>, target: Target) {
        self.targets.insert(address.into(), target);
    }

    /// Add a library to the artifact table.
    pub fn add_library(&mut self, library_id: impl Into<String>, artifacts: Vec<PathBuf>) {
        self.libraries.insert(library_id.into(), artifacts);
    }

    /// Iterate over targets in payload order.
    pub fn targets(&self) -> impl Iterator<Item = (&TargetAddress, &Target)> {
        self.targets.iter()
    }

    /// Look up a target by address.
    pub fn target(&self, address: &TargetAddress) -> Option<&Target> {
        self.targets.get(address)
    }

    /// Artifact paths for a library id. Unknown ids have none.
    pub fn library(&self, library_id: &str) -> &[PathBuf] {
        self.libraries
            .get(library_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if there are no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Byte offset of a 1-based line/column position reported by serde_json.
fn offset_of(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(text.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceRoot;

    #[test]
    fn test_parse_payload() {
        let graph = TargetGraph::parse(
            r#"{
                "targets": {
                    "a:main": {
                        "target_type": "SOURCE",
                        "roots": [{"source_root": "/w/a/src", "package_prefix": "com.a"}],
                        "targets": [],
                        "libraries": ["junit:junit:4.12"]
                    },
                    "a:test": {
                        "target_type": "TEST",
                        "roots": [{"source_root": "/w/a/test", "package_prefix": null}],
                        "targets": ["a:main"],
                        "libraries": []
                    }
                },
                "libraries": {
                    "junit:junit:4.12": ["/cache/junit-4.12.jar"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(graph.len(), 2);
        let order: Vec<_> = graph.targets().map(|(a, _)| a.as_str()).collect();
        assert_eq!(order, vec!["a:main", "a:test"]);

        let main = graph.target(&TargetAddress::new("a:main")).unwrap();
        assert_eq!(
            main.roots,
            vec![SourceRoot::new("/w/a/src").with_prefix("com.a")]
        );
        assert_eq!(
            graph.library("junit:junit:4.12"),
            &[PathBuf::from("/cache/junit-4.12.jar")]
        );
        assert!(graph.library("missing:lib").is_empty());
    }

    #[test]
    fn test_payload_order_is_preserved() {
        let graph = TargetGraph::parse(
            r#"{"targets": {"z:z": {}, "a:a": {}, "m:m": {}}}"#,
        )
        .unwrap();
        let order: Vec<_> = graph.targets().map(|(a, _)| a.to_string()).collect();
        assert_eq!(order, vec!["z:z", "a:a", "m:m"]);
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let err = TargetGraph::parse("").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedPayload { .. }));

        let err = TargetGraph::parse("  \n").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedPayload { .. }));
    }

    #[test]
    fn test_schema_violation_is_malformed() {
        for payload in [
            "not json",
            "[]",
            r#"{"libraries": {}}"#,
            r#"{"targets": {"a:b": {"roots": "a/src"}}}"#,
        ] {
            let err = TargetGraph::parse(payload).unwrap_err();
            assert!(
                matches!(err, ResolveError::MalformedPayload { .. }),
                "{payload} should be malformed"
            );
        }
    }

    #[test]
    fn test_offset_of() {
        let text = "{\n  \"a\": x\n}";
        assert_eq!(offset_of(text, 2, 8), Some(9));
        assert_eq!(offset_of(text, 0, 0), None);
    }
}
