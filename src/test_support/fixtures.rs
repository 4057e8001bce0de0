//! Payload fixtures.
//!
//! Builders for the build tool's JSON output, so tests can describe a
//! target graph without writing JSON by hand.

use serde_json::{json, Map, Value};

/// One target of a payload.
#[derive(Debug, Clone, Default)]
pub struct TargetSpec {
    target_type: Option<String>,
    roots: Vec<Value>,
    targets: Vec<String>,
    libraries: Vec<String>,
}

impl TargetSpec {
    /// A target with no type tag and nothing in it.
    pub fn new() -> Self {
        TargetSpec::default()
    }

    pub fn target_type(mut self, target_type: &str) -> Self {
        self.target_type = Some(target_type.to_string());
        self
    }

    /// Add a source root without a package prefix.
    pub fn root(mut self, path: &str) -> Self {
        self.roots.push(json!({ "source_root": path, "package_prefix": null }));
        self
    }

    /// Add a source root with a package prefix.
    pub fn prefixed_root(mut self, path: &str, prefix: &str) -> Self {
        self.roots.push(json!({ "source_root": path, "package_prefix": prefix }));
        self
    }

    pub fn depends_on(mut self, address: &str) -> Self {
        self.targets.push(address.to_string());
        self
    }

    pub fn library(mut self, library_id: &str) -> Self {
        self.libraries.push(library_id.to_string());
        self
    }

    fn to_json(&self) -> Value {
        json!({
            "target_type": self.target_type,
            "roots": self.roots,
            "targets": self.targets,
            "libraries": self.libraries,
        })
    }
}

/// A whole payload, targets and libraries in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    targets: Map<String, Value>,
    libraries: Map<String, Value>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        PayloadBuilder::default()
    }

    pub fn target(mut self, address: &str, target: TargetSpec) -> Self {
        self.targets.insert(address.to_string(), target.to_json());
        self
    }

    /// Add a library with its artifact paths.
    pub fn library(mut self, library_id: &str, artifacts: &[&str]) -> Self {
        self.libraries.insert(library_id.to_string(), json!(artifacts));
        self
    }

    /// The payload as JSON text.
    pub fn build(&self) -> String {
        json!({
            "targets": self.targets,
            "libraries": self.libraries,
        })
        .to_string()
    }
}

/// Two modules, the test module depending on the main one.
pub fn main_and_test_payload() -> String {
    PayloadBuilder::new()
        .target("a:main", TargetSpec::new().target_type("source").root("a/src/main"))
        .target(
            "a:test",
            TargetSpec::new()
                .target_type("test")
                .root("a/src/test")
                .depends_on("a:main")
                .library("junit:junit:4.12"),
        )
        .library("junit:junit:4.12", &["/jars/junit-4.12.jar"])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keeps_order() {
        let payload = PayloadBuilder::new()
            .target("z:last", TargetSpec::new())
            .target("a:first", TargetSpec::new())
            .build();

        let z = payload.find("z:last").unwrap();
        let a = payload.find("a:first").unwrap();
        assert!(z < a);
    }
}
