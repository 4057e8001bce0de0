//! Target addresses - `path:name` identifiers from the build tool.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address prefix of the runtime library placeholder target.
///
/// The build tool reports the language standard library as a target, but
/// it reaches the project through library dependencies instead.
pub const RUNTIME_LIBRARY_PLACEHOLDER: &str = ":scala-library";

/// A unique target address such as `src/java/com/example:lib`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetAddress(String);

impl TargetAddress {
    /// Create an address from its string form.
    pub fn new(address: impl Into<String>) -> Self {
        TargetAddress(address.into())
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The directory part of the address (everything before the last `:`).
    ///
    /// An address without a `:` is all path.
    pub fn spec_path(&self) -> &str {
        self.0.rsplit_once(':').map(|(path, _)| path).unwrap_or(&self.0)
    }

    /// The name part of the address (everything after the last `:`).
    pub fn name(&self) -> &str {
        self.0.rsplit_once(':').map(|(_, name)| name).unwrap_or("")
    }

    /// Whether this is the runtime library placeholder target.
    pub fn is_runtime_placeholder(&self) -> bool {
        self.0.starts_with(RUNTIME_LIBRARY_PLACEHOLDER)
    }

    /// The module name derived from this address.
    pub fn module_name(&self) -> String {
        canonical_module_name(&self.0)
    }
}

impl fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetAddress {
    fn from(s: &str) -> Self {
        TargetAddress::new(s)
    }
}

impl From<String> for TargetAddress {
    fn from(s: String) -> Self {
        TargetAddress(s)
    }
}

/// Turn an address or path into a module name.
///
/// `:` separates classpath entries and path separators are not allowed in
/// module names, so all of them become `_`.
pub fn canonical_module_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_path_and_name() {
        let addr = TargetAddress::new("src/java/com/example:lib");
        assert_eq!(addr.spec_path(), "src/java/com/example");
        assert_eq!(addr.name(), "lib");

        let root = TargetAddress::new(":scala-library");
        assert_eq!(root.spec_path(), "");
        assert_eq!(root.name(), "scala-library");

        let bare = TargetAddress::new("3rdparty/jvm");
        assert_eq!(bare.spec_path(), "3rdparty/jvm");
        assert_eq!(bare.name(), "");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(TargetAddress::new("a/b:main").module_name(), "a_b_main");
        assert_eq!(canonical_module_name("a\\b/c"), "a_b_c");
    }

    #[test]
    fn test_runtime_placeholder() {
        assert!(TargetAddress::new(":scala-library").is_runtime_placeholder());
        assert!(TargetAddress::new(":scala-library-2.10").is_runtime_placeholder());
        assert!(!TargetAddress::new("a:scala-library").is_runtime_placeholder());
    }
}
