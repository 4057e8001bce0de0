//! Source-root classification.
//!
//! The build tool tags every target with a type string. The IDE only knows
//! four kinds of source roots, so the tag is folded into one of them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of source root a target contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Production code (also the fallback for unknown tags)
    #[default]
    Source,
    /// Test code
    Test,
    /// Production resources
    Resource,
    /// Test resources
    TestResource,
}

impl SourceKind {
    /// Classify a target type tag.
    ///
    /// Matching is case-insensitive. A missing tag or one the IDE has no
    /// counterpart for falls back to [`SourceKind::Source`].
    pub fn for_target_type(target_type: Option<&str>) -> SourceKind {
        let Some(tag) = target_type else {
            return SourceKind::default();
        };

        match tag.parse() {
            Ok(kind) => kind,
            Err(UnknownSourceKind(tag)) => {
                tracing::warn!("unknown target type `{}`, treating as source", tag);
                SourceKind::default()
            }
        }
    }

    /// Whether this kind holds resources rather than code.
    pub fn is_resource(&self) -> bool {
        matches!(self, SourceKind::Resource | SourceKind::TestResource)
    }

    /// Whether this kind belongs to the test scope.
    pub fn is_test(&self) -> bool {
        matches!(self, SourceKind::Test | SourceKind::TestResource)
    }

    /// Get the kind as it appears in target type tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Source => "source",
            SourceKind::Test => "test",
            SourceKind::Resource => "resource",
            SourceKind::TestResource => "test_resource",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a target type tag with no matching kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source kind `{0}`")]
pub struct UnknownSourceKind(pub String);

impl std::str::FromStr for SourceKind {
    type Err = UnknownSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" => Ok(SourceKind::Source),
            "test" => Ok(SourceKind::Test),
            "resource" => Ok(SourceKind::Resource),
            "test_resource" => Ok(SourceKind::TestResource),
            _ => Err(UnknownSourceKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_tags() {
        assert_eq!(SourceKind::for_target_type(Some("SOURCE")), SourceKind::Source);
        assert_eq!(SourceKind::for_target_type(Some("test")), SourceKind::Test);
        assert_eq!(SourceKind::for_target_type(Some("Resource")), SourceKind::Resource);
        assert_eq!(
            SourceKind::for_target_type(Some("TEST_RESOURCE")),
            SourceKind::TestResource
        );
    }

    #[test]
    fn test_classify_falls_back_to_source() {
        assert_eq!(SourceKind::for_target_type(None), SourceKind::Source);
        assert_eq!(SourceKind::for_target_type(Some("jar_library")), SourceKind::Source);
        assert_eq!(SourceKind::for_target_type(Some("")), SourceKind::Source);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(SourceKind::TestResource.is_resource());
        assert!(SourceKind::TestResource.is_test());
        assert!(!SourceKind::Source.is_test());
        assert!(!SourceKind::Test.is_resource());
    }
}
