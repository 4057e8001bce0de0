//! Resolution errors and warnings.
//!
//! Only a payload that cannot be parsed stops a resolution. Everything else
//! is recorded as a [`ResolveWarning`] and the pass carries on.

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::core::{InvalidSourceRootPath, SourceRoot, TargetAddress};
use crate::util::diagnostic::Diagnostic;

/// Fatal resolution error.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("malformed build tool output: {reason}")]
    #[diagnostic(
        code(depmap::resolve::malformed_payload),
        help("Re-run the build tool's dependency export and check that it completed")
    )]
    MalformedPayload {
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },
}

impl ResolveError {
    pub(crate) fn malformed(
        reason: impl Into<String>,
        name: &str,
        payload: &str,
        offset: Option<usize>,
    ) -> Self {
        ResolveError::MalformedPayload {
            reason: reason.into(),
            src: NamedSource::new(name, payload.to_string()),
            span: offset.map(|offset| SourceSpan::from((offset, 0))),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::MalformedPayload { reason, .. } => {
                Diagnostic::error(format!("malformed build tool output: {}", reason))
                    .with_suggestion(
                        "Re-run the build tool's dependency export and check that it completed",
                    )
                    .with_suggestion("Run with --verbose to see the parser's position")
            }
        }
    }
}

/// A non-fatal condition met during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveWarning {
    #[error("can't register source root `{root}` in module `{module}`: {error}")]
    InvalidSourceRootPath {
        module: String,
        root: SourceRoot,
        #[source]
        error: InvalidSourceRootPath,
    },

    #[error("no artifacts for library `{library}` required by `{module}`")]
    MissingLibraryArtifacts { module: String, library: String },

    #[error("extension `{extension}` failed: {message}")]
    ExtensionFailure { extension: String, message: String },

    #[error("extension `{extension}` is not registered")]
    UnknownExtension { extension: String },

    #[error("common source root `{root}` can't be owned by `{target}`, which has no module")]
    OrphanedCommonRoot {
        root: SourceRoot,
        target: TargetAddress,
    },
}

impl ResolveWarning {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveWarning::InvalidSourceRootPath { .. } => "invalid-source-root-path",
            ResolveWarning::MissingLibraryArtifacts { .. } => "missing-library-artifacts",
            ResolveWarning::ExtensionFailure { .. } => "extension-failure",
            ResolveWarning::UnknownExtension { .. } => "unknown-extension",
            ResolveWarning::OrphanedCommonRoot { .. } => "orphaned-common-root",
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::warning(self.to_string());
        match self {
            ResolveWarning::InvalidSourceRootPath { .. } => diag
                .with_context("the root was skipped; the rest of the module is intact")
                .with_suggestion("Check the target's source root declarations"),
            ResolveWarning::MissingLibraryArtifacts { library, .. } => diag
                .with_context(format!("no artifacts are listed for `{}`", library))
                .with_suggestion("Resolve the build tool's libraries before exporting")
                .with_suggestion("Use --preview to import the structure without artifacts"),
            ResolveWarning::ExtensionFailure { .. } => {
                diag.with_context("changes made before the failure were kept")
            }
            ResolveWarning::UnknownExtension { .. } => diag
                .with_suggestion("Remove it from `resolve.extensions` in the configuration"),
            ResolveWarning::OrphanedCommonRoot { .. } => {
                diag.with_context("another owner or a merged module was chosen")
            }
        }
    }
}

/// A module dependency that was dropped because the reverse edge existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuppressedCycle {
    /// Module the dropped edge started from
    pub from: String,
    /// Module the dropped edge pointed to
    pub to: String,
}
