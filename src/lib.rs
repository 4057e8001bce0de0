//! depmap - resolve a build tool's target graph into an IDE module graph
//!
//! This crate provides the core library functionality for depmap:
//! parsing the build tool's dependency report, planning ownership of shared
//! source roots, and building the module graph.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for depmap unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides payload builders and an in-memory build file
/// lookup.
#[cfg(test)]
pub mod test_support;

pub use core::{Module, SourceKind, SourceRoot, Target, TargetAddress, TargetGraph};

pub use resolver::{ProjectResolver, Resolution, ResolutionContext, ResolveError, ResolveWarning};
pub use util::context::GlobalContext;
