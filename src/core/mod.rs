//! Core data structures for depmap.
//!
//! This module contains both sides of the transform:
//! - The parsed target graph (addresses, targets, source roots, libraries)
//! - Source-root classification
//! - The resolved modules handed to the consumer

pub mod address;
pub mod module;
pub mod source_root;
pub mod source_type;
pub mod target;
pub mod target_graph;

pub use address::{canonical_module_name, TargetAddress, RUNTIME_LIBRARY_PLACEHOLDER};
pub use module::{
    ContentRoot, InvalidSourceRootPath, LibraryDependency, Module, ModuleOrigin, SourceRootEntry,
};
pub use source_root::SourceRoot;
pub use source_type::SourceKind;
pub use target::Target;
pub use target_graph::TargetGraph;
