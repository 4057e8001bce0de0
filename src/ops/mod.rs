//! High-level operations.
//!
//! This module contains the implementation of depmap commands.

pub mod export;
pub mod resolve;

pub use export::{format_text, report, to_json, ResolutionReport};
pub use resolve::{project_resolver, resolve_payload, PayloadSource, ResolveOptions};
