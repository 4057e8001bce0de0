//! Command implementations

pub mod completions;
pub mod explain;
pub mod resolve;
pub mod tree;

use anyhow::Result;

use crate::cli::PayloadArgs;
use depmap::ops::{resolve_payload, PayloadSource, ResolveOptions};
use depmap::resolver::{ModuleGraph, ModuleId};
use depmap::util::diagnostic::emit;
use depmap::{GlobalContext, Resolution};

/// Resolve the payload named on the command line and report its warnings.
pub fn resolve(args: &PayloadArgs, ctx: &GlobalContext) -> Result<Resolution> {
    let opts = ResolveOptions {
        work_dir: args.work_dir.clone(),
        preview: args.preview,
        extensions: args.extensions.clone(),
    };
    let source = PayloadSource::from_arg(&args.payload);
    let resolution = resolve_payload(ctx, &source, &opts)?;

    let warnings = resolution.warnings();
    if ctx.is_verbose() {
        for warning in warnings {
            emit(&warning.to_diagnostic(), ctx.color());
        }
    } else if !warnings.is_empty() {
        eprintln!(
            "{} warning(s) during resolution; run with --verbose for details",
            warnings.len()
        );
    }

    Ok(resolution)
}

/// Look up a module by name, with a hint when it isn't there.
pub fn find_module(modules: &ModuleGraph, name: &str) -> Result<ModuleId> {
    modules.find(name).ok_or_else(|| {
        anyhow::anyhow!(
            "module `{}` not found in module graph\n\
             help: Run `depmap resolve --format text` to see all modules",
            name
        )
    })
}
