//! `depmap tree` command

use std::collections::HashSet;

use anyhow::Result;

use crate::cli::TreeArgs;
use depmap::ops::export::exported_marker;
use depmap::resolver::{ModuleGraph, ModuleId};
use depmap::GlobalContext;

pub fn execute(args: TreeArgs, ctx: &GlobalContext) -> Result<()> {
    let resolution = super::resolve(&args.payload, ctx)?;
    let modules = resolution.modules();

    let roots = match &args.module {
        Some(name) => vec![super::find_module(modules, name)?],
        None => top_level(modules),
    };

    // Print tree
    let mut seen = HashSet::new();
    for root in roots {
        print_tree(modules, root, None, 0, args.depth.unwrap_or(usize::MAX), &mut seen);
    }

    Ok(())
}

/// Modules nothing depends on; every module if the graph has no such entry
/// point.
fn top_level(modules: &ModuleGraph) -> Vec<ModuleId> {
    let roots: Vec<ModuleId> = modules
        .modules()
        .map(|(id, _)| id)
        .filter(|id| modules.dependents(*id).is_empty())
        .collect();

    if roots.is_empty() {
        modules.modules().map(|(id, _)| id).collect()
    } else {
        roots
    }
}

fn print_tree(
    modules: &ModuleGraph,
    id: ModuleId,
    exported: Option<bool>,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<ModuleId>,
) {
    if depth > max_depth {
        return;
    }

    let is_duplicate = !seen.insert(id);

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };
    let dup_marker = if is_duplicate { " (*)" } else { "" };

    println!(
        "{}{}{}{}",
        prefix,
        modules.module(id).name(),
        exported.map(exported_marker).unwrap_or(""),
        dup_marker
    );

    // Don't recurse into modules already shown
    if is_duplicate {
        return;
    }

    for dep in modules.dependencies(id) {
        print_tree(modules, dep.module, Some(dep.exported), depth + 1, max_depth, seen);
    }
}
