//! `depmap explain` command

use anyhow::Result;

use crate::cli::ExplainArgs;
use depmap::core::ModuleOrigin;
use depmap::ops::export::exported_marker;
use depmap::GlobalContext;

pub fn execute(args: ExplainArgs, ctx: &GlobalContext) -> Result<()> {
    let resolution = super::resolve(&args.payload, ctx)?;
    let modules = resolution.modules();

    let id = super::find_module(modules, &args.module)?;
    let module = modules.module(id);

    // Print module info
    match module.origin() {
        ModuleOrigin::Target { address } => println!("{} (target {})", module.name(), address),
        ModuleOrigin::Merged { root } => println!("{} (merged for {})", module.name(), root),
    }
    println!("  content root: {}", module.content_root().path().display());
    println!("  config: {}", module.config_path().display());

    let dependents = modules.dependents(id);
    if !dependents.is_empty() {
        println!();
        println!("Required by:");
        for dependent in dependents {
            let exported = modules
                .dependencies(dependent)
                .iter()
                .any(|dep| dep.module == id && dep.exported);
            println!(
                "  ← {}{}",
                modules.module(dependent).name(),
                exported_marker(exported)
            );
        }
    }

    let deps = modules.dependencies(id);
    if !deps.is_empty() {
        println!();
        println!("Direct dependencies:");
        for dep in deps {
            println!(
                "  → {}{}",
                modules.module(dep.module).name(),
                exported_marker(dep.exported)
            );
        }
    }

    if !module.libraries().is_empty() {
        println!();
        println!("Libraries:");
        for library in module.libraries() {
            println!("  {}{}", library.library, exported_marker(library.exported));
            for artifact in &library.artifacts {
                println!("    {}", artifact.display());
            }
        }
    }

    Ok(())
}
