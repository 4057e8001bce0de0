//! `depmap resolve` command

use anyhow::Result;

use crate::cli::{OutputFormat, ResolveArgs};
use depmap::ops::{format_text, to_json};
use depmap::GlobalContext;

pub fn execute(args: ResolveArgs, ctx: &GlobalContext) -> Result<()> {
    let resolution = super::resolve(&args.payload, ctx)?;

    match args.format {
        OutputFormat::Json => println!("{}", to_json(&resolution)?),
        OutputFormat::Text => print!("{}", format_text(&resolution)),
    }

    Ok(())
}
