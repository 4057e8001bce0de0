//! depmap CLI - resolve a build tool's target graph into an IDE module graph

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use depmap::util::diagnostic::emit;
use depmap::{GlobalContext, ResolveError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for the module graph
    let filter = if cli.verbose {
        EnvFilter::new("depmap=debug")
    } else {
        EnvFilter::new("depmap=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let verbose = cli.verbose;
    let color = !cli.no_color;
    if let Err(e) = run(cli) {
        report_error(e, verbose, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &ctx),
        Commands::Tree(args) => commands::tree::execute(args, &ctx),
        Commands::Explain(args) => commands::explain::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report_error(e: anyhow::Error, verbose: bool, color: bool) {
    match e.downcast::<ResolveError>() {
        Ok(err) => {
            emit(&err.to_diagnostic(), color);
            if verbose {
                eprintln!("{:?}", miette::Report::new(err));
            }
        }
        Err(e) => eprintln!("error: {:#}", e),
    }
}
