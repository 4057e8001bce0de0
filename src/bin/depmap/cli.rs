//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// depmap - resolve a build tool's target graph into an IDE module graph
#[derive(Parser)]
#[command(name = "depmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a payload and print the module graph
    Resolve(ResolveArgs),

    /// Display the module dependency tree
    Tree(TreeArgs),

    /// Explain where a module sits in the graph
    Explain(ExplainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the payload comes from and how to resolve it.
#[derive(Args)]
pub struct PayloadArgs {
    /// Build tool output to resolve (`-` reads stdin)
    pub payload: String,

    /// Build root the payload was produced in (defaults to the current directory)
    #[arg(long, env = "DEPMAP_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Import the structure without requiring library artifacts
    #[arg(long)]
    pub preview: bool,

    /// Enable a resolver extension (repeatable)
    #[arg(long = "extension", value_name = "NAME")]
    pub extensions: Vec<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Module to show the tree for (defaults to every module nothing depends on)
    pub module: Option<String>,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,
}

#[derive(Args)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Module to explain
    pub module: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
