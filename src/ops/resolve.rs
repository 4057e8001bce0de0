//! Payload resolution operations.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::resolver::{FsBuildFiles, ProjectResolver, Resolution, ResolutionContext};
use crate::util::config::Config;
use crate::util::fs::read_to_string;
use crate::util::GlobalContext;

/// Where the build tool's output is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Stdin,
    File(PathBuf),
}

impl PayloadSource {
    /// Interpret a command-line argument; `-` means stdin.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            PayloadSource::Stdin
        } else {
            PayloadSource::File(PathBuf::from(arg))
        }
    }

    /// Read the whole payload.
    pub fn read(&self) -> Result<String> {
        match self {
            PayloadSource::Stdin => {
                let mut payload = String::new();
                std::io::stdin()
                    .read_to_string(&mut payload)
                    .context("failed to read payload from stdin")?;
                Ok(payload)
            }
            PayloadSource::File(path) => read_to_string(path),
        }
    }
}

impl fmt::Display for PayloadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadSource::Stdin => f.write_str("<stdin>"),
            PayloadSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options for resolving a payload.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Build root the payload was produced in (defaults to the current
    /// directory)
    pub work_dir: Option<PathBuf>,

    /// Tolerate missing library artifacts
    pub preview: bool,

    /// Extensions to enable on top of the configured ones
    pub extensions: Vec<String>,
}

/// Read a payload and resolve it into a module graph.
pub fn resolve_payload(
    ctx: &GlobalContext,
    source: &PayloadSource,
    opts: &ResolveOptions,
) -> Result<Resolution> {
    let payload = source.read()?;
    let work_dir = work_dir(ctx, opts);
    let config = ctx.load_config(&work_dir);

    tracing::debug!("resolving {} in {}", source, work_dir.display());
    let resolver = project_resolver(&config, work_dir, opts);
    let resolution = resolver.resolve(&payload)?;

    tracing::info!(
        "Resolved {} modules from {}",
        resolution.modules().len(),
        source
    );
    Ok(resolution)
}

/// Build a resolver from configuration and command-line options.
///
/// Command-line options win over the configuration: `preview` can only be
/// switched on, and extra extensions run after the configured ones.
pub fn project_resolver(config: &Config, work_dir: PathBuf, opts: &ResolveOptions) -> ProjectResolver {
    let preview = opts.preview || config.resolve.preview.unwrap_or(false);

    let mut extensions: Vec<String> = Vec::new();
    for name in config.resolve.extensions.iter().chain(&opts.extensions) {
        if !extensions.contains(name) {
            extensions.push(name.clone());
        }
    }

    let lookup = FsBuildFiles::new(&work_dir).with_names(config.resolve.build_file_names());
    let ctx = ResolutionContext::new(Some(work_dir))
        .with_preview(preview)
        .with_build_files(Box::new(lookup));

    ProjectResolver::new(ctx).with_extensions(extensions)
}

fn work_dir(ctx: &GlobalContext, opts: &ResolveOptions) -> PathBuf {
    match &opts.work_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => ctx.cwd().join(dir),
        None => ctx.cwd().to_path_buf(),
    }
}
