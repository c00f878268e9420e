//! copyqn CLI - Copy Qualified Name
//!
//! Resolves the fully qualified name of the element under a caret in a Java
//! source file and places it on the system clipboard.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use copyqn::action::{copy_qualified_name, list_declarations, resolve_path, Outcome};
use copyqn::clipboard::open_clipboard;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use copyqn_core::caret::Caret;
use copyqn_core::config::Config;
use copyqn_core::resolver::ResolutionOrigin;
use copyqn_languages::detect_language;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "copyqn")]
#[command(about = "Copy the qualified name of the Java element under the caret")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the qualified name and copy it to the clipboard
    Copy {
        /// Source file
        file: PathBuf,

        #[command(flatten)]
        caret: CaretArgs,
    },
    /// Resolve the qualified name and print it
    Resolve {
        /// Source file
        file: PathBuf,

        #[command(flatten)]
        caret: CaretArgs,

        /// Print a JSON object instead of the bare name
        #[arg(long)]
        json: bool,
    },
    /// List the top-level type declarations of a file
    Declarations {
        /// Source file
        file: PathBuf,

        /// Print JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },
}

/// Caret position; omitted means the file's primary type
#[derive(Args)]
struct CaretArgs {
    /// 1-based caret line
    #[arg(long, requires = "column", conflicts_with = "offset")]
    line: Option<usize>,

    /// 1-based caret column, in characters
    #[arg(long, requires = "line")]
    column: Option<usize>,

    /// 0-based caret offset, in characters
    #[arg(long)]
    offset: Option<usize>,
}

impl CaretArgs {
    fn caret(&self) -> Option<Caret> {
        match (self.line, self.column, self.offset) {
            (Some(line), Some(column), _) => Some(Caret::LineColumn { line, column }),
            (_, _, Some(offset)) => Some(Caret::Offset(offset)),
            _ => None,
        }
    }
}

/// JSON form of `resolve --json`
#[derive(Serialize)]
struct ResolveReport<'a> {
    file: &'a Path,
    supported: bool,
    qualified_name: Option<&'a str>,
    #[serde(flatten)]
    origin: Option<ResolutionOrigin>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let result = run(cli);
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Copy { file, caret } => copy(&file, caret.caret(), cli.config.as_deref()),
        Commands::Resolve { file, caret, json } => resolve(&file, caret.caret(), json),
        Commands::Declarations { file, json } => declarations(&file, json),
    }
}

/// Initialize logging system
///
/// Logs go to stderr so stdout stays clean for piping.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "{}={level},copyqn_core={level},copyqn_languages={level}",
            env!("CARGO_PKG_NAME")
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Resolve, copy and echo the status line
fn copy(file: &Path, caret: Option<Caret>, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate()?;
    debug!(provider = %config.clipboard.provider, "Loaded configuration");

    if detect_language(file).is_none() {
        println!("{}", Outcome::Unsupported.status(file));
        return Ok(());
    }

    let mut clipboard = open_clipboard(&config.clipboard)?;
    let outcome = copy_qualified_name(file, caret, clipboard.as_mut(), &config.clipboard)?;

    // The stdout provider already printed the name
    let echoes_contents = config.clipboard.provider == "stdout";
    let show = match &outcome {
        Outcome::Unsupported => true,
        Outcome::Resolved(_) => config.output.echo_status && !echoes_contents,
        Outcome::Unresolved => false,
    };
    if show {
        println!("{}", outcome.status(file));
    }
    Ok(())
}

/// Print the resolved name without touching the clipboard
fn resolve(file: &Path, caret: Option<Caret>, json: bool) -> Result<()> {
    let outcome = resolve_path(file, caret)?;

    if json {
        let report = ResolveReport {
            file,
            supported: outcome != Outcome::Unsupported,
            qualified_name: outcome.qualified_name(),
            origin: match &outcome {
                Outcome::Resolved(resolution) => Some(resolution.origin),
                Outcome::Unsupported | Outcome::Unresolved => None,
            },
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    match &outcome {
        Outcome::Unsupported => println!("{}", outcome.status(file)),
        Outcome::Unresolved => {}
        Outcome::Resolved(resolution) => println!("{}", resolution.qualified_name),
    }
    Ok(())
}

fn declarations(file: &Path, json: bool) -> Result<()> {
    let Some(declarations) = list_declarations(file)? else {
        println!("{}", Outcome::Unsupported.status(file));
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&declarations)?);
        return Ok(());
    }

    for declaration in &declarations {
        let visibility = if declaration.is_public { "public" } else { "" };
        println!("{}\t{visibility}", declaration.qualified_name);
    }
    Ok(())
}
