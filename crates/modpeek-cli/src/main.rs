#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use modpeek_core::{Config, ResolverConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modpeek")]
#[command(author, version, about = "Preview and complete JavaScript import targets", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Resolver settings file (JSON)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Show the files the imports on a line point at
    Hover {
        /// Source file containing the import
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long)]
        line: usize,

        /// Print the popup HTML instead of plain paths
        #[arg(long)]
        html: bool,
    },

    /// List import path completions at a cursor position
    Complete {
        /// Source file being edited
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long)]
        line: usize,

        /// Cursor column (0-based, in characters)
        #[arg(long)]
        column: usize,

        /// Typed prefix (defaults to the word before the cursor)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Resolve one import specifier
    Resolve {
        /// The specifier to resolve (e.g., "./util", "lodash")
        specifier: String,

        /// File the import is written in
        #[arg(long, value_name = "FILE")]
        from: PathBuf,

        /// Show the step-by-step resolution trace
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let resolver = match &cli.config {
        Some(path) => {
            ResolverConfig::load(&commands::absolutize(&cwd, path)).into_diagnostic()?
        }
        None => ResolverConfig::default(),
    };

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_resolver(resolver);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Hover { file, line, html }) => {
            let span = tracing::info_span!("hover", cmd = "hover", file = %file.display());
            let _guard = span.enter();
            commands::hover::run(&config, &file, line, html, cli.json)
        }
        Some(Commands::Complete {
            file,
            line,
            column,
            prefix,
        }) => {
            let span = tracing::info_span!("complete", cmd = "complete", file = %file.display());
            let _guard = span.enter();
            let cursor = commands::complete::Cursor { line, column };
            commands::complete::run(&config, &file, cursor, prefix.as_deref(), cli.json)
        }
        Some(Commands::Resolve {
            specifier,
            from,
            trace,
        }) => {
            let span = tracing::info_span!("resolve", cmd = "resolve", file = %from.display());
            let _guard = span.enter();
            commands::resolve::run(&config, &specifier, &from, trace, cli.json)
        }
    }
}
