//! ldoc CLI
//!
//! Renders and searches labelled JSON documents.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_init, run_keywords, run_locate, run_query, run_render};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(not_found) => {
            if not_found {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(true)` when a search command found nothing.
fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Render {
            file,
            format,
            ldjson,
        } => run_render(&cli, file, format.as_deref(), *ldjson).map(|()| false),
        Commands::Query { file, path } => run_query(&cli, file, path),
        Commands::Locate { file, offset } => run_locate(&cli, file, *offset),
        Commands::Keywords {
            file,
            words,
            offset,
            kind,
        } => run_keywords(&cli, file, words, *offset, kind),
        Commands::Init { force } => run_init(*force).map(|()| false),
    }
}
