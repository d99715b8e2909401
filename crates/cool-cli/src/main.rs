// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Cool semantic checker command-line interface.
//!
//! This is the main entry point for the `cool` command.

use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;

/// Cool: semantic analysis for the Classroom Object-Oriented Language
#[derive(Debug, Parser)]
#[command(name = "cool")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type-check a parsed program and report semantic errors
    Check {
        /// Program file (frontend JSON) to check, or `-` for stdin
        path: String,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let default_directive = directive_for_verbosity(cli.verbose);

    // Logs go to stderr alongside the diagnostics, never to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Check { path } => commands::check::check(&path),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Target must match the crate's Rust module path (`cool`, from the bin
    // target name). `cool_core` carries the analysis-side events.
    match v {
        0 => "cool=warn,cool_core=warn",
        1 => "cool=debug,cool_core=debug",
        _ => "cool=trace,cool_core=trace",
    }
}
