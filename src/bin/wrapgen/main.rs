//! wrapgen CLI - translate C library metadata into a language-neutral API model

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

use wrapgen::util::diagnostic::{self, Diagnostic, ProjectSyntaxError};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            diagnostic::emit(&Diagnostic::error(format!("{:#}", e)), false);
            if let Some(syntax) = e.downcast_ref::<ProjectSyntaxError>() {
                eprint!("{}", syntax.render(false));
            }
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("wrapgen=debug")
    } else {
        EnvFilter::new("wrapgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = cli::GlobalOptions {
        config: cli.config,
        no_color: cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Outline(args) => commands::outline::execute(args, &global),
        Commands::Check(args) => commands::check::execute(args, &global),
        Commands::Names(args) => commands::names::execute(args),
    }
}
