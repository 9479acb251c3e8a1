//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// wrapgen - Translate C library metadata into a language-neutral API model
#[derive(Parser)]
#[command(name = "wrapgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file to use instead of the global and project ones
    #[arg(long, global = true, env = "WRAPGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the translated API as an outline
    Outline(OutlineArgs),

    /// Translate and summarize, failing when the model is incomplete
    Check(CheckArgs),

    /// Show every rendering of an identifier
    Names(NamesArgs),
}

#[derive(Args)]
pub struct OutlineArgs {
    /// C project description (JSON)
    pub project: PathBuf,

    /// Render enum and class references with their full name
    #[arg(long)]
    pub full_names: bool,

    /// Do not report skipped declarations
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// C project description (JSON)
    pub project: PathBuf,

    /// Also fail when any declaration was skipped
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct NamesArgs {
    /// Identifier, in snake_case unless --camel is given
    pub identifier: String,

    /// Parse the identifier as CamelCase
    #[arg(long)]
    pub camel: bool,

    /// Parse the identifier as lowerCamelCase (implies --camel)
    #[arg(long)]
    pub lower: bool,

    /// Namespace to strip, in snake_case
    #[arg(long)]
    pub namespace: Option<String>,
}
