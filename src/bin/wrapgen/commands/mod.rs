//! Command implementations

pub mod check;
pub mod names;
pub mod outline;

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::GlobalOptions;
use wrapgen::cparser::{CParser, CProject, Translation};
use wrapgen::util::config::{self, Config};
use wrapgen::util::diagnostic;

/// Load the configuration named on the command line, or the merged global
/// and project configuration.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(path);
    }

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let project = config::project_config_path(&cwd);
    Ok(match config::global_config_path() {
        Some(global_path) => config::load_config(&global_path, &project),
        None => Config::load_or_default(&project),
    })
}

/// Read and translate a C project.
pub fn translate(path: &Path, global: &GlobalOptions) -> Result<Translation> {
    let config = load_config(global)?;
    let project = CProject::load(path)?;
    Ok(CParser::new(&project, config.parser).parse_all())
}

/// Print every skipped declaration to stderr.
pub fn report_skipped(translation: &Translation, path: &Path, global: &GlobalOptions) {
    for diag in translation.report.to_diagnostics() {
        diagnostic::emit(&diag.with_location(path), !global.no_color);
    }
}
