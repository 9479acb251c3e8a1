//! `wrapgen outline` command

use anyhow::Result;

use crate::cli::{GlobalOptions, OutlineArgs};
use wrapgen::Outline;

pub fn execute(args: OutlineArgs, global: &GlobalOptions) -> Result<i32> {
    let translation = super::translate(&args.project, global)?;

    if !args.quiet {
        super::report_skipped(&translation, &args.project, global);
    }

    let mut outline = Outline {
        full_type_names: args.full_names,
    };
    print!("{}", outline.render(&translation.api)?);

    Ok(0)
}
