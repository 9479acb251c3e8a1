//! `wrapgen check` command

use anyhow::Result;

use crate::cli::{CheckArgs, GlobalOptions};

pub fn execute(args: CheckArgs, global: &GlobalOptions) -> Result<i32> {
    let translation = super::translate(&args.project, global)?;
    let api = &translation.api;

    super::report_skipped(&translation, &args.project, global);

    let classes = api.classes();
    let methods: usize = classes.iter().map(|c| api.all_methods(*c).len()).sum();
    println!("{:>10} enums", api.enums().len());
    println!("{:>10} classes", classes.len());
    println!("{:>10} methods", methods);
    println!("{:>10} skipped", translation.report.len());

    let unresolved = api.unresolved_types();
    for (method, ty) in &unresolved {
        eprintln!(
            "error: `{}` still refers to unresolved type `{}`",
            api.node(*method).name,
            ty
        );
    }

    if !unresolved.is_empty() {
        return Ok(1);
    }
    if args.strict && !translation.report.is_empty() {
        eprintln!(
            "error: {} declaration(s) skipped (--strict)",
            translation.report.len()
        );
        return Ok(1);
    }

    println!("model is complete");
    Ok(0)
}
