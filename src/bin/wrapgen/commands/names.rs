//! `wrapgen names` command

use std::rc::Rc;

use anyhow::Result;

use crate::cli::NamesArgs;
use wrapgen::{Name, NameKind};

pub fn execute(args: NamesArgs) -> Result<i32> {
    let namespace = args
        .namespace
        .as_deref()
        .map(|ns| Rc::new(Name::namespace(ns.split('_'))));

    let name = if args.camel || args.lower {
        Name::from_camel_case(
            NameKind::Class,
            &args.identifier,
            args.lower,
            namespace.as_ref(),
        )?
    } else {
        Name::from_snake_case(NameKind::Method, &args.identifier, namespace.as_ref())?
    };

    println!("words:         {}", name.words().join(" "));
    println!("snake_case:    {}", name.to_snake_case(false));
    println!("  full:        {}", name.to_snake_case(true));
    println!("CamelCase:     {}", name.to_camel_case(false, false));
    println!("  full:        {}", name.to_camel_case(false, true));
    println!("lowerCamel:    {}", name.to_camel_case(true, false));
    println!("  full:        {}", name.to_camel_case(true, true));
    println!("FLAT:          {}", name.concatenate(true, true));

    Ok(0)
}
