//! Props command implementation.
//!
//! Prints the unified parameters of a props file, as a listing or as JSON
//! on stdout. Given a directory, every props file below it is printed.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{load_props, scan_props_files};
use crate::error::{Result, SkinError};
use crate::output::{display_path, Printer};
use crate::props::{ParameterList, UnifiedProps, SCALAR_PARAMETERS, TEXTURE_PARAMETERS, VECTOR_PARAMETERS};

/// Print the unified parameters of a props file
#[derive(Args, Debug)]
pub struct PropsArgs {
    /// Props file, or a directory to search for props files
    pub file: PathBuf,

    /// Print JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PropsArgs, printer: &Printer) -> Result<()> {
    let files = if args.file.is_dir() {
        scan_props_files(&args.file)
    } else {
        vec![args.file.clone()]
    };
    if files.is_empty() {
        printer.warning("Empty", &format!("no props files in {}", display_path(&args.file)));
        return Ok(());
    }

    let mut unified_props = Vec::with_capacity(files.len());
    for file in &files {
        let unified = load_props(file)?;
        printer.debug("Read", &display_path(file));
        for warning in &unified.warnings {
            printer.warning("Skipped", &format!("{}: {}", display_path(file), warning));
        }
        unified_props.push((display_path(file), unified.props));
    }

    let text = if args.json {
        to_json(&unified_props, args.file.is_dir())?
    } else if let [(_, props)] = unified_props.as_slice() {
        listing(props)
    } else {
        unified_props
            .iter()
            .map(|(path, props)| format!("== {}\n{}", path, listing(props)))
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    println!("{}", text);

    Ok(())
}

/// A single props object, or an object keyed by path for a directory.
fn to_json(unified_props: &[(String, UnifiedProps)], keyed: bool) -> Result<String> {
    let result = if keyed {
        let map: indexmap::IndexMap<&str, &UnifiedProps> = unified_props
            .iter()
            .map(|(path, props)| (path.as_str(), props))
            .collect();
        serde_json::to_string_pretty(&map)
    } else {
        serde_json::to_string_pretty(&unified_props[0].1)
    };
    result.map_err(|e| SkinError::Build {
        message: format!("Failed to serialize props: {}", e),
        help: None,
    })
}

/// One line per parameter, grouped by list.
pub fn listing(props: &UnifiedProps) -> String {
    let mut out = String::new();
    for (title, list) in [
        (TEXTURE_PARAMETERS, &props.texture),
        (SCALAR_PARAMETERS, &props.scalar),
        (VECTOR_PARAMETERS, &props.vector),
    ] {
        write_list(&mut out, title, list);
    }
    if !props.root.is_empty() {
        let _ = writeln!(out, "Other fields ({})", props.root.len());
        for name in props.root.keys() {
            let _ = writeln!(out, "  {}", name);
        }
    }
    out.trim_end().to_string()
}

fn write_list(out: &mut String, title: &str, list: &ParameterList) {
    let _ = writeln!(out, "{} ({})", title, list.len());
    for node in list.iter() {
        match node.value.as_scalar() {
            Some(value) => {
                let _ = writeln!(out, "  {} = {}", node.name, value);
            }
            None => {
                let _ = writeln!(out, "  {} = <{}>", node.name, node.value.kind_name());
            }
        }
    }
}
