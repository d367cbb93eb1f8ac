//! Check command implementation.
//!
//! Runs the package checks and prints their diagnostics without rendering.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{Config, SkinDirectory};
use crate::error::{Result, SkinError};
use crate::output::{display_path, plural, Printer};
use crate::types::PartKind;
use crate::validation::{print_diagnostics, validate_skin, CheckOptions, ValidationResult};

/// Check a skin package without rendering
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Skin package directory (defaults to the current directory)
    pub input: Option<PathBuf>,

    /// Decal placement to check
    #[arg(long, allow_hyphen_values = true)]
    pub decalspec: Option<String>,

    /// Keep near-white colours instead of making them transparent
    #[arg(long)]
    pub keep_white: bool,

    /// Skip the head part
    #[arg(long)]
    pub exclude_head: bool,

    /// Skip the body part
    #[arg(long)]
    pub exclude_body: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Config file (defaults to ./skingen.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let result = check(&args, printer)?;
    print_diagnostics(&result, printer);

    let errors = result.error_count();
    let warnings = result.warning_count();
    if errors > 0 || (args.strict && warnings > 0) {
        return Err(SkinError::Build {
            message: format!(
                "check failed with {} and {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
            help: None,
        });
    }
    Ok(())
}

/// Check the package named by `args`, honouring the config file.
pub fn check(args: &CheckArgs, printer: &Printer) -> Result<ValidationResult> {
    let cwd = std::env::current_dir()?;
    let config = Config::discover(args.config.as_deref(), &cwd)?
        .map(|(_, config)| config)
        .unwrap_or_default();

    let input = args.input.clone().unwrap_or(cwd);
    let skin = SkinDirectory::open(&input)?;
    printer.status("Checking", &display_path(&skin.root));

    let exclude_head = args.exclude_head || config.exclude_head;
    let exclude_body = args.exclude_body || config.exclude_body;
    let mut options = CheckOptions {
        decalspec: args.decalspec.clone().or(config.decalspec),
        keep_white: args.keep_white || config.keep_white,
        ..CheckOptions::all()
    };
    options.parts.retain(|kind| match kind {
        PartKind::Head => !exclude_head,
        PartKind::Body => !exclude_body,
    });

    Ok(validate_skin(&skin, &options))
}
