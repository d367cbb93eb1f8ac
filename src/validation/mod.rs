//! Checks for extracted skin packages.
//!
//! Runs every check against each part of a skin directory and reports
//! errors and warnings. Used by `skingen check`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::discovery::SkinDirectory;
use crate::output::{plural, Printer};
use crate::types::PartKind;

/// What the checks should assume about the coming generation run.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Parts to check.
    pub parts: Vec<PartKind>,
    /// Decal placement that will be used, if any.
    pub decalspec: Option<String>,
    /// Keep near-white colours opaque.
    pub keep_white: bool,
}

impl CheckOptions {
    /// Check every part with default colour handling.
    pub fn all() -> Self {
        Self {
            parts: PartKind::ALL.to_vec(),
            ..Self::default()
        }
    }
}

/// Run all checks against a skin directory.
pub fn validate_skin(skin: &SkinDirectory, options: &CheckOptions) -> ValidationResult {
    let decalspec = options.decalspec.as_deref();
    let mut result = checks::check_decalspec(decalspec);

    for &kind in &options.parts {
        let (loaded, mut part_result) = checks::check_props(skin, kind);
        if let Some(loaded) = loaded {
            part_result.merge(checks::check_textures(&loaded));
            part_result.merge(checks::check_mask(&loaded.part));
            part_result.merge(checks::check_colours(&loaded.part, options.keep_white));
            part_result.merge(checks::check_decal(&loaded.part, decalspec));
        }
        result.merge_part(kind, part_result);
    }

    result
}

/// Print diagnostics through the printer, followed by a summary line.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let is_error = d.severity == Severity::Error;
        let label = printer.severity(&d.severity.to_string(), is_error);
        let line = format!("{}[{}]: {}", label, d.code, d);
        if is_error {
            printer.error("", &line);
        } else {
            printer.warning("", &line);
        }
        if let Some(help) = &d.help {
            let help_line = printer.dim(&format!("  help: {}", help));
            if is_error {
                printer.error("", &help_line);
            } else {
                printer.warning("", &help_line);
            }
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning(
            "Checked",
            &format!("passed with {}", plural(warnings, "warning", "warnings")),
        );
    } else {
        printer.success("Checked", "no problems found");
    }
}
