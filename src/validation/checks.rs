//! Checks for a skin package.
//!
//! Each check looks at one part and returns a `ValidationResult`. Anything
//! that would stop `generate` from writing the part is an error; anything
//! that only degrades the output is a warning.

use std::path::Path;

use crate::discovery::{LoadedPart, SkinDirectory, TextureIssue};
use crate::parser::validate_decalspec;
use crate::render::validate_mask;
use crate::types::{Bodypart, PartKind, DIFFUSE_PARAM, MASK_PARAM};

use super::warning::{Diagnostic, ValidationResult};

/// Load a part, reporting why it cannot be loaded.
pub fn check_props(skin: &SkinDirectory, kind: PartKind) -> (Option<LoadedPart>, ValidationResult) {
    let mut result = ValidationResult::new();

    match skin.load_part(kind) {
        Ok(loaded) => {
            for warning in &loaded.warnings {
                result.push(Diagnostic::warning(
                    "skingen::check::skipped-parameter",
                    format!("Skipped {}", warning),
                ));
            }
            (Some(loaded), result)
        }
        Err(e) => {
            result.push(
                Diagnostic::error("skingen::check::props", e.to_string())
                    .with_help(format!("Expected {}", skin.expected_props_path(kind).display())),
            );
            (None, result)
        }
    }
}

/// Report unresolved textures and undeclared required ones.
pub fn check_textures(loaded: &LoadedPart) -> ValidationResult {
    let mut result = ValidationResult::new();

    for issue in &loaded.texture_issues {
        let param = match issue {
            TextureIssue::Unresolvable { param, .. } | TextureIssue::Missing { param, .. } => param,
        };
        let diagnostic = if is_required(param) {
            Diagnostic::error("skingen::check::missing-texture", issue.to_string())
        } else {
            Diagnostic::warning("skingen::check::missing-texture", issue.to_string())
        };
        result.push(diagnostic);
    }

    let textures = &loaded.part.textures;
    for (param, path) in [(DIFFUSE_PARAM, &textures.diffuse), (MASK_PARAM, &textures.mask)] {
        let reported = loaded.texture_issues.iter().any(|issue| match issue {
            TextureIssue::Unresolvable { param: p, .. } | TextureIssue::Missing { param: p, .. } => {
                p == param
            }
        });
        if path.is_none() && !reported {
            result.push(
                Diagnostic::error(
                    "skingen::check::undeclared-texture",
                    format!("{} is not declared", param),
                )
                .with_help(format!(
                    "Add {} to TextureParameterValues in {}",
                    param,
                    loaded.part.props_path.display()
                )),
            );
        }
    }

    result
}

/// Check the mask is a power-of-two square matching the diffuse.
pub fn check_mask(part: &Bodypart) -> ValidationResult {
    let mut result = ValidationResult::new();

    let (Some(diffuse), Some(mask)) = (&part.textures.diffuse, &part.textures.mask) else {
        return result;
    };
    let (diffuse_dims, mask_dims) = match (dimensions(diffuse), dimensions(mask)) {
        (Ok(d), Ok(m)) => (d, m),
        (Err(message), _) | (_, Err(message)) => {
            result.error("skingen::check::unreadable-texture", message);
            return result;
        }
    };

    if let Err(e) = validate_mask(mask_dims, diffuse_dims) {
        result.push(
            Diagnostic::error("skingen::check::mask-size", e.to_string())
                .with_help("Masks pack two square halves side by side at the diffuse size"),
        );
    }

    result
}

/// Check the colour matrix and decal tint can be built.
pub fn check_colours(part: &Bodypart, keep_white: bool) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Err(e) = part.color_matrix(keep_white) {
        result.error("skingen::check::colour", e.to_string());
    }
    if let Err(e) = part.decal_colour() {
        result.error("skingen::check::colour", e.to_string());
    }
    if let Err(e) = part.decal_area() {
        result.error("skingen::check::colour", e.to_string());
    }

    result
}

/// Warn when a decal texture has no placement.
pub fn check_decal(part: &Bodypart, decalspec: Option<&str>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if part.textures.decal.is_some() && decalspec.is_none() {
        result.push(
            Diagnostic::warning(
                "skingen::check::decal-placement",
                "Part has a decal but no decalspec; the decal will be skipped",
            )
            .with_help("Pass --decalspec, e.g. --decalspec \"50% 50% 0 100%\""),
        );
    }

    result
}

/// Check the form of a decalspec string.
pub fn check_decalspec(decalspec: Option<&str>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(spec) = decalspec {
        if !validate_decalspec(spec) {
            result.push(
                Diagnostic::warning(
                    "skingen::check::decalspec",
                    format!("Invalid decalspec '{}'; decals will be skipped", spec),
                )
                .with_help("Expected `PosX[%] PosY[%] Rot Scale0[%] [Scale1[%]] [y|n]`"),
            );
        }
    }

    result
}

fn is_required(param: &str) -> bool {
    param == DIFFUSE_PARAM || param == MASK_PARAM
}

fn dimensions(path: &Path) -> std::result::Result<(u32, u32), String> {
    image::image_dimensions(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))
}
