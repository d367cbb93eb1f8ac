//! PNG output for generated textures.
//!
//! Writes composited textures and the debug palette swatch.

use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::{Result, SkinError};
use crate::types::{ColorMatrix, Colour, Shade, Slot};

/// Side of one palette swatch.
const SWATCH: u32 = 64;
/// Gap around and between swatches.
const GUTTER: u32 = 16;
/// Side of the palette image.
pub const PALETTE_SIZE: u32 = 3 * SWATCH + 4 * GUTTER;

/// What happened when writing an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file existed and overwriting was not allowed.
    Skipped,
}

/// Write an image as PNG.
///
/// Missing parent directories are created. An existing file is left alone
/// unless `force` is set.
pub fn write_png(image: &DynamicImage, path: &Path, force: bool) -> Result<WriteOutcome> {
    if path.exists() && !force {
        return Ok(WriteOutcome::Skipped);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SkinError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| SkinError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(WriteOutcome::Written)
}

/// Render the colour matrix as a 3×3 grid of swatches on white.
///
/// Rows are slots A to C, columns shadow to hilight.
pub fn palette_image(matrix: &ColorMatrix) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(PALETTE_SIZE, PALETTE_SIZE, Rgba(Colour::WHITE.to_rgba()));

    for (row, slot) in Slot::ALL.into_iter().enumerate() {
        for (col, shade) in Shade::ALL.into_iter().enumerate() {
            let colour = Rgba(matrix.get(slot, shade).to_rgba());
            let x0 = GUTTER + col as u32 * (SWATCH + GUTTER);
            let y0 = GUTTER + row as u32 * (SWATCH + GUTTER);
            for y in y0..y0 + SWATCH {
                for x in x0..x0 + SWATCH {
                    img.put_pixel(x, y, colour);
                }
            }
        }
    }

    img
}
