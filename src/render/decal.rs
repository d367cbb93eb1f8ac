//! Decal stamping.
//!
//! The decal is placed by inverse mapping: every canvas pixel centre is
//! moved into decal space (translate, rotate, scale) and the nearest decal
//! texel is read. Positive rotation turns the decal clockwise on screen.

use image::{Rgba, RgbaImage};

use crate::error::{Result, SkinError};
use crate::types::{Colour, DecalArea, DecalSpec};

use super::fixed::scale_ints;

/// Render the decal into a transparent layer the size of `hard`.
///
/// Pixels outside `area` stay transparent; the rest are tinted by `tint`.
/// A decal with no pixels or a zero extent produces an empty layer.
pub fn stamp(
    decal: &RgbaImage,
    hard: &RgbaImage,
    tint: Colour,
    area: DecalArea,
    spec: &DecalSpec,
) -> RgbaImage {
    let (width, height) = hard.dimensions();
    let mut layer = RgbaImage::new(width, height);

    let (dw, dh) = decal.dimensions();
    let extent_ok = |s: f64| s.is_finite() && s != 0.0;
    if dw == 0 || dh == 0 || !extent_ok(spec.scalex) || !extent_ok(spec.scaley) {
        return layer;
    }

    let (sin, cos) = spec.rot.to_radians().sin_cos();
    let step_x = dw as f64 / spec.scalex;
    let step_y = dh as f64 / spec.scaley;
    let tint = tint.to_rgba();

    for (x, y, out) in layer.enumerate_pixels_mut() {
        if !area.contains(hard.get_pixel(x, y).0) {
            continue;
        }

        let dx = x as f64 + 0.5 - spec.posx;
        let dy = y as f64 + 0.5 - spec.posy;
        let u = (dx * cos + dy * sin) * step_x + dw as f64 / 2.0;
        let v = (dy * cos - dx * sin) * step_y + dh as f64 / 2.0;

        let Some((sx, sy)) = texel(u, dw, spec.repeat).zip(texel(v, dh, spec.repeat)) else {
            continue;
        };

        let src = decal.get_pixel(sx, sy).0;
        *out = Rgba(std::array::from_fn(|i| scale_ints(src[i], tint[i])));
    }

    layer
}

/// Nearest texel index along one axis; wraps when tiling.
fn texel(coord: f64, size: u32, repeat: bool) -> Option<u32> {
    let index = coord.floor();
    if repeat {
        Some((index as i64).rem_euclid(size as i64) as u32)
    } else if index >= 0.0 && index < size as f64 {
        Some(index as u32)
    } else {
        None
    }
}

/// Paint `layer` over `overlay` with straight alpha-over.
pub fn blend_inplace(layer: &RgbaImage, overlay: &mut RgbaImage) -> Result<()> {
    SkinError::check_dimensions("decal layer", overlay.dimensions(), layer.dimensions())?;

    for (src, dst) in layer.pixels().zip(overlay.pixels_mut()) {
        let la = src[3];
        match la {
            0 => {}
            255 => *dst = *src,
            _ => {
                let under = scale_ints(dst[3], 255 - la) as u32;
                let out_a = la as u32 + under;
                for c in 0..3 {
                    let value = src[c] as u32 * la as u32 + dst[c] as u32 * under;
                    dst[c] = ((value + out_a / 2) / out_a) as u8;
                }
                dst[3] = out_a as u8;
            }
        }
    }
    Ok(())
}
