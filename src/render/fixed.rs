//! 8-bit fixed-point compositing of the overlay onto the diffuse.
//!
//! Every kernel works on the first three channels of the base image and
//! leaves its alpha, if any, untouched. The overlay's alpha weights the
//! blended result against the base:
//!
//! ```text
//! out = lerp(base, blend(overlay, base), overlay.a)
//! ```

use image::{DynamicImage, ImageBuffer, Pixel, RgbaImage};

use crate::error::{Result, SkinError};
use crate::types::BlendMode;

const COLOUR_CHANNELS: usize = 3;

/// `round(a * b / 255)` without floating point.
#[inline]
pub fn scale_ints(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    (((t >> 8) + t) >> 8) as u8
}

/// Fixed-point interpolation from `a` (weight 0) to `b` (weight 255).
#[inline]
pub fn lerp(a: u8, b: u8, weight: u8) -> u8 {
    scale_ints(a, 255 - weight).saturating_add(scale_ints(b, weight))
}

/// `round(sqrt(n))` for `n <= 255 * 255`, by integer Newton iteration.
#[inline]
fn round_sqrt(n: u32) -> u8 {
    let mut root = n;
    let mut next = (n + 1) / 2;
    while next < root {
        root = next;
        next = (root + n / root) / 2;
    }
    // sqrt(n) >= root + 0.5 exactly when n > root^2 + root
    if n - root * root > root {
        (root + 1) as u8
    } else {
        root as u8
    }
}

/// Blend one overlay channel with one base channel.
#[inline]
pub fn blend_channel(mode: BlendMode, o: u8, b: u8) -> u8 {
    match mode {
        BlendMode::Multiply => scale_ints(o, b),
        BlendMode::MultiplySqrt => round_sqrt(o as u32 * b as u32),
        BlendMode::Overlay => {
            if o < 127 {
                scale_ints(o, b).saturating_mul(2)
            } else {
                255 - scale_ints(255 - o, 255 - b).saturating_mul(2)
            }
        }
        BlendMode::Darken => o.min(b),
    }
}

/// Composite `overlay` onto `base` with the given blend mode.
///
/// Works for any 8-bit base with colour in its first three channels
/// (`RgbImage`, `RgbaImage`). The result has the base's pixel type.
pub fn composite<P>(
    mode: BlendMode,
    overlay: &RgbaImage,
    base: &ImageBuffer<P, Vec<u8>>,
) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    SkinError::check_dimensions("overlay", base.dimensions(), overlay.dimensions())?;

    let mut out = base.clone();
    for (o, px) in overlay.pixels().zip(out.pixels_mut()) {
        let alpha = o[3];
        for (c, b) in px.channels_mut().iter_mut().take(COLOUR_CHANNELS).enumerate() {
            let product = blend_channel(mode, o[c], *b);
            *b = lerp(*b, product, alpha);
        }
    }
    Ok(out)
}

/// Fixed-point multiply of `overlay` onto `base`.
pub fn multiply<P>(overlay: &RgbaImage, base: &ImageBuffer<P, Vec<u8>>) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    composite(BlendMode::Multiply, overlay, base)
}

/// Square-root multiply: the geometric mean of overlay and base.
pub fn multiply_sqrt<P>(
    overlay: &RgbaImage,
    base: &ImageBuffer<P, Vec<u8>>,
) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    composite(BlendMode::MultiplySqrt, overlay, base)
}

/// Composite onto a decoded texture, keeping its channel count.
///
/// RGB and RGBA bases are used as they are; other layouts are converted
/// to RGBA when they carry alpha and to RGB otherwise.
pub fn composite_dynamic(
    mode: BlendMode,
    overlay: &RgbaImage,
    base: &DynamicImage,
) -> Result<DynamicImage> {
    Ok(match base {
        DynamicImage::ImageRgb8(rgb) => DynamicImage::ImageRgb8(composite(mode, overlay, rgb)?),
        DynamicImage::ImageRgba8(rgba) => {
            DynamicImage::ImageRgba8(composite(mode, overlay, rgba)?)
        }
        other if other.color().has_alpha() => {
            DynamicImage::ImageRgba8(composite(mode, overlay, &other.to_rgba8())?)
        }
        other => DynamicImage::ImageRgb8(composite(mode, overlay, &other.to_rgb8())?),
    })
}
