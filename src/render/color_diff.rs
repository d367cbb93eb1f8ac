//! Overlay generation from the soft/hard mask pair and the colour matrix.
//!
//! Mask channels R, G and B belong to colour slots A, B and C. For each
//! slot the soft mask picks a point on the shadow → midtone → hilight
//! ramp and the hard mask says how strongly that slot's colour replaces
//! what lies underneath. Slots are applied in order on top of opaque white.

use image::{Rgba, RgbaImage};

use crate::error::{Result, SkinError};
use crate::types::{ColorMatrix, Colour, Slot};

use super::fixed::lerp;

/// Build the overlay image for a mask pair.
pub fn color_diff(hard: &RgbaImage, soft: &RgbaImage, colors: &ColorMatrix) -> Result<RgbaImage> {
    SkinError::check_dimensions("soft mask", hard.dimensions(), soft.dimensions())?;

    let ramps = Slot::ALL.map(|slot| colors.shades(slot).map(Colour::to_rgba));
    let mut overlay = RgbaImage::new(hard.width(), hard.height());

    for ((h, s), out) in hard.pixels().zip(soft.pixels()).zip(overlay.pixels_mut()) {
        let mut acc = Colour::WHITE.to_rgba();
        for (c, ramp) in ramps.iter().enumerate() {
            let weight = h[c];
            if weight == 0 {
                continue;
            }
            let shade = ramp_colour(ramp, s[c]);
            for (dst, src) in acc.iter_mut().zip(shade) {
                *dst = lerp(*dst, src, weight);
            }
        }
        *out = Rgba(acc);
    }

    Ok(overlay)
}

/// Position `t` on a three-stop ramp, with the midtone at 128.
fn ramp_colour(ramp: &[[u8; 4]; 3], t: u8) -> [u8; 4] {
    let [shadow, midtone, hilight] = ramp;
    let (from, to, weight) = if t <= 128 {
        (shadow, midtone, (t as u32 * 255 + 64) / 128)
    } else {
        (midtone, hilight, ((t as u32 - 128) * 255 + 63) / 127)
    };
    let weight = weight as u8;
    std::array::from_fn(|i| lerp(from[i], to[i], weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shade;

    fn uniform(pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba(pixel))
    }

    fn matrix_with(slot: Slot, shadow: Colour, midtone: Colour, hilight: Colour) -> ColorMatrix {
        let mut matrix = ColorMatrix::new();
        matrix.set(slot, Shade::Shadow, shadow);
        matrix.set(slot, Shade::Midtone, midtone);
        matrix.set(slot, Shade::Hilight, hilight);
        matrix
    }

    #[test]
    fn test_all_white_matrix_gives_opaque_white() {
        let hard = RgbaImage::from_fn(2, 2, |x, y| Rgba([(x * 255) as u8, (y * 255) as u8, 77, 0]));
        let soft = RgbaImage::from_fn(2, 2, |x, y| Rgba([(y * 200) as u8, 3, (x * 130) as u8, 9]));

        let overlay = color_diff(&hard, &soft, &ColorMatrix::new()).unwrap();
        assert!(overlay.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_ramp_stops() {
        let red = Colour::rgb(255, 0, 0);
        let green = Colour::rgb(0, 255, 0);
        let blue = Colour::rgb(0, 0, 255);
        let matrix = matrix_with(Slot::A, red, green, blue);
        let hard = uniform([255, 0, 0, 255]);

        let at = |t: u8| color_diff(&hard, &uniform([t, 0, 0, 0]), &matrix).unwrap()[(0, 0)].0;
        assert_eq!(at(0), [255, 0, 0, 255]);
        assert_eq!(at(128), [0, 255, 0, 255]);
        assert_eq!(at(255), [0, 0, 255, 255]);
        assert_eq!(at(64), [127, 128, 0, 255]);
    }

    #[test]
    fn test_hard_mask_selects_slot() {
        let mut matrix = ColorMatrix::new();
        for shade in Shade::ALL {
            matrix.set(Slot::B, shade, Colour::rgb(10, 20, 30));
        }
        let soft = uniform([0, 0, 0, 0]);

        let off = color_diff(&uniform([255, 0, 255, 255]), &soft, &matrix).unwrap();
        assert_eq!(off[(1, 1)].0, [255, 255, 255, 255]);

        let on = color_diff(&uniform([0, 255, 0, 0]), &soft, &matrix).unwrap();
        assert_eq!(on[(1, 1)].0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_partial_hard_mask_blends_toward_slot() {
        let black = Colour::BLACK;
        let matrix = matrix_with(Slot::C, black, black, black);

        let overlay = color_diff(&uniform([0, 0, 128, 0]), &uniform([0; 4]), &matrix).unwrap();
        assert_eq!(overlay[(0, 0)].0, [127, 127, 127, 255]);
    }

    #[test]
    fn test_later_slot_paints_over_earlier() {
        let mut matrix = ColorMatrix::new();
        for shade in Shade::ALL {
            matrix.set(Slot::A, shade, Colour::rgb(255, 0, 0));
            matrix.set(Slot::C, shade, Colour::new(0, 0, 255, 0));
        }

        let overlay = color_diff(&uniform([255, 0, 255, 0]), &uniform([0; 4]), &matrix).unwrap();
        assert_eq!(overlay[(0, 0)].0, [0, 0, 255, 0]);
    }

    #[test]
    fn test_mismatched_masks() {
        let result = color_diff(&RgbaImage::new(2, 2), &RgbaImage::new(4, 4), &ColorMatrix::new());
        assert!(matches!(result, Err(SkinError::DimensionMismatch { .. })));
    }
}
