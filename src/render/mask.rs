//! Splitting the combined mask texture.
//!
//! A `p_Masks` texture packs two masks side by side: the soft mask on the
//! left half and the hard mask on the right. Each half is stretched back to
//! the full texture size.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{Result, SkinError};

/// Soft and hard masks at diffuse resolution.
#[derive(Debug, Clone)]
pub struct MaskPair {
    pub soft: RgbaImage,
    pub hard: RgbaImage,
}

/// Whether the dimensions are a square with a power-of-two side of at least 2.
pub fn is_power_of_two_square((width, height): (u32, u32)) -> bool {
    width == height && width >= 2 && width.is_power_of_two()
}

/// Check a mask against the diffuse it will colour.
pub fn validate_mask(mask: (u32, u32), diffuse: (u32, u32)) -> Result<()> {
    if !is_power_of_two_square(mask) {
        return Err(SkinError::Build {
            message: format!(
                "Mask texture is {}x{}, expected a square power-of-two size",
                mask.0, mask.1
            ),
            help: Some("Re-export the p_Masks texture at its original resolution".to_string()),
        });
    }
    SkinError::check_dimensions("mask texture", diffuse, mask)
}

/// Split a mask texture into its soft and hard halves at `size`.
pub fn split_mask(mask: &RgbaImage, (width, height): (u32, u32)) -> MaskPair {
    let half = mask.width() / 2;
    let stretch = |x: u32| {
        let region = imageops::crop_imm(mask, x, 0, half, mask.height()).to_image();
        imageops::resize(&region, width, height, FilterType::CatmullRom)
    };
    MaskPair {
        soft: stretch(0),
        hard: stretch(half),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_power_of_two_square() {
        assert!(is_power_of_two_square((2, 2)));
        assert!(is_power_of_two_square((2048, 2048)));
        assert!(!is_power_of_two_square((1, 1)));
        assert!(!is_power_of_two_square((512, 256)));
        assert!(!is_power_of_two_square((96, 96)));
        assert!(!is_power_of_two_square((0, 0)));
    }

    #[test]
    fn test_validate_mask() {
        assert!(validate_mask((64, 64), (64, 64)).is_ok());
        assert!(matches!(
            validate_mask((64, 64), (128, 128)),
            Err(SkinError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            validate_mask((48, 48), (48, 48)),
            Err(SkinError::Build { .. })
        ));
    }

    #[test]
    fn test_split_halves() {
        let mask = RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });

        let pair = split_mask(&mask, (4, 4));
        assert_eq!(pair.soft.dimensions(), (4, 4));
        assert_eq!(pair.hard.dimensions(), (4, 4));
        assert!(pair.soft.pixels().all(|p| p.0 == [255, 0, 0, 255]));
        assert!(pair.hard.pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }
}
