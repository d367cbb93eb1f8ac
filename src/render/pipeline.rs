//! The per-part compositing pipeline over already-loaded textures.

use image::{DynamicImage, RgbaImage};

use crate::error::Result;
use crate::types::{BlendMode, ColorMatrix, Colour, DecalArea, DecalSpec};

use super::color_diff::color_diff;
use super::decal::{blend_inplace, stamp};
use super::fixed::composite_dynamic;
use super::mask::{split_mask, validate_mask};

/// A decal ready to stamp.
#[derive(Debug, Clone, Copy)]
pub struct DecalLayer<'a> {
    pub image: &'a RgbaImage,
    pub tint: Colour,
    pub area: DecalArea,
    pub spec: DecalSpec,
}

/// Everything one part needs besides its textures.
#[derive(Debug, Clone, Copy)]
pub struct PartRender<'a> {
    pub matrix: &'a ColorMatrix,
    pub decal: Option<DecalLayer<'a>>,
    pub blend: BlendMode,
}

/// Render one part: overlay from the masks, optional decal, then the blend
/// onto the diffuse. The result keeps the diffuse's size and channel count.
pub fn render_part(
    diffuse: &DynamicImage,
    mask: &RgbaImage,
    part: &PartRender<'_>,
) -> Result<DynamicImage> {
    let size = (diffuse.width(), diffuse.height());
    validate_mask(mask.dimensions(), size)?;

    let masks = split_mask(mask, size);
    let mut overlay = color_diff(&masks.hard, &masks.soft, part.matrix)?;

    if let Some(decal) = &part.decal {
        let layer = stamp(decal.image, &masks.hard, decal.tint, decal.area, &decal.spec);
        blend_inplace(&layer, &mut overlay)?;
    }

    composite_dynamic(part.blend, &overlay, diffuse)
}
