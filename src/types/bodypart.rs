//! Body parts and the textures each one draws from.

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::props::UnifiedProps;

use super::matrix::{decal_area, decal_colour, ColorMatrix};
use super::{Colour, DecalArea};

/// Texture parameter naming the base colour texture.
pub const DIFFUSE_PARAM: &str = "p_Diffuse";
/// Texture parameter naming the combined soft/hard mask texture.
pub const MASK_PARAM: &str = "p_Masks";
/// Texture parameter naming the normal map.
pub const NORMAL_PARAM: &str = "p_Normal";
/// Texture parameter naming the decal image.
pub const DECAL_PARAM: &str = "p_Decal";

/// Which part of the character a texture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Head,
    Body,
}

impl PartKind {
    /// Processing order.
    pub const ALL: [PartKind; 2] = [PartKind::Body, PartKind::Head];

    /// Capitalised name as used in props file names (`Head`).
    pub fn cap(self) -> &'static str {
        match self {
            PartKind::Head => "Head",
            PartKind::Body => "Body",
        }
    }

    /// Lowercase name as used in output file names (`head`).
    pub fn lower(self) -> &'static str {
        match self {
            PartKind::Head => "head",
            PartKind::Body => "body",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lower())
    }
}

/// Resolved texture files for one part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartTextures {
    pub diffuse: Option<PathBuf>,
    pub mask: Option<PathBuf>,
    pub normal: Option<PathBuf>,
    pub decal: Option<PathBuf>,
}

impl PartTextures {
    /// Slot for a texture parameter name, if it is one we use.
    pub fn slot(&self, param: &str) -> Option<&Option<PathBuf>> {
        match param {
            DIFFUSE_PARAM => Some(&self.diffuse),
            MASK_PARAM => Some(&self.mask),
            NORMAL_PARAM => Some(&self.normal),
            DECAL_PARAM => Some(&self.decal),
            _ => None,
        }
    }

    /// Mutable slot for a texture parameter name, if it is one we use.
    pub fn slot_mut(&mut self, param: &str) -> Option<&mut Option<PathBuf>> {
        match param {
            DIFFUSE_PARAM => Some(&mut self.diffuse),
            MASK_PARAM => Some(&mut self.mask),
            NORMAL_PARAM => Some(&mut self.normal),
            DECAL_PARAM => Some(&mut self.decal),
            _ => None,
        }
    }
}

/// One head or body instance with its own props and textures.
#[derive(Debug, Clone)]
pub struct Bodypart {
    pub kind: PartKind,
    pub props_path: PathBuf,
    pub props: UnifiedProps,
    pub textures: PartTextures,
}

impl Bodypart {
    pub fn new(kind: PartKind, props_path: PathBuf, props: UnifiedProps) -> Self {
        Self {
            kind,
            props_path,
            props,
            textures: PartTextures::default(),
        }
    }

    /// Colour matrix from this part's vector parameters.
    pub fn color_matrix(&self, keep_white: bool) -> Result<ColorMatrix> {
        ColorMatrix::from_vector_params(&self.props.vector, keep_white)
    }

    pub fn decal_colour(&self) -> Result<Colour> {
        decal_colour(&self.props.vector)
    }

    pub fn decal_area(&self) -> Result<DecalArea> {
        decal_area(&self.props.vector)
    }
}

/// Extract the asset name from a `Texture2D'Package.Group.Name'` reference.
///
/// Returns the last `.`-separated segment inside the quotes.
pub fn texture_asset_name(reference: &str) -> Option<&str> {
    let start = reference.find("Texture2D'")? + "Texture2D'".len();
    let inner = &reference[start..];
    let inner = &inner[..inner.rfind('\'')?];
    let name = inner.rsplit('.').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
