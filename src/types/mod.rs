//! Core domain types for skingen.
//!
//! - `Colour` - RGBA colour values
//! - `ColorMatrix` - the 3×3 slot/shade colour grid
//! - `DecalSpec`, `DecalArea` - decal placement and coverage
//! - `Bodypart` - a head or body with its props and textures
//! - `BlendMode` - how the overlay combines with the diffuse

mod blend;
mod bodypart;
mod colour;
mod decal;
pub mod matrix;

pub use blend::BlendMode;
pub use bodypart::{
    texture_asset_name, Bodypart, PartKind, PartTextures, DECAL_PARAM, DIFFUSE_PARAM, MASK_PARAM,
    NORMAL_PARAM,
};
pub use colour::Colour;
pub use decal::{DecalArea, DecalSpec};
pub use matrix::{build_color_matrix, ColorMatrix, Shade, Slot};
