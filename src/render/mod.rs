//! Rendering module for skingen.
//!
//! Turns masks, colours and decals into a finished texture:
//! - `color_diff` builds the overlay from the mask pair and colour matrix
//! - `decal` stamps and alpha-blends the decal onto the overlay
//! - `fixed` composites the overlay onto the diffuse
//! - `pipeline` runs all of it for one part

mod color_diff;
mod decal;
pub mod fixed;
mod mask;
mod pipeline;
mod png;

pub use color_diff::color_diff;
pub use decal::{blend_inplace, stamp};
pub use fixed::{composite, composite_dynamic, multiply, multiply_sqrt, scale_ints};
pub use mask::{is_power_of_two_square, split_mask, validate_mask, MaskPair};
pub use pipeline::{render_part, DecalLayer, PartRender};
pub use png::{palette_image, write_png, WriteOutcome, PALETTE_SIZE};
