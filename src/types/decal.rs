//! Decal placement types.

use std::fmt;

/// Absolute decal placement, resolved against the target image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalSpec {
    /// Canvas x coordinate of the decal centre.
    pub posx: f64,
    /// Canvas y coordinate of the decal centre.
    pub posy: f64,
    /// Rotation in degrees, clockwise on screen.
    pub rot: f64,
    /// Rendered decal width in canvas pixels.
    pub scalex: f64,
    /// Rendered decal height in canvas pixels.
    pub scaley: f64,
    /// Tile the decal across the whole canvas.
    pub repeat: bool,
}

impl fmt::Display for DecalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos ({}, {}), rot {}, scale ({}, {}){}",
            self.posx,
            self.posy,
            self.rot,
            self.scalex,
            self.scaley,
            if self.repeat { ", repeat" } else { "" }
        )
    }
}

/// Region of the hard mask a decal may cover.
///
/// A pixel is inside the area when each of its R, G and B channels is at
/// least the matching threshold. Alpha is never tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecalArea {
    pub threshold: [u8; 3],
}

impl DecalArea {
    /// The whole canvas.
    pub const EVERYWHERE: Self = Self { threshold: [0, 0, 0] };

    pub const fn new(threshold: [u8; 3]) -> Self {
        Self { threshold }
    }

    /// Whether a hard-mask pixel lies inside the area.
    pub fn contains(&self, mask: [u8; 4]) -> bool {
        self.threshold
            .iter()
            .zip(mask.iter())
            .all(|(threshold, channel)| channel >= threshold)
    }
}
