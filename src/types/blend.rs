//! Blend modes for compositing the overlay onto the diffuse.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SkinError;

/// How overlay channels combine with the base image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Fixed-point product.
    #[default]
    Multiply,
    /// Geometric mean, lighter than multiply.
    MultiplySqrt,
    /// Multiply in the darks, screen in the lights.
    Overlay,
    /// Per-channel minimum.
    Darken,
}

impl BlendMode {
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Multiply => "multiply",
            BlendMode::MultiplySqrt => "multiply-sqrt",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
        }
    }
}

impl FromStr for BlendMode {
    type Err = SkinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiply" => Ok(BlendMode::Multiply),
            "multiply-sqrt" | "multiply_sqrt" | "sqrt" => Ok(BlendMode::MultiplySqrt),
            "overlay" => Ok(BlendMode::Overlay),
            "darken" => Ok(BlendMode::Darken),
            other => Err(SkinError::Parse {
                message: format!("Blend mode '{}' is not supported", other),
                help: Some("Use multiply, multiply-sqrt, overlay or darken".to_string()),
            }),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
