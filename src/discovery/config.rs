//! Generator configuration (skingen.yaml) parsing.
//!
//! Every key is optional and supplies a default for the matching
//! `generate` flag. Command-line flags win over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkinError};
use crate::types::{BlendMode, Colour};

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "skingen.yaml";

/// Generator defaults loaded from skingen.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output directory for generated textures.
    pub output: Option<PathBuf>,

    /// Output file name format.
    pub outname: Option<String>,

    /// Decal placement applied when a part has a decal.
    pub decalspec: Option<String>,

    /// Blend mode for the final composite.
    pub blend: Option<BlendMode>,

    /// Keep near-white colours opaque.
    pub keep_white: bool,

    /// Skip the head texture.
    pub exclude_head: bool,

    /// Skip the body texture.
    pub exclude_body: bool,

    /// Also write the colour palette swatches.
    pub palette: bool,

    /// Overwrite existing output files.
    pub force: bool,

    /// Hex colour replacing the props file's decal tint.
    pub decal_color: Option<String>,
}

impl Config {
    /// Load config from a skingen.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SkinError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string. An empty document is the default.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SkinError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `skingen.yaml` in `dir` when present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILENAME);
                if !candidate.is_file() {
                    return Ok(None);
                }
                candidate
            }
        };
        let config = Self::load(&path)?;
        Ok(Some((path, config)))
    }

    /// The decal tint override, if configured.
    pub fn decal_colour(&self) -> Result<Option<Colour>> {
        self.decal_color.as_deref().map(Colour::from_hex).transpose()
    }
}
