//! Skin package discovery.
//!
//! An extracted skin package is a directory named like
//! `CD_Siren_Skin_BlueB_SF` holding material descriptors and textures:
//!
//! ```text
//! CD_Siren_Skin_BlueB_SF/
//!   MaterialInstanceConstant/Mati_BlueB_Body.props.txt
//!   MaterialInstanceConstant/Mati_BlueB_Head.props.txt
//!   Texture2D/Siren_BlueB_Dif.tga
//!   ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use skingen::discovery::SkinDirectory;
//! use skingen::types::PartKind;
//!
//! let skin = SkinDirectory::open("./CD_Siren_Skin_BlueB_SF")?;
//! let body = skin.load_part(PartKind::Body)?;
//! println!("diffuse: {:?}", body.part.textures.diffuse);
//! ```

mod config;
mod naming;
mod scanner;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, SkinError};
use crate::parser::parse_notation;
use crate::props::{unify, Unified, UnificationWarning};
use crate::types::{texture_asset_name, Bodypart, PartKind};

pub use config::{Config, CONFIG_FILENAME};
pub use naming::{OutputName, DEFAULT_OUTNAME};
pub use scanner::{find_file, is_props_file, locate, scan_props_files, PROPS_SUFFIX};

/// Player classes a skin directory can belong to.
pub const CLASSES: [&str; 6] = ["Assassin", "Mechro", "Mercenary", "Soldier", "Siren", "Psycho"];

/// Folder holding the material descriptors.
pub const PROPS_DIR: &str = "MaterialInstanceConstant";
/// Folder holding the extracted textures.
pub const TEXTURE_DIR: &str = "Texture2D";
/// Extension of extracted textures.
pub const TEXTURE_EXTENSION: &str = "tga";

/// What the directory name says about the skin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinInfo {
    pub class: String,
    pub skin_type: String,
    pub skin: String,
}

impl SkinInfo {
    /// Parse a `CD_<Class>_<Type>_<Skin>_<Suffix>` directory name.
    pub fn from_dir_name(name: &str) -> Result<Self> {
        let class = CLASSES
            .iter()
            .find(|class| name.contains(**class))
            .ok_or_else(|| SkinError::Build {
                message: format!("Unable to find a player class in '{}'", name),
                help: Some(format!("Expected one of: {}", CLASSES.join(", "))),
            })?;

        let fields: Vec<&str> = name.split('_').collect();
        match fields.as_slice() {
            [_, _, skin_type, skin, ..] if !skin.is_empty() => Ok(Self {
                class: class.to_string(),
                skin_type: skin_type.to_string(),
                skin: skin.to_string(),
            }),
            _ => Err(SkinError::Build {
                message: format!("Directory name '{}' does not follow the package format", name),
                help: Some("Expected CD_<Class>_<Type>_<Skin>_<Suffix>".to_string()),
            }),
        }
    }
}

/// A texture parameter that could not be resolved to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureIssue {
    /// The parameter value is not a `Texture2D'...'` reference.
    Unresolvable { param: String, value: String },
    /// The referenced texture file does not exist.
    Missing { param: String, expected: PathBuf },
}

impl fmt::Display for TextureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureIssue::Unresolvable { param, value } => {
                write!(f, "{}: cannot resolve texture from '{}'", param, value)
            }
            TextureIssue::Missing { param, expected } => {
                write!(f, "{}: texture file {} not found", param, expected.display())
            }
        }
    }
}

/// A part loaded from disk, with everything that went wrong on the way.
#[derive(Debug, Clone)]
pub struct LoadedPart {
    pub part: Bodypart,
    pub warnings: Vec<UnificationWarning>,
    pub texture_issues: Vec<TextureIssue>,
}

/// An extracted skin package on disk.
#[derive(Debug, Clone)]
pub struct SkinDirectory {
    pub root: PathBuf,
    pub info: SkinInfo,
}

impl SkinDirectory {
    /// Open a skin directory, reading class and skin name from its name.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(SkinError::MissingAsset {
                what: "skin directory".to_string(),
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize().map_err(|e| SkinError::Io {
            path: root.to_path_buf(),
            message: format!("Failed to resolve directory: {}", e),
        })?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let info = SkinInfo::from_dir_name(&name)?;

        Ok(Self { root, info })
    }

    /// Where the props file of a part should be.
    pub fn expected_props_path(&self, kind: PartKind) -> PathBuf {
        self.root
            .join(PROPS_DIR)
            .join(format!("Mati_{}_{}{}", self.info.skin, kind.cap(), PROPS_SUFFIX))
    }

    /// Find the props file of a part.
    pub fn locate_props(&self, kind: PartKind) -> Result<PathBuf> {
        let expected = self.expected_props_path(kind);
        locate(&self.root, &expected).ok_or_else(|| SkinError::MissingAsset {
            what: format!("{} props file", kind.lower()),
            path: expected,
        })
    }

    /// Where a texture asset should be.
    pub fn expected_texture_path(&self, asset: &str) -> PathBuf {
        self.root
            .join(TEXTURE_DIR)
            .join(format!("{}.{}", asset, TEXTURE_EXTENSION))
    }

    /// Read a part's props file and resolve its textures.
    pub fn load_part(&self, kind: PartKind) -> Result<LoadedPart> {
        let props_path = self.locate_props(kind)?;
        let unified = load_props(&props_path)?;
        let mut part = Bodypart::new(kind, props_path, unified.props);
        let mut texture_issues = Vec::new();

        let params: Vec<(String, Option<String>)> = part
            .props
            .texture
            .iter()
            .map(|node| (node.name.clone(), node.value.as_scalar().map(str::to_string)))
            .collect();

        for (param, value) in params {
            let Some(slot) = part.textures.slot_mut(&param) else {
                continue;
            };
            let value = value.unwrap_or_default();
            let Some(asset) = texture_asset_name(&value) else {
                texture_issues.push(TextureIssue::Unresolvable { param, value });
                continue;
            };
            let expected = self.expected_texture_path(asset);
            match locate(&self.root, &expected) {
                Some(found) => *slot = Some(found),
                None => texture_issues.push(TextureIssue::Missing { param, expected }),
            }
        }

        Ok(LoadedPart {
            part,
            warnings: unified.warnings,
            texture_issues,
        })
    }
}

/// Read, parse and unify one props file.
pub fn load_props(path: &Path) -> Result<Unified> {
    let bytes = std::fs::read(path).map_err(|e| SkinError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read props file: {}", e),
    })?;
    let source = String::from_utf8_lossy(&bytes);
    Ok(unify(parse_notation(&source)?))
}
