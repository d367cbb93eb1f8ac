//! skingen - Skin texture generator for Borderlands 2
//!
//! A library for reading extracted material packages (props files, masks
//! and diffuse textures) and compositing recoloured head and body skins.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod props;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{load_props, Config, LoadedPart, OutputName, SkinDirectory, SkinInfo};
pub use error::{Result, SkinError};
pub use parser::{parse_decalspec, parse_notation, validate_decalspec, Tree, Value};
pub use props::{unify, ParameterList, ParameterNode, Unified, UnificationWarning, UnifiedProps};
pub use render::{color_diff, composite, multiply, multiply_sqrt, render_part, scale_ints, write_png};
pub use types::{BlendMode, Bodypart, ColorMatrix, Colour, DecalArea, DecalSpec, PartKind};
pub use validation::{validate_skin, CheckOptions, Diagnostic, Severity, ValidationResult};
