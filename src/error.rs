use miette::Diagnostic;
use thiserror::Error;

use crate::parser::Location;

/// Main error type for skingen operations
#[derive(Error, Diagnostic, Debug)]
pub enum SkinError {
    #[error("IO error: {0}")]
    #[diagnostic(code(skingen::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(skingen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Notation parse error at {location}: {message}")]
    #[diagnostic(code(skingen::notation))]
    NotationParse { message: String, location: Location },

    #[error("Parse error: {message}")]
    #[diagnostic(code(skingen::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid decalspec: {spec:?}")]
    #[diagnostic(
        code(skingen::decalspec),
        help("Expected `PosX[%] PosY[%] Rot Scale0[%] [Scale1[%]] [y|n]`, e.g. `50% 50% 270 100% y`")
    )]
    DecalSpecInvalid { spec: String },

    #[error("Missing {what}: {path}")]
    #[diagnostic(code(skingen::missing_asset))]
    MissingAsset {
        what: String,
        path: std::path::PathBuf,
    },

    #[error("Dimension mismatch for {what}: expected {expected:?}, got {actual:?}")]
    #[diagnostic(code(skingen::dimensions))]
    DimensionMismatch {
        what: String,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(skingen::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SkinError {
    /// Fail with a dimension mismatch unless both sizes agree.
    pub fn check_dimensions(
        what: impl Into<String>,
        expected: (u32, u32),
        actual: (u32, u32),
    ) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(SkinError::DimensionMismatch {
                what: what.into(),
                expected,
                actual,
            })
        }
    }
}

pub type Result<T> = std::result::Result<T, SkinError>;
