//! Decalspec parser.
//!
//! A decalspec positions a decal on the generated texture:
//!
//! ```text
//! PosX[%] PosY[%] Rot Scale0[%] [Scale1[%]] [y|n]
//! ```
//!
//! Percent values are resolved against the target image size.

use crate::error::{Result, SkinError};
use crate::types::DecalSpec;

/// A numeric field, optionally relative to an image dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Field {
    value: f64,
    percent: bool,
}

impl Field {
    fn resolve(self, dim: u32) -> f64 {
        if self.percent {
            (self.value / 100.0) * dim as f64
        } else {
            self.value
        }
    }
}

/// A structurally valid decalspec before dimension resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawDecalSpec {
    posx: Field,
    posy: Field,
    rot: f64,
    scale0: Field,
    scale1: Option<Field>,
    repeat: bool,
}

/// Check the form of a decalspec without resolving it.
pub fn validate_decalspec(spec: &str) -> bool {
    parse_raw(spec).is_some()
}

/// Parse a decalspec, resolving percent values against `dim_x`/`dim_y`.
pub fn parse_decalspec(spec: &str, dim_x: u32, dim_y: u32) -> Result<DecalSpec> {
    let raw = parse_raw(spec).ok_or_else(|| SkinError::DecalSpecInvalid {
        spec: spec.to_string(),
    })?;

    let (scalex, scaley) = match raw.scale1 {
        Some(scale1) => (raw.scale0.resolve(dim_x), scale1.resolve(dim_y)),
        None => (raw.scale0.resolve(dim_x), raw.scale0.resolve(dim_y)),
    };

    Ok(DecalSpec {
        posx: raw.posx.resolve(dim_x),
        posy: raw.posy.resolve(dim_y),
        rot: raw.rot,
        scalex,
        scaley,
        repeat: raw.repeat,
    })
}

fn parse_raw(spec: &str) -> Option<RawDecalSpec> {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    if !(4..=6).contains(&tokens.len()) {
        return None;
    }

    let posx = parse_field(tokens[0], is_integer)?;
    let posy = parse_field(tokens[1], is_integer)?;
    let rot = parse_number(tokens[2])?;
    let scale0 = parse_field(tokens[3], is_decimal)?;

    let (scale1, repeat) = match &tokens[4..] {
        [] => (None, None),
        [last] => match parse_repeat(last) {
            Some(repeat) => (None, Some(repeat)),
            None => (Some(parse_field(last, is_decimal)?), None),
        },
        [scale1, repeat] => (
            Some(parse_field(scale1, is_decimal)?),
            Some(parse_repeat(repeat)?),
        ),
        _ => return None,
    };

    Some(RawDecalSpec {
        posx,
        posy,
        rot,
        scale0,
        scale1,
        repeat: repeat.unwrap_or(false),
    })
}

fn parse_field(token: &str, is_valid: fn(&str) -> bool) -> Option<Field> {
    let (number, percent) = match token.strip_suffix('%') {
        Some(number) => (number, true),
        None => (token, false),
    };
    if !is_valid(number) {
        return None;
    }
    Some(Field {
        value: number.parse().ok()?,
        percent,
    })
}

fn parse_number(token: &str) -> Option<f64> {
    if is_decimal(token) {
        token.parse().ok()
    } else {
        None
    }
}

fn parse_repeat(token: &str) -> Option<bool> {
    match token {
        "y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}

/// `-?[0-9]+`
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]*\.?[0-9]+`
fn is_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    match unsigned.split_once('.') {
        Some((whole, frac)) => {
            whole.bytes().all(|b| b.is_ascii_digit())
                && !frac.is_empty()
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => is_integer(unsigned) && !unsigned.starts_with('-'),
    }
}
