//! The 3×3 colour matrix driving the overlay.
//!
//! Vector parameters named `p_<Slot>Color<Shade>` (e.g. `p_BColorHilight`)
//! fill one cell each. Cells a props file leaves out stay opaque white.

use std::fmt;

use crate::error::{Result, SkinError};
use crate::parser::Value;
use crate::props::ParameterList;

use super::{Colour, DecalArea};

/// Vector parameter holding the decal tint.
pub const DECAL_COLOUR_PARAM: &str = "p_DecalColor";
/// Vector parameter selecting the hard-mask channels a decal may cover.
pub const DECAL_CHANNEL_PARAM: &str = "p_DecalChannel";

/// Colour slot, one per hard/soft mask channel (A = red, B = green, C = blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
    C,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::A, Slot::B, Slot::C];

    pub fn index(self) -> usize {
        self as usize
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Slot::A),
            'B' => Some(Slot::B),
            'C' => Some(Slot::C),
            _ => None,
        }
    }
}

/// Shading level within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Shadow,
    Midtone,
    Hilight,
}

impl Shade {
    pub const ALL: [Shade; 3] = [Shade::Shadow, Shade::Midtone, Shade::Hilight];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Shade::Shadow => "shadow",
            Shade::Midtone => "midtone",
            Shade::Hilight => "hilight",
        }
    }

    /// Case-insensitive lookup of a parameter name suffix.
    fn from_suffix(suffix: &str) -> Option<Self> {
        Shade::ALL
            .into_iter()
            .find(|shade| suffix.eq_ignore_ascii_case(shade.name()))
    }
}

/// Colours indexed by slot and shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatrix {
    cells: [[Colour; 3]; 3],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self {
            cells: [[Colour::WHITE; 3]; 3],
        }
    }
}

impl ColorMatrix {
    /// A matrix with every cell opaque white.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot, shade: Shade) -> Colour {
        self.cells[slot.index()][shade.index()]
    }

    pub fn set(&mut self, slot: Slot, shade: Shade, colour: Colour) {
        self.cells[slot.index()][shade.index()] = colour;
    }

    /// The three shades of a slot, shadow first.
    pub fn shades(&self, slot: Slot) -> [Colour; 3] {
        self.cells[slot.index()]
    }

    /// Build the matrix from a props file's vector parameters.
    ///
    /// Unless `keep_white` is set, cells whose R, G and B all exceed 235
    /// get alpha 0 so baked highlights don't wash out the diffuse.
    pub fn from_vector_params(params: &ParameterList, keep_white: bool) -> Result<Self> {
        let mut matrix = Self::new();

        for node in params {
            let Some((slot, shade)) = parse_colour_name(&node.name) else {
                continue;
            };
            let Some(mut colour) = read_colour(&node.name, &node.value)? else {
                continue;
            };
            if !keep_white && colour.is_near_white() {
                colour = colour.with_alpha(0);
            }
            matrix.set(slot, shade, colour);
        }

        Ok(matrix)
    }
}

impl fmt::Display for ColorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in Slot::ALL {
            write!(f, "{:?}:", slot)?;
            for shade in Shade::ALL {
                write!(f, " {}={}", shade.name(), self.get(slot, shade))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build a colour matrix from vector parameters.
pub fn build_color_matrix(vector: &ParameterList, keep_white: bool) -> Result<ColorMatrix> {
    ColorMatrix::from_vector_params(vector, keep_white)
}

/// Split `p_<A|B|C>Color<Shade>` into its slot and shade.
fn parse_colour_name(name: &str) -> Option<(Slot, Shade)> {
    let rest = name.strip_prefix("p_")?;
    let mut chars = rest.chars();
    let slot = Slot::from_char(chars.next()?)?;
    let suffix = chars.as_str().strip_prefix("Color")?;
    Some((slot, Shade::from_suffix(suffix)?))
}

/// Read a `{ R=.., G=.., B=.., A=.. }` parameter value.
///
/// Returns `None` for values that are not channel dicts. Missing channels
/// read as 0; unknown channel keys are ignored.
fn read_colour(name: &str, value: &Value) -> Result<Option<Colour>> {
    let Some(dict) = value.as_dict() else {
        return Ok(None);
    };

    let mut channels = [None; 4];
    let mut order = Vec::with_capacity(4);
    for (key, raw) in dict {
        let index = match key.as_str() {
            "R" => 0,
            "G" => 1,
            "B" => 2,
            "A" => 3,
            _ => continue,
        };
        let text = raw.as_scalar().unwrap_or_default().trim();
        let parsed: f64 = text.parse().map_err(|_| SkinError::Parse {
            message: format!("Invalid {} channel '{}' in {}", key, text, name),
            help: None,
        })?;
        channels[index] = Some(parsed);
        order.push(parsed);
    }

    // Normalisation follows source order, so the first overflowing channel
    // as written decides the divisor.
    let mul = order.iter().find(|&&v| v > 1.0).map_or(1.0, |&v| 1.0 / v);
    Ok(Some(Colour::from_scaled_units(
        channels.map(|c| c.unwrap_or(0.0)),
        mul,
    )))
}

/// Decal tint from `p_DecalColor`; opaque white when absent.
///
/// Alpha defaults to opaque when the parameter has no `A` channel.
pub fn decal_colour(params: &ParameterList) -> Result<Colour> {
    let Some(node) = params.get(DECAL_COLOUR_PARAM) else {
        return Ok(Colour::WHITE);
    };
    let has_alpha = node.value.as_dict().is_some_and(|d| d.contains_key("A"));
    Ok(match read_colour(&node.name, &node.value)? {
        Some(colour) if !has_alpha => colour.with_alpha(255),
        Some(colour) => colour,
        None => Colour::WHITE,
    })
}

/// Decal area from `p_DecalChannel`: each channel above 0 requires that
/// hard-mask channel to be at least half on.
pub fn decal_area(params: &ParameterList) -> Result<DecalArea> {
    let Some(node) = params.get(DECAL_CHANNEL_PARAM) else {
        return Ok(DecalArea::EVERYWHERE);
    };
    let Some(colour) = read_colour(&node.name, &node.value)? else {
        return Ok(DecalArea::EVERYWHERE);
    };
    let threshold = [colour.r, colour.g, colour.b].map(|c| if c > 0 { 128 } else { 0 });
    Ok(DecalArea::new(threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_notation;
    use crate::props::unify;

    fn vector_params(body: &str) -> ParameterList {
        let entries: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
        let mut source = format!("VectorParameterValues[{}]={{\n", entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let (name, value) = entry.trim().split_once(' ').unwrap();
            source.push_str(&format!(
                "VectorParameterValues[{}]={{ParameterName={}\nParameterValue={}\nParameterInfo=VectorParameterValue\n}}\n",
                i, name, value
            ));
        }
        source.push('}');
        unify(parse_notation(&source).unwrap()).props.vector
    }

    #[test]
    fn test_unspecified_cells_are_opaque_white() {
        let matrix = ColorMatrix::from_vector_params(&ParameterList::new(), false).unwrap();
        for slot in Slot::ALL {
            for shade in Shade::ALL {
                assert_eq!(matrix.get(slot, shade), Colour::WHITE);
            }
        }
    }

    #[test]
    fn test_half_grey_with_unit_multiplier() {
        let params = vector_params("p_AColorShadow {R=0.5,G=0.5,B=0.5}");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();

        assert_eq!(matrix.get(Slot::A, Shade::Shadow), Colour::new(128, 128, 128, 0));
        assert_eq!(matrix.get(Slot::A, Shade::Midtone), Colour::WHITE);
    }

    #[test]
    fn test_overflowing_channel_scales_all_channels() {
        let params = vector_params("p_BColorMidtone {R=2.0,G=1.0,B=0.5,A=1.0}");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();

        assert_eq!(matrix.get(Slot::B, Shade::Midtone), Colour::new(255, 128, 64, 128));
    }

    #[test]
    fn test_first_overflow_in_source_order() {
        // G is written first, so 4.0 sets the divisor
        let params = vector_params("p_AColorShadow {G=4.0,R=2.0,B=0.0}");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();

        assert_eq!(matrix.get(Slot::A, Shade::Shadow), Colour::new(128, 255, 0, 0));
    }

    #[test]
    fn test_later_overflow_saturates() {
        // R=2.0 sets mul = 0.5, so G=4.0 still lands above 255
        let params = vector_params("p_AColorShadow {R=2.0,G=4.0,B=1.0}");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();

        assert_eq!(matrix.get(Slot::A, Shade::Shadow), Colour::new(255, 255, 128, 0));
    }

    #[test]
    fn test_negative_channel_saturates_to_zero() {
        let params = vector_params("p_BColorShadow {R=-0.5,G=0.0,B=0.0,A=1.0}");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();

        assert_eq!(matrix.get(Slot::B, Shade::Shadow), Colour::BLACK);
    }

    #[test]
    fn test_near_white_loses_alpha_unless_kept() {
        let value = 240.0 / 255.0;
        let params = vector_params(&format!(
            "p_CColorHilight {{R={v},G={v},B={v},A=1.0}}",
            v = value
        ));

        let suppressed = ColorMatrix::from_vector_params(&params, false).unwrap();
        assert_eq!(suppressed.get(Slot::C, Shade::Hilight), Colour::new(240, 240, 240, 0));

        let kept = ColorMatrix::from_vector_params(&params, true).unwrap();
        assert_eq!(kept.get(Slot::C, Shade::Hilight), Colour::new(240, 240, 240, 255));
    }

    #[test]
    fn test_shade_suffix_case_insensitive() {
        let params = vector_params("p_AColorHILIGHT {R=0.0,G=0.0,B=1.0,A=1.0}");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();

        assert_eq!(matrix.get(Slot::A, Shade::Hilight), Colour::new(0, 0, 255, 255));
    }

    #[test]
    fn test_unrelated_parameters_ignored() {
        let params = vector_params(
            "p_DColorShadow {R=0.0}\np_AColorDarkest {R=0.0}\np_AColor {R=0.0}\nAColorShadow {R=0.0}",
        );
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();
        assert_eq!(matrix, ColorMatrix::new());
    }

    #[test]
    fn test_channel_values_are_trimmed() {
        let params = vector_params("p_AColorShadow { R=0.0, G=0.0, B=0.0, A=1.0 }");
        let matrix = ColorMatrix::from_vector_params(&params, false).unwrap();
        assert_eq!(matrix.get(Slot::A, Shade::Shadow), Colour::BLACK);
    }

    #[test]
    fn test_invalid_channel_is_error() {
        let params = vector_params("p_AColorShadow {R=bright}");
        assert!(ColorMatrix::from_vector_params(&params, false).is_err());
    }

    #[test]
    fn test_decal_colour_defaults() {
        assert_eq!(decal_colour(&ParameterList::new()).unwrap(), Colour::WHITE);

        let params = vector_params("p_DecalColor {R=1.0,G=0.0,B=0.0}");
        assert_eq!(decal_colour(&params).unwrap(), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_decal_colour_skips_near_white_rule() {
        let params = vector_params("p_DecalColor {R=1.0,G=1.0,B=1.0,A=1.0}");
        assert_eq!(decal_colour(&params).unwrap(), Colour::WHITE);
    }

    #[test]
    fn test_decal_area_from_channels() {
        assert_eq!(decal_area(&ParameterList::new()).unwrap(), DecalArea::EVERYWHERE);

        let params = vector_params("p_DecalChannel {R=0.0,G=1.0,B=0.0,A=0.0}");
        assert_eq!(decal_area(&params).unwrap(), DecalArea::new([0, 128, 0]));
    }
}
