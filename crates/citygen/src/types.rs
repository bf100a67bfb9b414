use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }
}

/// Identifier of a district; equal to its seed's index in the seed list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(pub u16);

impl DistrictId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreetKind {
    Main,
    /// Arterial roads tracing district edges. Only ever present as cell flags.
    Boundary,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color `{0}` must be written as #rrggbb")]
    Format(String),
    #[error("color `{0}` contains a non-hex digit")]
    Digit(String),
}

/// Display color carried through to rendering consumers. Serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text
            .strip_prefix('#')
            .filter(|digits| digits.len() == 6 && digits.is_ascii())
            .ok_or_else(|| ColorParseError::Format(text.to_string()))?;
        if !digits.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(text.to_string()));
        }
        let channel = |range: Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::Digit(text.to_string()))
        };
        Ok(Self { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_print_symmetrically() {
        let color = Rgb::parse_hex("#4a90d9").expect("valid color");
        assert_eq!(color, Rgb::new(0x4a, 0x90, 0xd9));
        assert_eq!(color.to_string(), "#4a90d9");
    }

    #[test]
    fn malformed_colors_are_rejected() {
        assert_eq!(Rgb::parse_hex("4a90d9"), Err(ColorParseError::Format("4a90d9".to_string())));
        assert_eq!(Rgb::parse_hex("#4a90"), Err(ColorParseError::Format("#4a90".to_string())));
        assert_eq!(Rgb::parse_hex("#4a90zz"), Err(ColorParseError::Digit("#4a90zz".to_string())));
    }

    #[test]
    fn positions_order_row_major() {
        let mut positions = vec![Pos::new(3, 1), Pos::new(0, 2), Pos::new(1, 1)];
        positions.sort();
        assert_eq!(positions, vec![Pos::new(1, 1), Pos::new(3, 1), Pos::new(0, 2)]);
    }
}
