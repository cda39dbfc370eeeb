//! Pixel-level constants and the opaque [`Rgb`] fill color.
//!
//! # Rec.601 Luma
//!
//! The tone engine's highlight/shadow split and the classic grayscale mode
//! both use the ITU-R BT.601 weights `Y = 0.299*R + 0.587*G + 0.114*B`.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Rec.601 Luma Constants
// ============================================================================

/// Rec.601 luma coefficient for red channel.
pub const REC601_LUMA_R: f64 = 0.299;

/// Rec.601 luma coefficient for green channel.
pub const REC601_LUMA_G: f64 = 0.587;

/// Rec.601 luma coefficient for blue channel.
pub const REC601_LUMA_B: f64 = 0.114;

/// Rec.601 luma coefficients as an array [R, G, B].
pub const REC601_LUMA: [f64; 3] = [REC601_LUMA_R, REC601_LUMA_G, REC601_LUMA_B];

/// Rec.601 luma of an RGB triple, in the same scale as the input.
///
/// # Example
///
/// ```
/// use pixkit_core::luma_rec601;
///
/// assert!((luma_rec601(255.0, 255.0, 255.0) - 255.0).abs() < 1e-9);
/// assert_eq!(luma_rec601(0.0, 0.0, 0.0), 0.0);
/// ```
#[inline]
pub fn luma_rec601(r: f64, g: f64, b: f64) -> f64 {
    REC601_LUMA_R * r + REC601_LUMA_G * g + REC601_LUMA_B * b
}

// ============================================================================
// Rgb
// ============================================================================

/// An opaque 8-bit color used for backgrounds and fills.
///
/// Parses CSS-style hex strings: `#RRGGBB`, `RRGGBB`, `#RGB`.
///
/// ```
/// use pixkit_core::Rgb;
///
/// let c: Rgb = "#FF8000".parse().unwrap();
/// assert_eq!(c, Rgb::new(255, 128, 0));
/// assert_eq!(c.to_rgba(255), [255, 128, 0, 255]);
/// assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure white, the default background of the grid and merge tools.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Creates a color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expands to an RGBA pixel with the given alpha.
    #[inline]
    pub const fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(Error::parse(format!("color '{}'", s)));
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| Error::parse(format!("color '{}'", s)))
        };
        match hex.len() {
            6 => Ok(Rgb::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(Error::parse(format!("color '{}': expected #RRGGBB or #RGB", s))),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
