//! Named filter presets.
//!
//! A preset is an immutable bundle of adjustment deltas. The set is closed:
//! [`FilterPreset`] is an enum indexing a constant table, so an unknown name
//! can only appear at a parsing boundary ([`FromStr`]).

use pixkit_core::Error;
use std::fmt;
use std::str::FromStr;

/// Adjustment deltas carried by a preset.
///
/// `temperature` is centered on 50 and `tint` on 0; the remaining fields
/// are signed percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetValues {
    /// Lightness delta, percent.
    pub brightness: f64,
    /// Contrast delta, same scale as the contrast stage.
    pub contrast: f64,
    /// Saturation delta, percent.
    pub saturation: f64,
    /// Warmth, 50 = neutral.
    pub temperature: f64,
    /// Green/magenta shift, 0 = neutral.
    pub tint: f64,
    /// Highlight delta.
    pub highlights: f64,
    /// Shadow delta.
    pub shadows: f64,
    /// Vignette strength.
    pub vignette: f64,
}

#[allow(clippy::too_many_arguments)]
const fn pv(
    brightness: f64,
    contrast: f64,
    saturation: f64,
    temperature: f64,
    tint: f64,
    highlights: f64,
    shadows: f64,
    vignette: f64,
) -> PresetValues {
    PresetValues {
        brightness,
        contrast,
        saturation,
        temperature,
        tint,
        highlights,
        shadows,
        vignette,
    }
}

// Order matches the enum discriminants.
static PRESET_TABLE: [PresetValues; 15] = [
    pv(0.0, 0.0, 0.0, 50.0, 0.0, 0.0, 0.0, 0.0),
    pv(5.0, 10.0, -15.0, 45.0, 5.0, -10.0, 10.0, 20.0),
    pv(-5.0, 15.0, -20.0, 60.0, 10.0, -15.0, 15.0, 30.0),
    pv(0.0, 5.0, -5.0, 35.0, -10.0, -5.0, 5.0, 10.0),
    pv(5.0, 5.0, 10.0, 65.0, 10.0, -5.0, 5.0, 10.0),
    pv(-5.0, 20.0, -10.0, 55.0, 0.0, -20.0, 20.0, 40.0),
    pv(0.0, 15.0, 20.0, 55.0, -15.0, -10.0, 15.0, 25.0),
    pv(5.0, 10.0, 25.0, 75.0, 15.0, -5.0, 10.0, 15.0),
    pv(-5.0, 15.0, 30.0, 40.0, -20.0, -15.0, 15.0, 20.0),
    pv(-10.0, 30.0, 15.0, 45.0, 0.0, -25.0, 25.0, 45.0),
    pv(10.0, -10.0, -20.0, 55.0, 5.0, 15.0, -15.0, 10.0),
    pv(-15.0, 40.0, -80.0, 50.0, 0.0, -20.0, 20.0, 50.0),
    pv(10.0, 20.0, 40.0, 55.0, 0.0, -10.0, 10.0, 0.0),
    pv(0.0, 10.0, -30.0, 65.0, 20.0, -20.0, 10.0, 35.0),
    pv(5.0, 15.0, -10.0, 48.0, -5.0, -15.0, 15.0, 25.0),
];

/// Named color-grading preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FilterPreset {
    /// No preset stage.
    #[default]
    None,
    /// Soft, airy, slightly desaturated.
    Japanese,
    /// Warm, faded, low saturation.
    Vintage,
    /// Cool cast.
    Cold,
    /// Warm cast.
    Warm,
    /// Contrasty film look.
    Cinema,
    /// Teal shadows, warm highlights.
    CyanOrange,
    /// Saturated golden hour.
    Sunset,
    /// Deep greens.
    Forest,
    /// Heavy contrast and vignette.
    Dramatic,
    /// Lifted, washed out.
    Fade,
    /// Near-monochrome high contrast.
    Noir,
    /// Punchy saturation.
    Vivid,
    /// Warm, desaturated.
    Retro,
    /// Restrained, slightly cool.
    Elegant,
}

impl FilterPreset {
    /// Every preset, in table order.
    pub const ALL: [FilterPreset; 15] = [
        Self::None,
        Self::Japanese,
        Self::Vintage,
        Self::Cold,
        Self::Warm,
        Self::Cinema,
        Self::CyanOrange,
        Self::Sunset,
        Self::Forest,
        Self::Dramatic,
        Self::Fade,
        Self::Noir,
        Self::Vivid,
        Self::Retro,
        Self::Elegant,
    ];

    /// Returns the preset's deltas.
    ///
    /// ```rust
    /// use pixkit_ops::tone::FilterPreset;
    ///
    /// assert_eq!(FilterPreset::Noir.values().saturation, -80.0);
    /// assert_eq!(FilterPreset::None.values().temperature, 50.0);
    /// ```
    #[inline]
    pub fn values(self) -> &'static PresetValues {
        &PRESET_TABLE[self as usize]
    }

    /// Returns the canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Japanese => "japanese",
            Self::Vintage => "vintage",
            Self::Cold => "cold",
            Self::Warm => "warm",
            Self::Cinema => "cinema",
            Self::CyanOrange => "cyan-orange",
            Self::Sunset => "sunset",
            Self::Forest => "forest",
            Self::Dramatic => "dramatic",
            Self::Fade => "fade",
            Self::Noir => "noir",
            Self::Vivid => "vivid",
            Self::Retro => "retro",
            Self::Elegant => "elegant",
        }
    }

    /// Returns `true` for [`FilterPreset::None`].
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for FilterPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| Error::parse(format!("unknown filter preset '{}'", s)))
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for p in FilterPreset::ALL {
            assert_eq!(p.name().parse::<FilterPreset>().unwrap(), p);
        }
    }

    #[test]
    fn test_table_alignment() {
        assert_eq!(FilterPreset::CyanOrange.values().tint, -15.0);
        assert_eq!(FilterPreset::Sunset.values().temperature, 75.0);
        assert_eq!(FilterPreset::Elegant.values().temperature, 48.0);
        assert_eq!(FilterPreset::Vivid.values().vignette, 0.0);
    }

    #[test]
    fn test_unknown_name() {
        let err = "sepia".parse::<FilterPreset>().unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("sepia"));
        assert_eq!("  Cyan-Orange ".parse::<FilterPreset>().unwrap(), FilterPreset::CyanOrange);
    }
}
