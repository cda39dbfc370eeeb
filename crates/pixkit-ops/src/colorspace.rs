//! RGB <-> HSL conversion.
//!
//! Both directions work on normalized values: RGB channels, saturation and
//! lightness in `[0, 1]`, hue in `[0, 1)` turns. These are the standard
//! max/min formulas; the round trip is not bit-exact in float, but stays
//! within one 8-bit step for every RGB triple.
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::colorspace::{hsl_to_rgb, rgb_to_hsl};
//!
//! let (h, s, l) = rgb_to_hsl(1.0, 0.0, 0.0);
//! assert_eq!((h, s, l), (0.0, 1.0, 0.5));
//!
//! let (r, g, b) = hsl_to_rgb(h, s, l);
//! assert!((r - 1.0).abs() < 1e-9 && g.abs() < 1e-9 && b.abs() < 1e-9);
//! ```

/// Converts normalized RGB to (hue, saturation, lightness).
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Converts (hue, saturation, lightness) to normalized RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

#[inline]
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Converts 8-bit-scale RGB (`0..=255`) to HSL.
#[inline]
pub fn rgb255_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0)
}

/// Converts HSL to 8-bit-scale RGB (`0..=255`), unrounded.
#[inline]
pub fn hsl_to_rgb255(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    (r * 255.0, g * 255.0, b * 255.0)
}
