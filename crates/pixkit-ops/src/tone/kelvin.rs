//! Blackbody white points.
//!
//! Piecewise log/power fit of a blackbody radiator's color, keyed at 6600K.
//! Output channels are in `0..=255` scale, clamped.

/// Reference white point the temperature stage normalizes against.
pub const REFERENCE_KELVIN: f64 = 6500.0;

/// Lowest temperature reachable from the slider.
pub const MIN_KELVIN: f64 = 2000.0;

/// Highest temperature reachable from the slider.
pub const MAX_KELVIN: f64 = 9000.0;

/// Maps a `0..=100` slider value linearly onto `2000K..=9000K`.
///
/// ```rust
/// use pixkit_ops::tone::kelvin::slider_to_kelvin;
///
/// assert_eq!(slider_to_kelvin(0.0), 2000.0);
/// assert_eq!(slider_to_kelvin(100.0), 9000.0);
/// ```
#[inline]
pub fn slider_to_kelvin(temperature: f64) -> f64 {
    MIN_KELVIN + temperature / 100.0 * (MAX_KELVIN - MIN_KELVIN)
}

/// Approximate RGB color of a blackbody at `kelvin`.
pub fn kelvin_to_rgb(kelvin: f64) -> [f64; 3] {
    let t = kelvin / 100.0;

    let (r, g, b) = if t <= 66.0 {
        let g = 99.470_802_586_1 * t.ln() - 161.119_568_166_1;
        let b = if t <= 19.0 {
            0.0
        } else {
            138.517_731_223_1 * (t - 10.0).ln() - 305.044_792_730_7
        };
        (255.0, g, b)
    } else {
        let r = 329.698_727_446 * (t - 60.0).powf(-0.133_204_759_2);
        let g = 288.122_169_528_3 * (t - 60.0).powf(-0.075_514_849_2);
        (r, g, 255.0)
    };

    [r.clamp(0.0, 255.0), g.clamp(0.0, 255.0), b.clamp(0.0, 255.0)]
}

/// Per-channel gains that move the reference white to `kelvin`'s white.
pub fn white_balance_gains(kelvin: f64) -> [f64; 3] {
    let target = kelvin_to_rgb(kelvin);
    let reference = kelvin_to_rgb(REFERENCE_KELVIN);
    [
        target[0] / reference[0],
        target[1] / reference[1],
        target[2] / reference[2],
    ]
}
