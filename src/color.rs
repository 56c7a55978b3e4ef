//! Per-pixel color math shared by the detectors.

use crate::pixels::Rgba;

/// Lower bound of the red hue band (wraps through 360°).
pub const RED_HUE_LOW: f64 = 330.0;
/// Upper bound of the red hue band.
pub const RED_HUE_HIGH: f64 = 30.0;

/// Channels scaled to `[0, 1]`, alpha dropped.
#[inline]
pub fn normalize(px: Rgba) -> [f64; 3] {
    [
        f64::from(px.r) / 255.0,
        f64::from(px.g) / 255.0,
        f64::from(px.b) / 255.0,
    ]
}

/// Hue in degrees, computed only on the red-is-max branch of the hue wheel.
///
/// - Achromatic pixels (`max == min`) report hue 0.
/// - Pixels whose maximum is red report `60 × (g − b) / (max − min)`, folded
///   into `[0, 360)`.
/// - Pixels whose maximum is green or blue return `None`: they never count as
///   red-hued, whatever their position on the wheel.
#[inline]
pub fn red_branch_hue(r: f64, g: f64, b: f64) -> Option<f64> {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == min {
        return Some(0.0);
    }
    if max != r {
        return None;
    }

    let hue = 60.0 * ((g - b) / (max - min));
    Some(if hue < 0.0 { hue + 360.0 } else { hue })
}

/// Whether `hue` falls in `[330, 360] ∪ [0, 30]`.
#[inline]
pub fn is_red_hue(hue: f64) -> bool {
    hue >= RED_HUE_LOW || hue <= RED_HUE_HIGH
}

/// Brightest channel of a normalized pixel.
#[inline]
pub fn max_channel([r, g, b]: [f64; 3]) -> f64 {
    r.max(g).max(b)
}

/// Whether `px.r` clears `floor` and exceeds both other channels by `ratio`.
#[inline]
pub fn red_dominates(px: Rgba, floor: u8, ratio: f64) -> bool {
    let r = f64::from(px.r);
    px.r > floor && r > f64::from(px.g) * ratio && r > f64::from(px.b) * ratio
}
