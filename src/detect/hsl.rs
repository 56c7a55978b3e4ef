//! HSL Analysis: fraction of pixels with a red hue.
//!
//! Hue ignores lightness, so dark or muted reds that fail the raw channel
//! thresholds of [`simple_rgb`](super::simple_rgb) still count here. Only the
//! red-is-max branch of the hue wheel is considered (see
//! [`red_branch_hue`]); near-black pixels are excluded by a brightness floor.
//!
//! Achromatic pixels have hue 0 and therefore count once they are brighter
//! than the floor: a plain grey or white image reads as fully red-hued.

use super::{DetectionResult, Method, PIXEL_FRACTION_THRESHOLD};
use crate::color::{is_red_hue, max_channel, normalize, red_branch_hue};
use crate::pixels::{PixelBuffer, Rgba, count_matching, percent_of};

/// Minimum brightest-channel value (normalized) for a pixel to count.
const MIN_BRIGHTNESS: f64 = 0.2;

fn is_red_hued(px: Rgba) -> bool {
    let rgb = normalize(px);
    if max_channel(rgb) <= MIN_BRIGHTNESS {
        return false;
    }
    let [r, g, b] = rgb;
    red_branch_hue(r, g, b).is_some_and(is_red_hue)
}

pub fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let red = count_matching(buffer, is_red_hued);
    let confidence = percent_of(red, buffer.len());
    DetectionResult::new(Method::Hsl, confidence > PIXEL_FRACTION_THRESHOLD, confidence)
}
