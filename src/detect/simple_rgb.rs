//! Simple RGB Check: fraction of pixels whose red channel clearly dominates.

use super::{DetectionResult, Method, PIXEL_FRACTION_THRESHOLD};
use crate::color::red_dominates;
use crate::pixels::{PixelBuffer, count_matching, percent_of};

/// Red must exceed this raw value.
const RED_FLOOR: u8 = 150;
/// …and be this many times larger than green and blue.
const DOMINANCE_RATIO: f64 = 1.4;

pub fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let red = count_matching(buffer, |px| red_dominates(px, RED_FLOOR, DOMINANCE_RATIO));
    let confidence = percent_of(red, buffer.len());
    DetectionResult::new(
        Method::SimpleRgb,
        confidence > PIXEL_FRACTION_THRESHOLD,
        confidence,
    )
}
