//! Dominant Color: is red the dominant channel across the whole image?
//!
//! The image is first resampled onto a small square grid (50×50 by default)
//! with a triangle (bilinear) filter, then the channel means are compared.
//! The grid only bounds the cost on large images; on uniform images the
//! result equals the full-resolution mean, on busy images it can differ by a
//! few tenths of a percent.

use super::{DetectionResult, Method};
use crate::pixels::{PixelBuffer, channel_means};
use image::imageops::{self, FilterType};

/// Default side length of the resample grid.
pub const SAMPLE_GRID: u32 = 50;
/// Red is dominant above this ratio.
const DOMINANCE_THRESHOLD: f64 = 1.2;

pub fn detect(buffer: &PixelBuffer) -> DetectionResult {
    detect_with_grid(buffer, SAMPLE_GRID)
}

/// Same as [`detect`] with an explicit grid side; `grid` must be non-zero.
pub fn detect_with_grid(buffer: &PixelBuffer, grid: u32) -> DetectionResult {
    let dominance = if buffer.is_empty() {
        0.0
    } else {
        let sampled = imageops::resize(buffer.as_image(), grid, grid, FilterType::Triangle);
        channel_means(&PixelBuffer::from_image(sampled))
            .map(red_dominance)
            .unwrap_or(0.0)
    };

    let confidence = ((dominance - 1.0) * 100.0).clamp(0.0, 100.0);
    DetectionResult::new(
        Method::DominantColor,
        dominance > DOMINANCE_THRESHOLD,
        confidence,
    )
}

/// `mean_r / ((mean_g + mean_b) / 2)`.
///
/// With green and blue both zero the ratio is infinite when any red is
/// present (maximal dominance) and 0 for an all-black image.
pub fn red_dominance([r, g, b]: [f64; 3]) -> f64 {
    let others = (g + b) / 2.0;
    if others == 0.0 {
        return if r > 0.0 { f64::INFINITY } else { 0.0 };
    }
    r / others
}
