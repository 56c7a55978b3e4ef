//! Shared test utilities: synthetic pixel buffers and result lookups.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let results = analyze_pixels(&solid(8, 8, [255, 0, 0, 255]), &AnalysisConfig::default());
//! assert!(find_result(&results, Method::Hsl).has_red);
//! ```

use crate::detect::{DetectionResult, Method};
use crate::pixels::PixelBuffer;
use image::{ImageFormat, Rgba, RgbaImage};

// =========================================================================
// Buffer builders
// =========================================================================

/// A `width × height` buffer filled with one color.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_image(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// A single row of `total` pixels: the first `marked` are `mark`, the rest `background`.
pub fn stripes(total: u32, marked: u32, mark: [u8; 4], background: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_image(RgbaImage::from_fn(total, 1, |x, _| {
        Rgba(if x < marked { mark } else { background })
    }))
}

/// Left half `left`, right half `right` (the right half gets the odd column).
pub fn halves(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_image(RgbaImage::from_fn(width, height, |x, _| {
        Rgba(if x < width / 2 { left } else { right })
    }))
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Vec<u8> {
    let mut bytes = Vec::new();
    buffer
        .as_image()
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

// =========================================================================
// Result lookups: panic with a clear message on miss
// =========================================================================

/// Find the result produced by `method`. Panics if not found.
pub fn find_result(results: &[DetectionResult], method: Method) -> &DetectionResult {
    results
        .iter()
        .find(|r| r.method == method)
        .unwrap_or_else(|| {
            let names: Vec<&str> = results.iter().map(|r| r.method.name()).collect();
            panic!("result '{method}' not found. Available: {names:?}")
        })
}
