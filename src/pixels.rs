//! Decoded pixel data and the shared per-pixel iteration helpers.
//!
//! A [`PixelBuffer`] is what every detector consumes: an immutable RGBA8 grid
//! whose length always equals `width × height`. Detectors never touch raw
//! bytes; they walk [`Rgba`] values through [`fold_pixels`] or
//! [`count_matching`], which keeps the per-method code down to the
//! classification rule and its threshold constants.

use crate::imaging::DecodeError;
use image::RgbaImage;

/// One pixel, channels in 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Immutable RGBA8 view of a decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap raw interleaved RGBA bytes.
    ///
    /// Fails unless `data.len() == width * height * 4`, including when that
    /// product does not fit in `usize`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DecodeError> {
        let actual = data.len();
        let Some(expected) = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
        else {
            return Err(DecodeError::InvalidBuffer {
                expected: usize::MAX,
                actual,
            });
        };
        // `from_raw` tolerates trailing bytes, so check the exact length first.
        if actual != expected {
            return Err(DecodeError::InvalidBuffer { expected, actual });
        }
        RgbaImage::from_raw(width, height, data)
            .map(Self::from_image)
            .ok_or(DecodeError::InvalidBuffer { expected, actual })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of pixels (`width × height`).
    pub fn len(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.image
            .pixels()
            .map(|p| Rgba::new(p.0[0], p.0[1], p.0[2], p.0[3]))
    }

    /// The underlying image, for operations such as resampling.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Walk every pixel once, threading an accumulator through `f`.
pub fn fold_pixels<A>(buffer: &PixelBuffer, init: A, f: impl FnMut(A, Rgba) -> A) -> A {
    buffer.pixels().fold(init, f)
}

/// Count the pixels for which `predicate` holds.
pub fn count_matching(buffer: &PixelBuffer, predicate: impl Fn(Rgba) -> bool) -> u64 {
    fold_pixels(buffer, 0u64, |n, px| if predicate(px) { n + 1 } else { n })
}

/// `count / total` as a percentage. An empty total yields 0.
pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Mean of the R, G and B channels (alpha ignored), or `None` for an empty buffer.
pub fn channel_means(buffer: &PixelBuffer) -> Option<[f64; 3]> {
    if buffer.is_empty() {
        return None;
    }
    let [r, g, b] = fold_pixels(buffer, [0u64; 3], |[r, g, b], px| {
        [
            r + u64::from(px.r),
            g + u64::from(px.g),
            b + u64::from(px.b),
        ]
    });
    let n = buffer.len() as f64;
    Some([r as f64 / n, g as f64 / n, b as f64 / n])
}
