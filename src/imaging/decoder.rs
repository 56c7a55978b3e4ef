//! Decoder trait and the error every acquisition path reports.
//!
//! The [`ImageDecoder`] trait is the one seam between I/O and the detection
//! math: it turns an [`ImageSource`] into a fully decoded
//! [`PixelBuffer`](crate::pixels::PixelBuffer) or fails with a
//! [`DecodeError`]. Nothing downstream of it performs I/O.
//!
//! The production implementation is
//! [`RustDecoder`](super::rust_decoder::RustDecoder).

use super::source::ImageSource;
use crate::pixels::PixelBuffer;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Pixel data is {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },
}

/// Anything that can turn an image source into pixels.
///
/// `Sync` so one decoder can serve a parallel batch.
pub trait ImageDecoder: Sync {
    fn decode(&self, source: &ImageSource) -> Result<PixelBuffer, DecodeError>;
}
