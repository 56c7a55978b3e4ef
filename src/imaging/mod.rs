//! Image acquisition: everything between "a path or URL" and a decoded
//! [`PixelBuffer`](crate::pixels::PixelBuffer).
//!
//! | Concern | Module |
//! |---|---|
//! | **Source** | [`source`]: path, URL, or in-memory bytes |
//! | **Fetch** | [`fetch`]: URL download with a proxy fallback chain (`ureq`) |
//! | **Decode** | [`rust_decoder`]: `image` crate, any format → RGBA8 |
//! | **Seam** | [`decoder`]: [`ImageDecoder`] trait + [`DecodeError`] |
//!
//! This is the only part of the crate that performs I/O; the detectors only
//! ever see a fully decoded buffer.

pub mod decoder;
pub mod fetch;
pub mod rust_decoder;
pub mod source;

pub use decoder::{DecodeError, ImageDecoder};
pub use rust_decoder::{RustDecoder, decode_bytes, has_supported_extension, supported_extensions};
pub use source::ImageSource;
