//! Pure Rust decoder built on the `image` crate.
//!
//! | Source | Bytes from | Decoded by |
//! |---|---|---|
//! | Path | `std::fs::read` | `image::load_from_memory` (format sniffed from content) |
//! | URL | [`Fetcher`](super::fetch::Fetcher) fallback chain | same |
//! | Bytes | caller | same |
//!
//! Every image is converted to RGBA8 before it reaches the detectors, so
//! grayscale, 16-bit and paletted inputs all look the same downstream.
//! Animated formats contribute their first frame.

use super::decoder::{DecodeError, ImageDecoder};
use super::fetch::Fetcher;
use super::source::ImageSource;
use crate::config::FetchConfig;
use crate::pixels::PixelBuffer;
use image::ImageFormat;
use log::debug;
use std::path::Path;

/// Formats whose decoders are compiled in.
const FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
];

/// File extensions the decoder can read.
pub fn supported_extensions() -> Vec<&'static str> {
    FORMATS
        .iter()
        .filter(|fmt| fmt.reading_enabled())
        .flat_map(|fmt| fmt.extensions_str().iter().copied())
        .collect()
}

/// Whether `path` ends in one of [`supported_extensions`] (case-insensitive).
///
/// Decoding sniffs the content either way; this only decides whether a
/// mismatch is worth a log line.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| supported_extensions().contains(&ext.as_str()))
}

pub struct RustDecoder {
    fetcher: Fetcher,
}

impl RustDecoder {
    pub fn new(fetch: &FetchConfig) -> Self {
        Self {
            fetcher: Fetcher::new(fetch),
        }
    }
}

impl Default for RustDecoder {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

/// Decode an encoded image held in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let image = image::load_from_memory(bytes).map_err(|e| DecodeError::Decode(e.to_string()))?;
    Ok(PixelBuffer::from_image(image.into_rgba8()))
}

impl ImageDecoder for RustDecoder {
    fn decode(&self, source: &ImageSource) -> Result<PixelBuffer, DecodeError> {
        let buffer = match source {
            ImageSource::Path(path) => {
                if !has_supported_extension(path) {
                    debug!(
                        "{} has no known image extension, sniffing content",
                        path.display()
                    );
                }
                decode_bytes(&std::fs::read(path)?)
            }
            ImageSource::Url(url) => decode_bytes(&self.fetcher.fetch(url)?),
            ImageSource::Bytes { data, .. } => decode_bytes(data),
        }?;
        debug!(
            "decoded {} ({}x{})",
            source.label(),
            buffer.width(),
            buffer.height()
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{encode_png, solid};
    use std::path::PathBuf;

    #[test]
    fn supported_extensions_cover_common_formats() {
        let exts = supported_extensions();
        for expected in ["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"] {
            assert!(exts.contains(&expected), "expected {expected} in {exts:?}");
        }
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_supported_extension(Path::new("photos/Barn.JPG")));
        assert!(has_supported_extension(Path::new("red.webp")));
        assert!(!has_supported_extension(Path::new("notes.txt")));
        assert!(!has_supported_extension(Path::new("no_extension")));
    }

    #[test]
    fn png_content_with_wrong_extension_still_decodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("red.dat");
        std::fs::write(&path, encode_png(&solid(2, 2, [255, 0, 0, 255]))).unwrap();

        let decoded = RustDecoder::default()
            .decode(&ImageSource::Path(path))
            .unwrap();
        assert_eq!(decoded.width(), 2);
    }

    #[test]
    fn decodes_png_bytes_to_rgba() {
        let original = solid(6, 4, [250, 10, 20, 255]);
        let decoded = decode_bytes(&encode_png(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decodes_from_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("red.png");
        std::fs::write(&path, encode_png(&solid(3, 3, [255, 0, 0, 255]))).unwrap();

        let decoded = RustDecoder::default()
            .decode(&ImageSource::Path(path))
            .unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 3);
    }

    #[test]
    fn decodes_in_memory_bytes() {
        let source = ImageSource::Bytes {
            name: "upload.png".into(),
            data: encode_png(&solid(2, 5, [0, 0, 255, 255])),
        };
        let decoded = RustDecoder::default().decode(&source).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 5));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RustDecoder::default()
            .decode(&ImageSource::Path(PathBuf::from("/nonexistent/red.png")))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let err = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::Decode(_)));
    }

    #[test]
    fn grayscale_expands_to_rgba() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([90]));
        let mut bytes = Vec::new();
        gray.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let decoded = decode_bytes(&bytes).unwrap();
        assert!(
            decoded
                .pixels()
                .all(|px| (px.r, px.g, px.b, px.a) == (90, 90, 90, 255))
        );
    }
}
