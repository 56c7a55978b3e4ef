//! The analysis pipeline: decode, fan out to the detectors, join, aggregate.
//!
//! ```text
//! ImageSource ──decode──▶ PixelBuffer ─┬─▶ Simple RGB Check ───┐
//!                                      ├─▶ HSL Analysis ───────┤
//!                                      ├─▶ Dominant Color ─────┼─▶ Final Verdict
//!                                      └─▶ Histogram Analysis ─┘
//! ```
//!
//! Decoding is the only fallible step and it finishes before any detector
//! starts. The detectors share one read-only buffer and may run on separate
//! rayon workers; the verdict waits for all four.
//!
//! The returned list always has the verdict first, then the four detector
//! results in [`Method::DETECTORS`](crate::detect::Method::DETECTORS) order.
//! When the image cannot be loaded the list is a single `Error` result
//! instead.

use crate::config::{AnalysisConfig, AnalyzerConfig};
use crate::detect::{DetectionResult, dominant, histogram, hsl, simple_rgb, verdict};
use crate::imaging::{ImageDecoder, ImageSource, RustDecoder};
use crate::pixels::PixelBuffer;
use log::{debug, info, warn};

/// Analyze one image with the stock decoder.
pub fn analyze(source: &ImageSource, config: &AnalyzerConfig) -> Vec<DetectionResult> {
    let decoder = RustDecoder::new(&config.fetch);
    analyze_with_decoder(&decoder, source, &config.analysis)
}

/// Analyze one image using a specific decoder (allows testing with a mock).
///
/// Never fails: a decode error becomes the synthetic error result.
pub fn analyze_with_decoder(
    decoder: &impl ImageDecoder,
    source: &ImageSource,
    config: &AnalysisConfig,
) -> Vec<DetectionResult> {
    match decoder.decode(source) {
        Ok(buffer) => analyze_pixels(&buffer, config),
        Err(e) => {
            warn!("could not load {}: {e}", source.label());
            vec![DetectionResult::load_error()]
        }
    }
}

/// Run every detector over an already decoded buffer and prepend the verdict.
pub fn analyze_pixels(buffer: &PixelBuffer, config: &AnalysisConfig) -> Vec<DetectionResult> {
    let grid = config.sample_grid;
    let detectors: [DetectionResult; 4] = if config.parallel {
        let ((rgb, hue), (dominance, bins)) = rayon::join(
            || rayon::join(|| simple_rgb::detect(buffer), || hsl::detect(buffer)),
            || {
                rayon::join(
                    || dominant::detect_with_grid(buffer, grid),
                    || histogram::detect(buffer),
                )
            },
        );
        [rgb, hue, dominance, bins]
    } else {
        [
            simple_rgb::detect(buffer),
            hsl::detect(buffer),
            dominant::detect_with_grid(buffer, grid),
            histogram::detect(buffer),
        ]
    };

    for result in &detectors {
        debug!(
            "{}: has_red={} confidence={:.2}",
            result.method, result.has_red, result.confidence
        );
    }

    let verdict = verdict::aggregate(&detectors);
    info!(
        "verdict for {}x{} image: has_red={} ({:.1}%)",
        buffer.width(),
        buffer.height(),
        verdict.has_red,
        verdict.confidence
    );

    let mut results = Vec::with_capacity(detectors.len() + 1);
    results.push(verdict);
    results.extend(detectors);
    results
}
