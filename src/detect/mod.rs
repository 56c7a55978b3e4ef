//! Red-detection methods and their shared result type.
//!
//! Four independent detectors each turn a [`PixelBuffer`](crate::pixels::PixelBuffer)
//! into a [`DetectionResult`]; [`verdict::aggregate`] folds their opinions
//! into the final call.
//!
//! | Method | Module | Red when |
//! |---|---|---|
//! | Simple RGB Check | [`simple_rgb`] | > 1% of pixels have a strongly dominant red channel |
//! | HSL Analysis | [`hsl`] | > 1% of pixels sit in the 330°–30° hue band |
//! | Dominant Color | [`dominant`] | mean red > 1.2 × mean of green and blue |
//! | Histogram Analysis | [`histogram`] | bright red mass outweighs bright green + blue |
//!
//! Every detector is a pure function: same buffer in, bit-identical result out.

pub mod dominant;
pub mod histogram;
pub mod hsl;
pub mod simple_rgb;
pub mod verdict;

use serde::{Deserialize, Serialize};

pub use histogram::HistogramData;

/// Identifier of the method that produced a [`DetectionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "Final Verdict")]
    FinalVerdict,
    #[serde(rename = "Simple RGB Check")]
    SimpleRgb,
    #[serde(rename = "HSL Analysis")]
    Hsl,
    #[serde(rename = "Dominant Color")]
    DominantColor,
    #[serde(rename = "Histogram Analysis")]
    Histogram,
    #[serde(rename = "Error")]
    Error,
}

impl Method {
    /// Same as [`Method::all`], usable in const contexts.
    pub const DETECTORS: [Method; 4] = [
        Method::SimpleRgb,
        Method::Hsl,
        Method::DominantColor,
        Method::Histogram,
    ];

    /// The four detectors, in report order.
    pub fn all() -> &'static [Method] {
        &Self::DETECTORS
    }

    pub fn name(self) -> &'static str {
        match self {
            Method::FinalVerdict => "Final Verdict",
            Method::SimpleRgb => "Simple RGB Check",
            Method::Hsl => "HSL Analysis",
            Method::DominantColor => "Dominant Color",
            Method::Histogram => "Histogram Analysis",
            Method::Error => "Error",
        }
    }

    /// One-line rationale attached to every result of this method.
    pub fn description(self) -> &'static str {
        match self {
            Method::SimpleRgb => "Checks if red channel is significantly higher than others",
            Method::Hsl => "Analyzes hue values to detect reddish colors",
            Method::DominantColor => "Checks if red is a dominant color in the image",
            Method::Histogram => "Analyzes the distribution of color values across the image",
            Method::FinalVerdict => "Combines the individual methods by majority vote",
            Method::Error => {
                "Could not load the image. Try uploading the file directly instead of using a URL"
            }
        }
    }

    /// Longer explanation for `redscope methods`.
    pub fn about(self) -> &'static str {
        match self {
            Method::SimpleRgb => {
                "Examines the RGB values of each pixel, focusing on the red channel. \
                 Effective for pure or dominant reds; the baseline check."
            }
            Method::Hsl => {
                "Converts pixels to hue so reds are found independent of lightness, \
                 catching dark or muted reds that raw channel thresholds miss."
            }
            Method::DominantColor => {
                "Averages the whole image on a small sample grid and compares mean red \
                 against mean green and blue. Answers whether red dominates overall."
            }
            Method::Histogram => {
                "Builds per-channel intensity histograms and weighs bright red against \
                 bright green and blue. Useful for mixed images with red undertones."
            }
            Method::FinalVerdict => {
                "Red is reported when at least two of the four methods agree; the \
                 confidence is their average."
            }
            Method::Error => "Reported in place of all results when the image cannot be loaded.",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One method's opinion on whether the image contains red.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub method: Method,
    pub has_red: bool,
    /// Certainty that red is present, always within `[0, 100]`.
    pub confidence: f64,
    pub description: String,
    /// Only set by the histogram detector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram_data: Option<HistogramData>,
}

impl DetectionResult {
    /// Build a result with the method's stock description; `confidence` is clamped.
    pub(crate) fn new(method: Method, has_red: bool, confidence: f64) -> Self {
        Self::with_description(method, has_red, confidence, method.description().to_string())
    }

    pub(crate) fn with_description(
        method: Method,
        has_red: bool,
        confidence: f64,
        description: String,
    ) -> Self {
        Self {
            method,
            has_red,
            confidence: confidence.clamp(0.0, 100.0),
            description,
            histogram_data: None,
        }
    }

    /// The synthetic result reported when the image could not be obtained.
    pub fn load_error() -> Self {
        Self::new(Method::Error, false, 0.0)
    }
}

/// Shared confidence cutoff for the pixel-fraction detectors (percent).
pub(crate) const PIXEL_FRACTION_THRESHOLD: f64 = 1.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_match_serialized_form() {
        for method in [
            Method::FinalVerdict,
            Method::SimpleRgb,
            Method::Hsl,
            Method::DominantColor,
            Method::Histogram,
            Method::Error,
        ] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.name()));
        }
    }

    #[test]
    fn result_serializes_camel_case_without_histogram() {
        let result = DetectionResult::new(Method::Hsl, true, 42.0);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["method"], "HSL Analysis");
        assert_eq!(value["hasRed"], true);
        assert_eq!(value["confidence"], 42.0);
        assert!(value.get("histogramData").is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(DetectionResult::new(Method::SimpleRgb, true, 250.0).confidence, 100.0);
        assert_eq!(DetectionResult::new(Method::SimpleRgb, false, -3.0).confidence, 0.0);
    }

    #[test]
    fn load_error_is_negative() {
        let result = DetectionResult::load_error();
        assert_eq!(result.method, Method::Error);
        assert!(!result.has_red);
        assert_eq!(result.confidence, 0.0);
        assert!(result.description.contains("uploading the file directly"));
    }

    #[test]
    fn detectors_in_report_order() {
        let names: Vec<&str> = Method::DETECTORS.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            [
                "Simple RGB Check",
                "HSL Analysis",
                "Dominant Color",
                "Histogram Analysis"
            ]
        );
    }
}
