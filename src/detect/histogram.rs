//! Histogram Analysis: bright red mass against bright green and blue.
//!
//! Builds 256-bin histograms for R, G and B. Only the upper half of each
//! (values 128–255) counts as a "significant" contribution. The raw bins
//! travel with the result so a charting front end can draw them.

use super::{DetectionResult, Method};
use crate::pixels::PixelBuffer;
use serde::{Deserialize, Serialize};

pub const BINS: usize = 256;
/// First bin of the significant (upper) half.
const SIGNIFICANT_FROM: usize = 128;
/// Dominance is scaled by this factor into a confidence.
const CONFIDENCE_SCALE: f64 = 50.0;
const CONFIDENCE_THRESHOLD: f64 = 25.0;

/// Per-channel pixel counts, 256 bins each, indexed by channel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramData {
    pub red: Vec<u64>,
    pub green: Vec<u64>,
    pub blue: Vec<u64>,
}

impl HistogramData {
    pub fn build(buffer: &PixelBuffer) -> Self {
        let mut histogram = Self {
            red: vec![0; BINS],
            green: vec![0; BINS],
            blue: vec![0; BINS],
        };
        for px in buffer.pixels() {
            histogram.red[usize::from(px.r)] += 1;
            histogram.green[usize::from(px.g)] += 1;
            histogram.blue[usize::from(px.b)] += 1;
        }
        histogram
    }

    /// Most populated bin of each channel (lowest value wins ties).
    pub fn peaks(&self) -> [usize; 3] {
        [peak(&self.red), peak(&self.green), peak(&self.blue)]
    }

    /// `significant red / (significant green + significant blue + 1)`.
    pub fn red_dominance(&self) -> f64 {
        let red = significant(&self.red);
        let others = significant(&self.green) + significant(&self.blue) + 1;
        red as f64 / others as f64
    }
}

fn significant(bins: &[u64]) -> u64 {
    bins.iter().skip(SIGNIFICANT_FROM).sum()
}

fn peak(bins: &[u64]) -> usize {
    bins.iter()
        .enumerate()
        .fold((0, 0), |best, (value, &count)| {
            if count > best.1 { (value, count) } else { best }
        })
        .0
}

pub fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let histogram = HistogramData::build(buffer);
    let confidence = (histogram.red_dominance() * CONFIDENCE_SCALE).min(100.0);
    let mut result = DetectionResult::new(
        Method::Histogram,
        confidence > CONFIDENCE_THRESHOLD,
        confidence,
    );
    result.histogram_data = Some(histogram);
    result
}
