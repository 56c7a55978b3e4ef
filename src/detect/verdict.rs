//! Final Verdict: majority vote over the individual detectors.

use super::{DetectionResult, Method};

/// Positive votes needed for a red verdict. A 2–2 split counts as red.
const MAJORITY: usize = 2;

/// Combine detector results into the final verdict.
///
/// Must only be called once every detector has finished; input order does
/// not matter. `confidence` is the plain mean of the inputs.
pub fn aggregate(results: &[DetectionResult]) -> DetectionResult {
    let positive = results.iter().filter(|r| r.has_red).count();
    let average = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64
    };

    let has_red = positive >= MAJORITY;
    let description = if has_red {
        format!(
            "{positive} out of {} methods detected red with {average:.1}% average confidence",
            results.len()
        )
    } else {
        "Not enough methods detected red to make a positive determination".to_string()
    };

    DetectionResult::with_description(Method::FinalVerdict, has_red, average, description)
}
