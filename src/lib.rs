//! # redscope
//!
//! Decides whether an image contains red. Four independent color heuristics
//! look at the same decoded pixels, and a majority vote turns their opinions
//! into one verdict.
//!
//! # Architecture: Decode, Fan Out, Vote
//!
//! ```text
//! 1. Decode    path / URL / bytes  →  PixelBuffer      (the only fallible step)
//! 2. Detect    PixelBuffer         →  4 × DetectionResult (independent, parallel)
//! 3. Vote      4 results           →  Final Verdict
//! ```
//!
//! Every detector is a pure function of the buffer. Nothing is shared between
//! them except read access to the pixels, so they can run in any order or all
//! at once and still produce the same numbers.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`analyze`] | The pipeline: decode, run the detectors, aggregate |
//! | [`detect`] | The four detectors, the verdict, and the shared result type |
//! | [`pixels`] | RGBA pixel buffer plus counting and averaging helpers |
//! | [`color`] | Channel normalization, red-branch hue, and red-band tests |
//! | [`imaging`] | Sources, URL fetching with proxy fallback, and decoding |
//! | [`config`] | `redscope.toml` loading, merging over defaults, and validation |
//! | [`output`] | Text and JSON reports for the CLI |
//!
//! # Design Decisions
//!
//! ## Several Weak Opinions Over One Strong One
//!
//! No single rule separates "red" from "not red" well. A raw channel threshold
//! misses dark reds, a hue test fires on faint pink noise, a mean color is
//! swamped by large neutral areas. The verdict requires at least two methods to
//! agree, which damps each method's particular blind spot.
//!
//! ## Errors Become Results
//!
//! [`analyze::analyze`] never fails. An image that cannot be loaded yields a
//! single result with method `Error` so that batch runs report every source
//! instead of stopping at the first bad one.
//!
//! ## Pure-Rust Decoding
//!
//! Decoding uses the `image` crate and fetching uses `ureq`, both pure Rust.
//! The binary has no system image libraries to install.

pub mod analyze;
pub mod color;
pub mod config;
pub mod detect;
pub mod imaging;
pub mod output;
pub mod pixels;

#[cfg(test)]
pub(crate) mod test_helpers;
