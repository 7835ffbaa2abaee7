//! # Chord Inference
//!
//! A post-processing engine that turns raw pitch-detection note events
//! into a stable, musically plausible chord progression plus a single
//! global key estimate.
//!
//! ## Features
//!
//! - **Key Detection**: Krumhansl-Schmuckler profile correlation over a
//!   weighted pitch-class histogram
//! - **Chord Detection**: sliding-window histograms with
//!   confidence-weighted chord-shape scoring
//! - **Stabilization**: harmony filtering, categorical timeline smoothing,
//!   merging, and minimum-duration enforcement
//!
//! ## Quick Start
//!
//! ```
//! use chord_inference::{infer_chords, InferenceConfig, NoteEvent};
//!
//! let notes = vec![
//!     NoteEvent { onset: 0.0, offset: 1.8, pitch: 60, confidence: 0.9 },
//!     NoteEvent { onset: 0.0, offset: 1.8, pitch: 64, confidence: 0.8 },
//!     NoteEvent { onset: 0.0, offset: 1.8, pitch: 67, confidence: 0.85 },
//! ];
//!
//! let result = infer_chords(&notes, &InferenceConfig::default());
//!
//! println!("Key: {} (confidence: {:.2})", result.key.name(), result.key.confidence);
//! for chord in &result.chords {
//!     println!("{:.1}s - {:.1}s: {}", chord.onset, chord.offset, chord.symbol);
//! }
//! ```
//!
//! ## Architecture
//!
//! The pipeline is strictly linear; each stage consumes the previous
//! stage's output list and produces a new one:
//!
//! ```text
//! Notes -> Pitch Smoothing -> Duration Filter -> Key Detection
//!       -> Key-Aware Filter -> Windowed Detection + Identification
//!       -> Harmony Filter -> Timeline Smoothing -> Merging -> Stability
//! ```
//!
//! The whole transform is a pure, deterministic, single-threaded batch
//! operation and is total over well-typed input: degenerate input produces
//! the documented neutral result instead of an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod events;
pub mod features;
pub mod io;
pub mod postprocessing;
pub mod preprocessing;

// Re-export main types
pub use analysis::engine::ChordInferenceEngine;
pub use analysis::result::{InferenceResult, PipelineStats};
pub use config::InferenceConfig;
pub use error::InferenceError;
pub use events::{ChordEvent, ChordQuality, NoteEvent};
pub use features::key::{KeyEstimate, Mode};

/// Run the chord inference pipeline with the given configuration.
///
/// Convenience wrapper that builds a fresh [`ChordInferenceEngine`] per
/// call; see [`ChordInferenceEngine::infer`] for the stage sequence and
/// output guarantees.
///
/// # Example
///
/// ```
/// use chord_inference::{infer_chords, InferenceConfig};
///
/// let result = infer_chords(&[], &InferenceConfig::default());
/// assert!(result.chords.is_empty());
/// assert_eq!(result.key.name(), "C");
/// ```
pub fn infer_chords(notes: &[NoteEvent], config: &InferenceConfig) -> InferenceResult {
    ChordInferenceEngine::new(config.clone()).infer(notes)
}
