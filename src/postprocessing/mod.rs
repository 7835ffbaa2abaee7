//! Chord post-processing modules
//!
//! Turns raw window chords into a stable progression:
//! - Key- and confidence-aware harmony filtering
//! - Categorical timeline smoothing
//! - Merging of adjacent matching chords
//! - Minimum-duration stability enforcement

pub mod harmony;
pub mod merging;
pub mod stability;
pub mod window_smoothing;

pub use harmony::filter_harmony;
pub use merging::merge_similar_chords;
pub use stability::{filter_unstable_chords, resolve_overlaps};
pub use window_smoothing::smooth_chord_progression;
