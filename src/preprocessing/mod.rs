//! Note preprocessing modules
//!
//! Cleans raw transcriber output before any chord analysis:
//! - Per-pitch-class median smoothing of confidence tracks
//! - Minimum duration filtering
//! - Key-aware filtering of weak chromatic notes

pub mod note_filters;
pub mod pitch_smoothing;

pub use note_filters::{filter_out_of_key_notes, filter_short_notes};
pub use pitch_smoothing::smooth_pitch_activity;
