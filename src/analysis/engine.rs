//! Chord inference engine
//!
//! Sequences the pipeline stages into one deterministic batch transform.

use super::result::{InferenceResult, PipelineStats};
use crate::config::InferenceConfig;
use crate::events::NoteEvent;
use crate::features::chords::{detect_chords_in_windows, ChordShapeTable};
use crate::features::key::{estimate_key, KeyProfiles};
use crate::postprocessing::{
    filter_harmony, filter_unstable_chords, merge_similar_chords, resolve_overlaps,
    smooth_chord_progression,
};
use crate::preprocessing::{filter_out_of_key_notes, filter_short_notes, smooth_pitch_activity};

/// Main engine converting note events into a stable chord progression.
///
/// Holds only immutable configuration and lookup tables; every run keeps
/// its state on the stack, so one engine value can serve any number of
/// independent inputs, sequentially or from multiple threads.
#[derive(Debug, Clone)]
pub struct ChordInferenceEngine {
    config: InferenceConfig,
    profiles: KeyProfiles,
    shapes: ChordShapeTable,
}

impl ChordInferenceEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            profiles: KeyProfiles::new(),
            shapes: ChordShapeTable::new(),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run the full inference pipeline over a batch of note events.
    ///
    /// Stages run in a fixed order: pitch smoothing, duration filtering,
    /// key estimation, key-aware filtering, windowed detection, harmony
    /// filtering, timeline smoothing, merging, and stability enforcement.
    /// The returned chords are onset-sorted, non-overlapping, and at least
    /// the minimum stable duration long; degenerate input yields an empty
    /// chord list and the neutral key, never an error.
    pub fn infer(&self, notes: &[NoteEvent]) -> InferenceResult {
        log::info!("Starting chord inference for {} note events", notes.len());

        let mut stats = PipelineStats {
            input_notes: notes.len(),
            ..PipelineStats::default()
        };

        let smoothed = smooth_pitch_activity(notes, &self.config);
        stats.smoothed_notes = smoothed.len();

        let duration_filtered = filter_short_notes(&smoothed, &self.config);
        stats.duration_filtered_notes = duration_filtered.len();

        let key = estimate_key(&duration_filtered, &self.profiles, &self.config);

        let key_filtered = filter_out_of_key_notes(&duration_filtered, &key, &self.config);
        stats.key_filtered_notes = key_filtered.len();

        let raw = detect_chords_in_windows(&key_filtered, &key, &self.shapes, &self.config);
        stats.raw_chords = raw.len();

        let plausible = filter_harmony(&raw, &key, &self.config);
        stats.harmony_filtered_chords = plausible.len();

        let smoothed_chords = smooth_chord_progression(&plausible, &self.config);
        stats.smoothed_chords = smoothed_chords.len();

        let merged = merge_similar_chords(&smoothed_chords, &self.config);
        stats.merged_chords = merged.len();

        // Overlap clipping keeps the output invariants on paths where the
        // timeline smoother passed its input through unchanged
        let normalized = resolve_overlaps(&merged);
        let stable = filter_unstable_chords(&normalized, &self.config);
        stats.final_chords = stable.len();

        log::info!(
            "Pipeline produced {} stable chords in {} {}",
            stable.len(),
            crate::events::note_name(key.key_pc),
            key.mode.name()
        );
        log::debug!("Pipeline stats: {:?}", stats);

        InferenceResult {
            chords: stable,
            key,
            stats,
        }
    }
}

impl Default for ChordInferenceEngine {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}
