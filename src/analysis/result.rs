//! Inference result types

use serde::{Deserialize, Serialize};

use crate::events::ChordEvent;
use crate::features::key::KeyEstimate;

/// Complete chord inference result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Final stable chords, onset-sorted and non-overlapping
    pub chords: Vec<ChordEvent>,

    /// Global key estimate
    pub key: KeyEstimate,

    /// Per-stage diagnostic counts for this run
    pub stats: PipelineStats,
}

/// Note and chord counts at each stage boundary of one pipeline run.
///
/// Diagnostics only, informational rather than contractual. A fresh value
/// is built per run and returned with the result, so nothing leaks between
/// runs sharing an engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Note events received
    pub input_notes: usize,

    /// Notes after pitch smoothing
    pub smoothed_notes: usize,

    /// Notes surviving the duration filter
    pub duration_filtered_notes: usize,

    /// Notes surviving the key-aware filter
    pub key_filtered_notes: usize,

    /// Chords detected in raw windows
    pub raw_chords: usize,

    /// Chords surviving the harmony filter
    pub harmony_filtered_chords: usize,

    /// Chords after timeline smoothing
    pub smoothed_chords: usize,

    /// Chords after merging
    pub merged_chords: usize,

    /// Final stable chords
    pub final_chords: usize,
}
