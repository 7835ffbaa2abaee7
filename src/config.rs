//! Configuration parameters for chord inference

/// Chord inference configuration parameters
///
/// Every window size and threshold used by the pipeline. The value is
/// immutable once handed to an engine; build a new engine to change it.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    // Pitch smoothing
    /// Median filter window applied per pitch class, in notes (odd, default: 3)
    pub median_filter_size: usize,

    // Note filtering
    /// Minimum note duration in seconds (default: 0.06)
    pub min_note_duration: f32,

    /// Minimum key confidence before out-of-key notes are filtered (default: 0.5)
    pub key_filter_min_confidence: f32,

    /// Confidence an out-of-key note needs to survive filtering (default: 0.15)
    pub out_of_key_note_confidence: f32,

    // Window analysis
    /// Sliding analysis window length in seconds (default: 2.0)
    pub window_size: f32,

    /// Overlap between consecutive windows in seconds (default: 0.2)
    pub window_overlap: f32,

    /// Minimum qualifying notes for a window to yield a chord (default: 2)
    pub min_notes_per_chord: usize,

    /// Maximum pitch classes kept per chord (default: 6)
    pub max_chord_notes: usize,

    /// Pitch classes below this fraction of the window maximum are
    /// discarded (default: 0.2)
    pub significance_ratio: f32,

    /// Weight window histograms by note/window overlap duration (default: true)
    pub confidence_weight_duration: bool,

    // Harmony filtering
    /// Key confidence below which every chord root counts as in-key
    /// (default: 0.6)
    pub harmony_key_confidence: f32,

    /// Confidence below which an unresolved chord symbol is suspect
    /// (default: 0.6)
    pub hallucination_confidence: f32,

    /// Duration below which an unresolved chord symbol is suspect, in
    /// seconds (default: 1.0)
    pub hallucination_duration: f32,

    /// Confidence an out-of-key chord needs to survive (default: 0.7)
    pub out_of_key_confidence: f32,

    /// Duration an out-of-key chord needs to survive, in seconds
    /// (default: 1.0)
    pub out_of_key_duration: f32,

    /// Relaxed confidence bar for chromatic m11 voicings (default: 0.6)
    pub m11_confidence: f32,

    /// Confidence that keeps an in-key non-functional chord (default: 0.3)
    pub in_key_confidence: f32,

    /// Duration that keeps an in-key non-functional chord, in seconds
    /// (default: 0.6)
    pub in_key_duration: f32,

    // Chord smoothing
    /// Timeline sampling resolution in seconds (default: 0.5)
    pub timeline_resolution: f32,

    /// Span of the categorical smoothing filter in seconds (default: 1.0)
    pub smoothing_window: f32,

    // Stability
    /// Merge same chords separated by at most this many seconds
    /// (default: 0.4)
    pub merge_threshold: f32,

    /// Minimum duration of an output chord in seconds (default: 0.3)
    pub min_chord_duration: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            median_filter_size: 3,
            min_note_duration: 0.06,
            key_filter_min_confidence: 0.5,
            out_of_key_note_confidence: 0.15,
            window_size: 2.0,
            window_overlap: 0.2,
            min_notes_per_chord: 2,
            max_chord_notes: 6,
            significance_ratio: 0.2,
            confidence_weight_duration: true,
            harmony_key_confidence: 0.6,
            hallucination_confidence: 0.6,
            hallucination_duration: 1.0,
            out_of_key_confidence: 0.7,
            out_of_key_duration: 1.0,
            m11_confidence: 0.6,
            in_key_confidence: 0.3,
            in_key_duration: 0.6,
            timeline_resolution: 0.5,
            smoothing_window: 1.0,
            merge_threshold: 0.4,
            min_chord_duration: 0.3,
        }
    }
}
