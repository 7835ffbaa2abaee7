//! Duration and key-aware note filters

use crate::config::InferenceConfig;
use crate::events::NoteEvent;
use crate::features::key::KeyEstimate;

/// Drop notes shorter than the configured minimum duration.
pub fn filter_short_notes(notes: &[NoteEvent], config: &InferenceConfig) -> Vec<NoteEvent> {
    let kept: Vec<NoteEvent> = notes
        .iter()
        .filter(|n| n.duration() >= config.min_note_duration)
        .copied()
        .collect();

    let dropped = notes.len() - kept.len();
    if dropped > 0 {
        log::info!(
            "Dropped {} notes shorter than {}s",
            dropped,
            config.min_note_duration
        );
    }
    kept
}

/// Drop weak out-of-key notes once a key is known.
///
/// Returns the input unchanged when the key estimate is too uncertain to
/// filter on. Diatonic notes always survive; chromatic notes need at least
/// the configured confidence.
pub fn filter_out_of_key_notes(
    notes: &[NoteEvent],
    key: &KeyEstimate,
    config: &InferenceConfig,
) -> Vec<NoteEvent> {
    if key.confidence < config.key_filter_min_confidence {
        log::info!(
            "Key confidence {:.3} too low, skipping key filtering",
            key.confidence
        );
        return notes.to_vec();
    }

    let kept: Vec<NoteEvent> = notes
        .iter()
        .filter(|note| {
            key.is_diatonic(note.pitch_class())
                || note.confidence >= config.out_of_key_note_confidence
        })
        .copied()
        .collect();

    let dropped = notes.len() - kept.len();
    if dropped > 0 {
        log::info!(
            "Key filtering in {}: dropped {} weak out-of-key notes",
            key.name(),
            dropped
        );
    }
    kept
}
