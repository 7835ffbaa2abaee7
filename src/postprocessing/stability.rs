//! Output stability enforcement

use std::cmp::Ordering;

use crate::config::InferenceConfig;
use crate::events::ChordEvent;

/// Sort chords by onset and clip overlapping spans.
///
/// When two chords overlap, the earlier chord's offset is pulled back to
/// the later chord's onset, so the result is onset-sorted and pairwise
/// non-overlapping. Chords clipped below the minimum duration are left for
/// [`filter_unstable_chords`] to drop.
pub fn resolve_overlaps(chords: &[ChordEvent]) -> Vec<ChordEvent> {
    let mut sorted: Vec<ChordEvent> = chords.to_vec();
    sorted.sort_by(|a, b| a.onset.partial_cmp(&b.onset).unwrap_or(Ordering::Equal));

    for i in 1..sorted.len() {
        let next_onset = sorted[i].onset;
        let current = &mut sorted[i - 1];
        if current.offset > next_onset {
            current.offset = next_onset;
        }
    }
    sorted
}

/// Drop chords shorter than the configured minimum duration.
pub fn filter_unstable_chords(chords: &[ChordEvent], config: &InferenceConfig) -> Vec<ChordEvent> {
    let stable: Vec<ChordEvent> = chords
        .iter()
        .filter(|c| c.duration() >= config.min_chord_duration)
        .cloned()
        .collect();

    let removed = chords.len() - stable.len();
    if removed > 0 {
        log::info!("Stability filtering removed {} short chords", removed);
    }
    stable
}
