//! Adjacent chord merging

use crate::config::InferenceConfig;
use crate::events::ChordEvent;

/// Merge adjacent chords with matching identity.
///
/// A single left-to-right pass with a running accumulator: the next chord
/// is folded into the current one when both carry the same symbol and are
/// within the merge gap or overlapping, or when they share root and
/// quality while overlapping. A merge keeps the first chord's identity,
/// extends the span, averages the confidence, and unions the pitch
/// classes. Non-merging chords are flushed as-is.
pub fn merge_similar_chords(chords: &[ChordEvent], config: &InferenceConfig) -> Vec<ChordEvent> {
    if chords.len() <= 1 {
        return chords.to_vec();
    }

    let mut merged: Vec<ChordEvent> = Vec::with_capacity(chords.len());
    let mut current = chords[0].clone();

    for next in &chords[1..] {
        let gap = next.onset - current.offset;
        let overlapping = next.onset < current.offset;
        let same_symbol = current.symbol == next.symbol;
        let similar = current.root_pc == next.root_pc && current.quality == next.quality;

        let should_merge = (same_symbol && (gap <= config.merge_threshold || overlapping))
            || (similar && overlapping);

        if should_merge {
            current = ChordEvent {
                onset: current.onset,
                offset: current.offset.max(next.offset),
                symbol: current.symbol.clone(),
                confidence: (current.confidence + next.confidence) / 2.0,
                pitch_classes: current
                    .pitch_classes
                    .union(&next.pitch_classes)
                    .copied()
                    .collect(),
                root_pc: current.root_pc,
                quality: current.quality,
            };
        } else {
            merged.push(current);
            current = next.clone();
        }
    }
    merged.push(current);

    let merges = chords.len() - merged.len();
    if merges > 0 {
        log::info!("Merged {} similar adjacent chords", merges);
    }
    merged
}
