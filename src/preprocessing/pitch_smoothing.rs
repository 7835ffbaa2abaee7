//! Temporal pitch smoothing
//!
//! Median-filters the confidence sequence of each pitch class to suppress
//! isolated spikes and dropouts in transcriber output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::InferenceConfig;
use crate::events::NoteEvent;

/// Apply a centered median filter to each pitch class's confidence track.
///
/// Notes are grouped by pitch class and sorted by onset; the confidence
/// sequence of each group is median-filtered with the configured window.
/// Groups with a single note, or fewer notes than the window, pass through
/// unchanged. Timing and pitch are preserved; only confidence changes.
///
/// The output is ordered by pitch class, then onset.
pub fn smooth_pitch_activity(notes: &[NoteEvent], config: &InferenceConfig) -> Vec<NoteEvent> {
    if notes.is_empty() {
        return Vec::new();
    }

    log::debug!(
        "Smoothing {} notes with median window {}",
        notes.len(),
        config.median_filter_size
    );

    let mut groups: BTreeMap<u8, Vec<NoteEvent>> = BTreeMap::new();
    for note in notes {
        groups.entry(note.pitch_class()).or_default().push(*note);
    }

    let mut smoothed = Vec::with_capacity(notes.len());
    for (_pc, mut group) in groups {
        if group.len() <= 1 || group.len() < config.median_filter_size {
            smoothed.extend(group);
            continue;
        }

        group.sort_by(|a, b| a.onset.partial_cmp(&b.onset).unwrap_or(Ordering::Equal));

        let confidences: Vec<f32> = group.iter().map(|n| n.confidence).collect();
        let filtered = median_filter(&confidences, config.median_filter_size);

        for (note, confidence) in group.into_iter().zip(filtered) {
            smoothed.push(NoteEvent { confidence, ..note });
        }
    }

    smoothed
}

/// Centered median filter with edge replication.
///
/// Each output sample is the median of the `window`-sized neighborhood
/// around it; indices past either end repeat the edge value, so the window
/// length stays constant.
fn median_filter(values: &[f32], window: usize) -> Vec<f32> {
    let half = (window / 2) as isize;
    let last = values.len() as isize - 1;

    (0..values.len() as isize)
        .map(|i| {
            let mut neighborhood: Vec<f32> = (i - half..=i + half)
                .map(|j| values[j.clamp(0, last) as usize])
                .collect();
            neighborhood.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            neighborhood[neighborhood.len() / 2]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(onset: f32, pitch: u8, confidence: f32) -> NoteEvent {
        NoteEvent {
            onset,
            offset: onset + 0.5,
            pitch,
            confidence,
        }
    }

    #[test]
    fn test_median_filter_suppresses_outlier() {
        let filtered = median_filter(&[0.8, 0.2, 0.8], 3);
        assert_eq!(filtered, vec![0.8, 0.8, 0.8]);
    }

    #[test]
    fn test_median_filter_spike_train() {
        let filtered = median_filter(&[0.1, 0.9, 0.1, 0.9, 0.1], 3);
        assert_eq!(filtered, vec![0.1, 0.1, 0.9, 0.1, 0.1]);
    }

    #[test]
    fn test_smoothing_replaces_outlier_confidence() {
        let config = InferenceConfig::default();
        let notes = vec![
            note(0.0, 60, 0.8),
            note(1.0, 60, 0.2),
            note(2.0, 60, 0.8),
        ];

        let smoothed = smooth_pitch_activity(&notes, &config);
        assert_eq!(smoothed.len(), 3);
        for n in &smoothed {
            assert!((n.confidence - 0.8).abs() < 1e-6);
        }
    }

    #[test]
    fn test_small_groups_pass_through() {
        let config = InferenceConfig::default();
        let notes = vec![note(0.0, 60, 0.9), note(1.0, 60, 0.1), note(0.0, 64, 0.5)];

        let smoothed = smooth_pitch_activity(&notes, &config);
        assert_eq!(smoothed.len(), 3);
        // Two notes per pitch class is below the window size of 3
        let confidences: Vec<f32> = smoothed.iter().map(|n| n.confidence).collect();
        assert!(confidences.contains(&0.9));
        assert!(confidences.contains(&0.1));
        assert!(confidences.contains(&0.5));
    }

    #[test]
    fn test_timing_and_pitch_preserved() {
        let config = InferenceConfig::default();
        let notes = vec![
            note(0.0, 60, 0.9),
            note(1.0, 72, 0.1),
            note(2.0, 60, 0.9),
            note(3.0, 72, 0.9),
        ];

        let smoothed = smooth_pitch_activity(&notes, &config);
        assert_eq!(smoothed.len(), 4);
        // All four share pitch class 0, so the group is filtered together
        let onsets: Vec<f32> = smoothed.iter().map(|n| n.onset).collect();
        assert_eq!(onsets, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(smoothed[1].pitch, 72);
    }

    #[test]
    fn test_empty_input() {
        let config = InferenceConfig::default();
        assert!(smooth_pitch_activity(&[], &config).is_empty());
    }
}
