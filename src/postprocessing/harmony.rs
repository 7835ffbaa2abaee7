//! Harmony plausibility filtering
//!
//! Gates raw window chords on functional-harmony expectations: unresolved
//! symbols, out-of-key roots, and weak one-off chords are dropped unless
//! the evidence for them is strong.

use crate::config::InferenceConfig;
use crate::events::{ChordEvent, ChordQuality};
use crate::features::key::KeyEstimate;

/// Filter implausible chords from the raw detection list.
///
/// Decision order per chord:
/// 1. Unresolved symbols (`?`/`!`) with low confidence and short duration
///    are dropped outright.
/// 2. Functional chords rooted in the key are always kept.
/// 3. Out-of-key roots survive only with high confidence and duration
///    (m11 voicings get a relaxed confidence-only bar).
/// 4. Remaining in-key chords need moderate confidence, moderate duration,
///    or a repeated symbol elsewhere in the candidate list.
///
/// The root-in-key test passes unconditionally while the key estimate
/// itself is below the configured confidence.
pub fn filter_harmony(
    chords: &[ChordEvent],
    key: &KeyEstimate,
    config: &InferenceConfig,
) -> Vec<ChordEvent> {
    let mut kept = Vec::with_capacity(chords.len());
    let mut removed = 0usize;

    for chord in chords {
        if keep_chord(chord, chords, key, config) {
            kept.push(chord.clone());
        } else {
            removed += 1;
        }
    }

    if removed > 0 {
        log::info!("Harmony filtering removed {} implausible chords", removed);
    }
    kept
}

fn keep_chord(
    chord: &ChordEvent,
    all: &[ChordEvent],
    key: &KeyEstimate,
    config: &InferenceConfig,
) -> bool {
    // Unresolved symbols with weak evidence are transcription noise
    let unresolved = chord.symbol.contains('?') || chord.symbol.contains('!');
    if unresolved
        && chord.confidence < config.hallucination_confidence
        && chord.duration() < config.hallucination_duration
    {
        return false;
    }

    let root_in_key =
        key.confidence < config.harmony_key_confidence || key.is_diatonic(chord.root_pc);

    if chord.quality.is_functional() && root_in_key {
        return true;
    }

    if !root_in_key {
        // Chromatic chords need strong, sustained evidence; m11 voicings
        // are often deliberately chromatic and get a lower bar
        return (chord.confidence >= config.out_of_key_confidence
            && chord.duration() >= config.out_of_key_duration)
            || (chord.quality == ChordQuality::Minor11
                && chord.confidence >= config.m11_confidence);
    }

    chord.confidence >= config.in_key_confidence
        || chord.duration() >= config.in_key_duration
        || symbol_repeats(chord, all)
}

/// Whether the chord's symbol appears at least twice in the candidate list.
fn symbol_repeats(chord: &ChordEvent, all: &[ChordEvent]) -> bool {
    all.iter().filter(|c| c.symbol == chord.symbol).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::key::Mode;
    use std::collections::BTreeSet;

    fn chord(
        onset: f32,
        offset: f32,
        symbol: &str,
        confidence: f32,
        root_pc: u8,
        quality: ChordQuality,
    ) -> ChordEvent {
        let pitch_classes: BTreeSet<u8> = [root_pc].into_iter().collect();
        ChordEvent {
            onset,
            offset,
            symbol: symbol.to_string(),
            confidence,
            pitch_classes,
            root_pc,
            quality,
        }
    }

    fn confident_c_major() -> KeyEstimate {
        KeyEstimate {
            key_pc: 0,
            mode: Mode::Major,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_functional_in_key_chords_kept() {
        let config = InferenceConfig::default();
        let key = confident_c_major();
        let chords = vec![
            chord(0.0, 0.5, "C", 0.1, 0, ChordQuality::Major),
            chord(0.5, 1.0, "Dm", 0.1, 2, ChordQuality::Minor),
            chord(1.0, 1.5, "G7", 0.1, 7, ChordQuality::Dominant7),
        ];

        let kept = filter_harmony(&chords, &key, &config);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_hallucinated_chord_dropped() {
        let config = InferenceConfig::default();
        let key = confident_c_major();
        let chords = vec![chord(0.0, 0.5, "C?", 0.4, 0, ChordQuality::Unknown)];

        assert!(filter_harmony(&chords, &key, &config).is_empty());
    }

    #[test]
    fn test_long_unresolved_chord_survives() {
        let config = InferenceConfig::default();
        let key = confident_c_major();
        // Too long to be dismissed as a fluke, then kept by duration
        let chords = vec![chord(0.0, 1.5, "C?", 0.2, 0, ChordQuality::Unknown)];

        assert_eq!(filter_harmony(&chords, &key, &config).len(), 1);
    }

    #[test]
    fn test_weak_out_of_key_chord_dropped() {
        let config = InferenceConfig::default();
        let key = confident_c_major();
        let chords = vec![chord(0.0, 0.8, "C#", 0.5, 1, ChordQuality::Major)];

        assert!(filter_harmony(&chords, &key, &config).is_empty());
    }

    #[test]
    fn test_strong_out_of_key_chord_kept() {
        let config = InferenceConfig::default();
        let key = confident_c_major();
        let chords = vec![chord(0.0, 1.2, "C#", 0.8, 1, ChordQuality::Major)];

        assert_eq!(filter_harmony(&chords, &key, &config).len(), 1);
    }

    #[test]
    fn test_m11_gets_relaxed_bar() {
        let config = InferenceConfig::default();
        let key = confident_c_major();
        // Short and only moderately confident, but m11 is allowed chromatic
        let chords = vec![chord(0.0, 0.5, "C#m11", 0.65, 1, ChordQuality::Minor11)];

        assert_eq!(filter_harmony(&chords, &key, &config).len(), 1);
    }

    #[test]
    fn test_uncertain_key_disables_root_check() {
        let config = InferenceConfig::default();
        let key = KeyEstimate {
            key_pc: 0,
            mode: Mode::Major,
            confidence: 0.5,
        };
        // Out-of-key root, but the key itself is not trusted
        let chords = vec![chord(0.0, 0.5, "C#", 0.1, 1, ChordQuality::Major)];

        assert_eq!(filter_harmony(&chords, &key, &config).len(), 1);
    }

    #[test]
    fn test_repeated_symbol_rescues_weak_chord() {
        let config = InferenceConfig {
            in_key_confidence: 0.9,
            in_key_duration: 2.0,
            ..Default::default()
        };
        let key = confident_c_major();

        let lone = vec![chord(0.0, 0.5, "E?", 0.65, 4, ChordQuality::Unknown)];
        assert!(filter_harmony(&lone, &key, &config).is_empty());

        // The same weak chord survives once its symbol recurs
        let repeated = vec![
            chord(0.0, 0.5, "E?", 0.65, 4, ChordQuality::Unknown),
            chord(5.0, 5.5, "E?", 0.65, 4, ChordQuality::Unknown),
        ];
        assert_eq!(filter_harmony(&repeated, &key, &config).len(), 2);
    }
}
