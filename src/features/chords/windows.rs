//! Sliding-window chord detection
//!
//! Splits the note timeline into fixed overlapping windows, builds a
//! weighted pitch-class histogram per window, and identifies a chord from
//! the significant pitch classes.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::identify::{identify_chord, ChordShapeTable};
use crate::config::InferenceConfig;
use crate::events::{ChordEvent, NoteEvent};
use crate::features::key::KeyEstimate;

/// Detect raw chords by sliding fixed windows over the note timeline.
///
/// Windows advance by `window_size - window_overlap` from the earliest
/// onset to the latest offset. A note belongs to a window when its span
/// intersects it. Windows with too few notes, or too few significant pitch
/// classes, produce no chord — gaps in the output are expected.
pub fn detect_chords_in_windows(
    notes: &[NoteEvent],
    key: &KeyEstimate,
    table: &ChordShapeTable,
    config: &InferenceConfig,
) -> Vec<ChordEvent> {
    if notes.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<NoteEvent> = notes.to_vec();
    sorted.sort_by(|a, b| a.onset.partial_cmp(&b.onset).unwrap_or(Ordering::Equal));

    let start_time = sorted[0].onset;
    let end_time = sorted
        .iter()
        .map(|n| n.offset)
        .fold(f32::NEG_INFINITY, f32::max);

    // The hop must stay positive for the sweep to terminate
    let hop = (config.window_size - config.window_overlap).max(f32::EPSILON);

    let mut chords = Vec::new();
    let mut window_start = start_time;
    while window_start < end_time {
        let window_end = window_start + config.window_size;

        let window_notes: Vec<&NoteEvent> = sorted
            .iter()
            .filter(|n| n.onset < window_end && n.offset > window_start)
            .collect();

        if window_notes.len() >= config.min_notes_per_chord {
            if let Some(chord) =
                analyze_window(&window_notes, window_start, window_end, key, table, config)
            {
                chords.push(chord);
            }
        }

        window_start += hop;
    }

    log::info!(
        "Detected {} raw chords from {} note events",
        chords.len(),
        notes.len()
    );
    chords
}

/// Analyze one window: weighted histogram, significant pitch classes,
/// identification.
fn analyze_window(
    notes: &[&NoteEvent],
    window_start: f32,
    window_end: f32,
    key: &KeyEstimate,
    table: &ChordShapeTable,
    config: &InferenceConfig,
) -> Option<ChordEvent> {
    let mut weights: BTreeMap<u8, f32> = BTreeMap::new();
    for note in notes {
        let overlap = (note.offset.min(window_end) - note.onset.max(window_start)).max(0.0);
        let weight = if config.confidence_weight_duration {
            note.confidence * overlap
        } else {
            note.confidence
        };
        *weights.entry(note.pitch_class()).or_insert(0.0) += weight;
    }

    let max_weight = weights.values().fold(0.0f32, |acc, &w| acc.max(w));
    if max_weight <= 0.0 {
        return None;
    }

    // Strongest first; the stable sort leaves equal weights in ascending
    // pitch-class order
    let mut ranked: Vec<(u8, f32)> = weights.iter().map(|(&pc, &w)| (pc, w)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let threshold = max_weight * config.significance_ratio;
    let significant: Vec<u8> = ranked
        .iter()
        .filter(|(_, w)| *w >= threshold)
        .map(|(pc, _)| *pc)
        .take(config.max_chord_notes)
        .collect();

    if significant.len() < config.min_notes_per_chord {
        return None;
    }

    let identified = identify_chord(&significant, &weights, key, table);

    let total_weight: f32 = weights.values().sum();
    let confidence = (total_weight / notes.len() as f32).min(1.0);

    Some(ChordEvent {
        onset: window_start,
        offset: window_end,
        symbol: identified.symbol,
        confidence,
        pitch_classes: significant.iter().copied().collect(),
        root_pc: identified.root_pc,
        quality: identified.quality,
    })
}
