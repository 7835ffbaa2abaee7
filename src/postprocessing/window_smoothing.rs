//! Categorical chord-timeline smoothing
//!
//! Removes sub-second chord "flukes" by sampling the progression onto a
//! uniform grid, replacing each grid label with the most frequent label in
//! a window around it, and re-segmenting the result into runs.

use crate::config::InferenceConfig;
use crate::events::ChordEvent;

/// Timeline label for grid points not covered by any chord.
const NO_CHORD: &str = "N";

/// Smooth a chord progression with a categorical majority filter.
///
/// The progression is sampled onto a grid at the configured resolution;
/// each grid point takes the symbol of the first chord covering it, or a
/// silence label. Every label is then replaced by the most frequent
/// non-silence label in a window around it (ties go to the label seen
/// first; all-silent windows stay silent). Maximal runs of one label
/// become the output chords, reusing the metadata of the first input chord
/// carrying that symbol.
///
/// Progressions of two chords or fewer, with no time span, or shorter than
/// the filter window are returned unchanged.
pub fn smooth_chord_progression(
    chords: &[ChordEvent],
    config: &InferenceConfig,
) -> Vec<ChordEvent> {
    if chords.len() <= 2 {
        return chords.to_vec();
    }

    let start_time = chords.iter().map(|c| c.onset).fold(f32::INFINITY, f32::min);
    let end_time = chords
        .iter()
        .map(|c| c.offset)
        .fold(f32::NEG_INFINITY, f32::max);
    if end_time - start_time <= 0.0 {
        return chords.to_vec();
    }

    let resolution = config.timeline_resolution;

    // Uniform grid over the progression span, end point included
    let mut grid = Vec::new();
    let mut k = 0usize;
    loop {
        let t = start_time + k as f32 * resolution;
        if t > end_time {
            break;
        }
        grid.push(t);
        k += 1;
    }

    let labels: Vec<&str> = grid
        .iter()
        .map(|&t| {
            chords
                .iter()
                .find(|c| c.onset <= t && t < c.offset)
                .map(|c| c.symbol.as_str())
                .unwrap_or(NO_CHORD)
        })
        .collect();

    let window = ((config.smoothing_window / resolution).round() as usize).max(3);
    if labels.len() < window {
        return chords.to_vec();
    }

    let smoothed: Vec<&str> = (0..labels.len())
        .map(|i| {
            let window_start = i.saturating_sub(window / 2);
            let window_end = (window_start + window).min(labels.len());
            majority_label(&labels[window_start..window_end])
        })
        .collect();

    // Re-segment into maximal runs of one label
    let mut result = Vec::new();
    let mut run_start = 0usize;
    for i in 1..=smoothed.len() {
        if i < smoothed.len() && smoothed[i] == smoothed[run_start] {
            continue;
        }

        let label = smoothed[run_start];
        if label != NO_CHORD {
            if let Some(original) = chords.iter().find(|c| c.symbol == label) {
                let offset = if i == smoothed.len() {
                    end_time
                } else {
                    grid[i - 1] + resolution
                };
                result.push(ChordEvent {
                    onset: grid[run_start],
                    offset,
                    symbol: original.symbol.clone(),
                    confidence: original.confidence,
                    pitch_classes: original.pitch_classes.clone(),
                    root_pc: original.root_pc,
                    quality: original.quality,
                });
            }
        }
        run_start = i;
    }

    log::info!(
        "Chord smoothing: {} -> {} chords",
        chords.len(),
        result.len()
    );
    result
}

/// Most frequent non-silence label in a window; ties resolve to the label
/// encountered first. A window of pure silence stays silent.
fn majority_label<'a>(window: &[&'a str]) -> &'a str {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &label in window {
        if label == NO_CHORD {
            continue;
        }
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (label, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label).unwrap_or(NO_CHORD)
}
