//! Key detection algorithm
//!
//! Correlates a duration- and confidence-weighted pitch-class histogram
//! against rotated Krumhansl-Schmuckler profiles to estimate the global
//! key of a note list.

use super::{KeyEstimate, KeyProfiles, Mode};
use crate::config::InferenceConfig;
use crate::events::NoteEvent;

/// Estimate the global key of a note list.
///
/// Builds a 12-bin histogram where each note adds
/// `duration * confidence` to its pitch class, normalizes it to sum to 1,
/// and picks the key whose rotated profile has the highest Pearson
/// correlation with the histogram. Roots are tried in ascending order with
/// major before minor at each root, and only a strictly better correlation
/// replaces the current best, so ties resolve to the lower root and major
/// mode.
///
/// Notes shorter than the minimum duration are excluded from the
/// histogram; if that leaves nothing, the full list is used instead.
/// Degenerate input (no notes, zero total weight) yields the neutral
/// C major estimate with zero confidence.
pub fn estimate_key(
    notes: &[NoteEvent],
    profiles: &KeyProfiles,
    config: &InferenceConfig,
) -> KeyEstimate {
    if notes.is_empty() {
        return KeyEstimate::neutral();
    }

    // Prefer notes long enough to carry tonal information
    let long_enough: Vec<&NoteEvent> = notes
        .iter()
        .filter(|n| n.duration() >= config.min_note_duration)
        .collect();
    let considered: Vec<&NoteEvent> = if long_enough.is_empty() {
        notes.iter().collect()
    } else {
        long_enough
    };

    let mut histogram = [0.0f32; 12];
    for note in &considered {
        histogram[note.pitch_class() as usize] += note.duration() * note.confidence;
    }

    let total: f32 = histogram.iter().sum();
    if total <= 0.0 {
        return KeyEstimate::neutral();
    }
    for weight in histogram.iter_mut() {
        *weight /= total;
    }

    log::debug!("Pitch class distribution: {:?}", histogram);

    let mut best_correlation = -1.0f32;
    let mut best_key_pc = 0u8;
    let mut best_mode = Mode::Major;

    for root in 0..12u8 {
        for mode in [Mode::Major, Mode::Minor] {
            let profile = match mode {
                Mode::Major => &profiles.major,
                Mode::Minor => &profiles.minor,
            };
            let correlation = pearson(&histogram, &KeyProfiles::rotated(profile, root));
            if correlation > best_correlation {
                best_correlation = correlation;
                best_key_pc = root;
                best_mode = mode;
            }
        }
    }

    let estimate = KeyEstimate {
        key_pc: best_key_pc,
        mode: best_mode,
        confidence: best_correlation.clamp(0.0, 1.0),
    };

    log::info!(
        "Estimated key: {} {} (confidence: {:.3})",
        crate::events::note_name(estimate.key_pc),
        estimate.mode.name(),
        estimate.confidence
    );

    estimate
}

/// Pearson correlation between two 12-bin distributions.
///
/// A zero-variance distribution on either side yields 0.0 rather than an
/// undefined value.
fn pearson(a: &[f32; 12], b: &[f32; 12]) -> f32 {
    let n = 12.0f32;
    let mean_a = a.iter().sum::<f32>() / n;
    let mean_b = b.iter().sum::<f32>() / n;

    let mut covariance = 0.0f32;
    let mut variance_a = 0.0f32;
    let mut variance_b = 0.0f32;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        let da = va - mean_a;
        let db = vb - mean_b;
        covariance += da * db;
        variance_a += da * da;
        variance_b += db * db;
    }

    let denominator = (variance_a * variance_b).sqrt();
    if denominator <= f32::EPSILON {
        0.0
    } else {
        covariance / denominator
    }
}
