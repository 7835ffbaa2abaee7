//! Chord shape identification
//!
//! Scores every candidate root in a set of significant pitch classes
//! against a fixed table of chord shapes, preferring strong bass roots and
//! shapes that agree with the estimated key.

use std::collections::{BTreeMap, BTreeSet};

use crate::events::{note_name, ChordQuality};
use crate::features::key::{KeyEstimate, Mode};

/// Key confidence below which scale membership is not held against a root.
const KEY_TRUST_THRESHOLD: f32 = 0.5;

/// A chord shape: the intervals it requires above the root and the base
/// score awarded when those intervals are present.
#[derive(Debug, Clone)]
pub struct ChordShape {
    /// Required intervals from the root in semitones (always contains 0)
    pub intervals: &'static [u8],

    /// Quality assigned when this shape wins
    pub quality: ChordQuality,

    /// Base match score; partial fallback shapes score lowest
    pub base_score: f32,
}

/// Ordered chord shape table.
///
/// Order matters: earlier entries win ties. Triads and seventh chords come
/// first, partial fallback shapes (bare third, bare fifth) last.
#[derive(Debug, Clone)]
pub struct ChordShapeTable {
    shapes: Vec<ChordShape>,
}

impl ChordShapeTable {
    /// Build the standard shape table.
    pub fn new() -> Self {
        let shapes = vec![
            ChordShape {
                intervals: &[0, 4, 7],
                quality: ChordQuality::Major,
                base_score: 10.0,
            },
            ChordShape {
                intervals: &[0, 3, 7],
                quality: ChordQuality::Minor,
                base_score: 10.0,
            },
            ChordShape {
                intervals: &[0, 4, 7, 10],
                quality: ChordQuality::Dominant7,
                base_score: 12.0,
            },
            ChordShape {
                intervals: &[0, 3, 7, 10],
                quality: ChordQuality::Minor7,
                base_score: 12.0,
            },
            ChordShape {
                intervals: &[0, 4, 7, 11],
                quality: ChordQuality::Major7,
                base_score: 12.0,
            },
            ChordShape {
                intervals: &[0, 2, 3, 5, 7, 10],
                quality: ChordQuality::Minor11,
                base_score: 14.0,
            },
            ChordShape {
                intervals: &[0, 2, 4, 7],
                quality: ChordQuality::Add9,
                base_score: 11.0,
            },
            ChordShape {
                intervals: &[0, 4, 7, 9],
                quality: ChordQuality::Sixth,
                base_score: 11.0,
            },
            ChordShape {
                intervals: &[0, 3, 6],
                quality: ChordQuality::Diminished,
                base_score: 9.0,
            },
            ChordShape {
                intervals: &[0, 4, 8],
                quality: ChordQuality::Augmented,
                base_score: 9.0,
            },
            ChordShape {
                intervals: &[0, 2, 7],
                quality: ChordQuality::Sus2,
                base_score: 8.0,
            },
            ChordShape {
                intervals: &[0, 5, 7],
                quality: ChordQuality::Sus4,
                base_score: 8.0,
            },
            // Partial fallbacks for sparse windows
            ChordShape {
                intervals: &[0, 4],
                quality: ChordQuality::Major,
                base_score: 6.0,
            },
            ChordShape {
                intervals: &[0, 3],
                quality: ChordQuality::Minor,
                base_score: 6.0,
            },
            ChordShape {
                intervals: &[0, 7],
                quality: ChordQuality::Major,
                base_score: 4.0,
            },
        ];
        Self { shapes }
    }

    /// Shapes in scoring order.
    pub fn shapes(&self) -> &[ChordShape] {
        &self.shapes
    }
}

impl Default for ChordShapeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Chord identification outcome: symbol, quality and the chosen root.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedChord {
    /// Rendered symbol, e.g. "Am7", or "F#?" for an unresolved guess
    pub symbol: String,

    /// Identified quality (`Unknown` for the fallback guess)
    pub quality: ChordQuality,

    /// Root pitch class the symbol is built on
    pub root_pc: u8,
}

/// Identify the best chord for a set of significant pitch classes.
///
/// Tries every pitch class as a candidate root (ascending) against every
/// shape in table order, keeping the single best-scoring pair; only a
/// strictly better score replaces the current best, so ties resolve to the
/// lowest root and the earliest table entry. Scoring favors exact interval
/// matches, strong and low roots, in-scale roots, and the tonic of the
/// estimated key. When no shape matches, the lowest pitch class becomes an
/// unresolved `"<root>?"` guess.
///
/// `weights` holds the window histogram weight of each pitch class.
pub fn identify_chord(
    pitch_classes: &[u8],
    weights: &BTreeMap<u8, f32>,
    key: &KeyEstimate,
    table: &ChordShapeTable,
) -> IdentifiedChord {
    if pitch_classes.is_empty() {
        return IdentifiedChord {
            symbol: "N".to_string(),
            quality: ChordQuality::Unknown,
            root_pc: 0,
        };
    }

    let mut sorted_pcs: Vec<u8> = pitch_classes.to_vec();
    sorted_pcs.sort_unstable();
    let lowest = sorted_pcs[0];

    let max_weight = sorted_pcs
        .iter()
        .filter_map(|pc| weights.get(pc))
        .fold(0.0f32, |acc, &w| acc.max(w));

    let mut best_score = 0.0f32;
    let mut best: Option<IdentifiedChord> = None;

    for &root in &sorted_pcs {
        let intervals: BTreeSet<u8> = sorted_pcs.iter().map(|pc| (pc + 12 - root) % 12).collect();

        let mut root_strength = 1.0f32;
        if max_weight > 0.0 {
            let root_weight = weights.get(&root).copied().unwrap_or(0.0);
            if root_weight > 0.0 {
                root_strength = 1.0 + 0.8 * (root_weight / max_weight);
            }
        }
        // Bass notes make the most convincing roots
        if root == lowest {
            root_strength *= 1.3;
        }

        for shape in table.shapes() {
            if !shape.intervals.iter().all(|i| intervals.contains(i)) {
                continue;
            }

            let match_ratio = shape.intervals.len() as f32 / intervals.len() as f32;
            let mut score = shape.base_score * match_ratio;

            if intervals.len() == shape.intervals.len() {
                // Exact match, no extra tones
                score *= 1.5;
            }

            score *= root_strength;

            if root_in_key(root, key) {
                score *= 1.2;
            }
            if root == key.key_pc && quality_matches_mode(shape.quality, key.mode) {
                // Tonic chord of the estimated key
                score *= 1.4;
            }

            if score > best_score {
                best_score = score;
                best = Some(IdentifiedChord {
                    symbol: format!("{}{}", note_name(root), shape.quality.suffix()),
                    quality: shape.quality,
                    root_pc: root,
                });
            }
        }
    }

    best.unwrap_or_else(|| IdentifiedChord {
        symbol: format!(
            "{}{}",
            note_name(lowest),
            ChordQuality::Unknown.suffix()
        ),
        quality: ChordQuality::Unknown,
        root_pc: lowest,
    })
}

/// Scale membership only counts once the key itself is trustworthy.
fn root_in_key(pitch_class: u8, key: &KeyEstimate) -> bool {
    key.confidence < KEY_TRUST_THRESHOLD || key.is_diatonic(pitch_class)
}

fn quality_matches_mode(quality: ChordQuality, mode: Mode) -> bool {
    matches!(
        (quality, mode),
        (ChordQuality::Major, Mode::Major) | (ChordQuality::Minor, Mode::Minor)
    )
}
