//! Key estimation modules
//!
//! Estimate a single global key using:
//! - Krumhansl-Schmuckler profiles (24 keys)
//! - Pearson correlation against a weighted pitch-class histogram

pub mod detector;
pub mod profiles;

pub use detector::estimate_key;
pub use profiles::KeyProfiles;

use serde::{Deserialize, Serialize};

use crate::events::note_name;

/// Major/minor mode of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Major mode
    Major,
    /// Minor mode (natural minor scale)
    Minor,
}

impl Mode {
    /// Lowercase name used at the output boundary ("major"/"minor").
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }

    /// Scale intervals of the mode in semitones above the tonic.
    pub fn scale_intervals(&self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }
}

/// Key estimation result.
///
/// Computed once per pipeline run and treated as read-only configuration
/// by every later stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Tonic pitch class (0 = C ... 11 = B)
    pub key_pc: u8,

    /// Major or minor mode
    pub mode: Mode,

    /// Estimation confidence (0.0-1.0)
    pub confidence: f32,
}

impl KeyEstimate {
    /// Neutral default for degenerate input: C major with zero confidence.
    pub fn neutral() -> Self {
        Self {
            key_pc: 0,
            mode: Mode::Major,
            confidence: 0.0,
        }
    }

    /// The 7 diatonic pitch classes of the estimated key.
    pub fn scale_pitch_classes(&self) -> [u8; 7] {
        let mut scale = self.mode.scale_intervals();
        for pc in scale.iter_mut() {
            *pc = (*pc + self.key_pc) % 12;
        }
        scale
    }

    /// Whether a pitch class belongs to the key's diatonic scale.
    pub fn is_diatonic(&self, pitch_class: u8) -> bool {
        self.scale_pitch_classes().contains(&(pitch_class % 12))
    }

    /// Display name in musical notation (e.g. "C", "F#m").
    pub fn name(&self) -> String {
        match self.mode {
            Mode::Major => note_name(self.key_pc).to_string(),
            Mode::Minor => format!("{}m", note_name(self.key_pc)),
        }
    }
}
