//! Note and chord event types
//!
//! Immutable value types flowing through the inference pipeline. Every
//! stage consumes a list of events and emits a new list; events are never
//! mutated in place.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Note names indexed by pitch class (0 = C ... 11 = B), sharps only.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of a pitch class (e.g. 0 -> "C", 10 -> "A#").
pub fn note_name(pitch_class: u8) -> &'static str {
    NOTE_NAMES[(pitch_class % 12) as usize]
}

/// A detected note with timing and pitch information.
///
/// Produced by an external transcription model. `confidence` is nominally
/// in [0, 1] and is taken as-is from the transcriber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Start time in seconds
    pub onset: f32,

    /// End time in seconds (greater than `onset`)
    pub offset: f32,

    /// MIDI pitch number (0-127)
    pub pitch: u8,

    /// Detection confidence (0.0-1.0)
    pub confidence: f32,
}

impl NoteEvent {
    /// Note length in seconds.
    pub fn duration(&self) -> f32 {
        self.offset - self.onset
    }

    /// Octave-independent pitch class (0 = C ... 11 = B).
    pub fn pitch_class(&self) -> u8 {
        self.pitch % 12
    }
}

/// Chord quality identified from a set of pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    /// Major triad
    Major,
    /// Minor triad
    Minor,
    /// Dominant seventh
    Dominant7,
    /// Minor seventh
    Minor7,
    /// Major seventh
    Major7,
    /// Minor eleventh
    Minor11,
    /// Major triad with added ninth
    Add9,
    /// Major sixth
    Sixth,
    /// Diminished triad
    Diminished,
    /// Augmented triad
    Augmented,
    /// Suspended second
    Sus2,
    /// Suspended fourth
    Sus4,
    /// Unresolved low-confidence guess
    Unknown,
}

impl ChordQuality {
    /// Symbol suffix appended to the root name (e.g. the "m7" in "Am7").
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor11 => "m11",
            ChordQuality::Add9 => "add9",
            ChordQuality::Sixth => "6",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Unknown => "?",
        }
    }

    /// Whether this quality belongs to the functional-harmony whitelist.
    ///
    /// Functional qualities are stylistically expected and exempt from the
    /// strictest plausibility scrutiny; only [`ChordQuality::Unknown`]
    /// falls outside the whitelist.
    pub fn is_functional(&self) -> bool {
        !matches!(self, ChordQuality::Unknown)
    }
}

/// A detected chord with timing and musical information.
///
/// Created fresh by each pipeline stage that transforms chords; downstream
/// stages build new events from upstream ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEvent {
    /// Start time in seconds
    pub onset: f32,

    /// End time in seconds (greater than `onset`)
    pub offset: f32,

    /// Rendered symbol, e.g. "C", "Am7", or "F#?" for an unresolved guess
    pub symbol: String,

    /// Detection confidence (0.0-1.0)
    pub confidence: f32,

    /// Pitch classes present in the chord (never empty)
    pub pitch_classes: BTreeSet<u8>,

    /// Root pitch class, always a member of `pitch_classes`
    pub root_pc: u8,

    /// Identified quality
    pub quality: ChordQuality,
}

impl ChordEvent {
    /// Chord length in seconds.
    pub fn duration(&self) -> f32 {
        self.offset - self.onset
    }
}
