//! Windowed chord detection modules
//!
//! Slide fixed analysis windows over the note timeline, select the
//! significant pitch classes of each window, and identify the best
//! matching chord shape.

pub mod identify;
pub mod windows;

pub use identify::{identify_chord, ChordShape, ChordShapeTable, IdentifiedChord};
pub use windows::detect_chords_in_windows;
