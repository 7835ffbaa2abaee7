//! Musical feature extraction modules
//!
//! This module contains the analysis algorithms of the pipeline:
//! - Global key estimation from pitch-class statistics
//! - Windowed chord detection and shape identification

pub mod chords;
pub mod key;
