//! Input/output boundary
//!
//! Converts between the upstream transcriber's raw JSON note records and
//! the crate's typed events, and renders results in the downstream
//! response shape. Individual malformed records are skipped with a
//! warning; they never abort a batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::ChordInferenceEngine;
use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::events::{note_name, ChordEvent, NoteEvent};
use crate::features::key::KeyEstimate;

/// One output chord in the response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordRecord {
    /// Start time in seconds
    pub onset: f32,

    /// End time in seconds
    pub offset: f32,

    /// Chord symbol, e.g. "Am7"
    pub chord: String,

    /// Detection confidence (0.0-1.0)
    pub confidence: f32,

    /// Sorted pitch classes present in the chord
    pub pitch_classes: Vec<u8>,
}

impl From<&ChordEvent> for ChordRecord {
    fn from(chord: &ChordEvent) -> Self {
        Self {
            onset: chord.onset,
            offset: chord.offset,
            chord: chord.symbol.clone(),
            confidence: chord.confidence,
            pitch_classes: chord.pitch_classes.iter().copied().collect(),
        }
    }
}

/// Key estimate in the response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// Key name ("C", "C#", ..., "B")
    pub key: String,

    /// "major" or "minor"
    pub mode: String,

    /// Estimation confidence (0.0-1.0)
    pub confidence: f32,
}

impl From<&KeyEstimate> for KeyRecord {
    fn from(key: &KeyEstimate) -> Self {
        Self {
            key: note_name(key.key_pc).to_string(),
            mode: key.mode.name().to_string(),
            confidence: key.confidence,
        }
    }
}

/// Parse a batch of raw note records, skipping malformed entries.
///
/// A record needs numeric `onset` and `offset`, an integer `pitch` in
/// 0-127, and a numeric `confidence`; `offset` must exceed `onset` and
/// every number must be finite. Anything else is logged and skipped.
pub fn notes_from_records(records: &[Value]) -> Vec<NoteEvent> {
    let mut notes = Vec::with_capacity(records.len());
    for record in records {
        match parse_note(record) {
            Ok(note) => notes.push(note),
            Err(reason) => log::warn!("Skipping invalid note event {}: {}", record, reason),
        }
    }
    notes
}

/// Parse a batch provided as a single JSON value.
///
/// # Errors
///
/// Returns [`InferenceError::InvalidInput`] when the value is not an
/// array. Malformed elements inside the array are skipped, not errors.
pub fn notes_from_json(value: &Value) -> Result<Vec<NoteEvent>, InferenceError> {
    let records = value.as_array().ok_or_else(|| {
        InferenceError::InvalidInput("note batch must be a JSON array".to_string())
    })?;
    Ok(notes_from_records(records))
}

fn parse_note(record: &Value) -> Result<NoteEvent, String> {
    let onset = number_field(record, "onset")?;
    let offset = number_field(record, "offset")?;
    let pitch = record
        .get("pitch")
        .and_then(Value::as_u64)
        .ok_or("missing or non-integer field 'pitch'")?;
    let confidence = number_field(record, "confidence")?;

    if pitch > 127 {
        return Err(format!("pitch {} out of MIDI range", pitch));
    }
    if offset <= onset {
        return Err(format!("offset {} not after onset {}", offset, onset));
    }

    Ok(NoteEvent {
        onset: onset as f32,
        offset: offset as f32,
        pitch: pitch as u8,
        confidence: confidence as f32,
    })
}

fn number_field(record: &Value, name: &str) -> Result<f64, String> {
    let value = record
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("missing or non-numeric field '{}'", name))?;
    if !value.is_finite() {
        return Err(format!("field '{}' is not finite", name));
    }
    Ok(value)
}

/// Run the full pipeline over raw note records.
///
/// The boundary equivalent of [`ChordInferenceEngine::infer`]: parse,
/// infer, render. Empty or fully-invalid input yields an empty chord list
/// and the neutral C major key.
pub fn process_note_records(
    records: &[Value],
    config: &InferenceConfig,
) -> (Vec<ChordRecord>, KeyRecord) {
    let notes = notes_from_records(records);
    if notes.is_empty() {
        log::warn!("No valid note events found");
        return (Vec::new(), KeyRecord::from(&KeyEstimate::neutral()));
    }

    let engine = ChordInferenceEngine::new(config.clone());
    let result = engine.infer(&notes);

    log::info!(
        "Chord inference complete: {} chords in {} {}",
        result.chords.len(),
        note_name(result.key.key_pc),
        result.key.mode.name()
    );

    let chords = result.chords.iter().map(ChordRecord::from).collect();
    (chords, KeyRecord::from(&result.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_records_parsed() {
        let records = vec![
            json!({"onset": 0.0, "offset": 2.0, "pitch": 60, "confidence": 0.9}),
            json!({"onset": 2.0, "offset": 4.0, "pitch": 64, "confidence": 0.8}),
        ];

        let notes = notes_from_records(&records);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].pitch, 60);
        assert!((notes[1].onset - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_records_skipped() {
        let records = vec![
            json!({"onset": 0.0, "offset": 2.0, "pitch": 60, "confidence": 0.9}),
            json!({"onset": 0.0, "pitch": 60, "confidence": 0.9}), // missing offset
            json!({"onset": "zero", "offset": 2.0, "pitch": 60, "confidence": 0.9}),
            json!({"onset": 0.0, "offset": 2.0, "pitch": 200, "confidence": 0.9}),
            json!({"onset": 2.0, "offset": 1.0, "pitch": 60, "confidence": 0.9}),
            json!({"onset": 1.0, "offset": 3.0, "pitch": 62, "confidence": 0.7}),
        ];

        let notes = notes_from_records(&records);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].pitch, 60);
        assert_eq!(notes[1].pitch, 62);
    }

    #[test]
    fn test_batch_must_be_array() {
        let batch = json!({"notes": []});
        assert!(notes_from_json(&batch).is_err());

        let batch = json!([{"onset": 0.0, "offset": 1.0, "pitch": 60, "confidence": 0.5}]);
        assert_eq!(notes_from_json(&batch).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_input_yields_neutral_key() {
        let config = InferenceConfig::default();
        let (chords, key) = process_note_records(&[], &config);

        assert!(chords.is_empty());
        assert_eq!(key.key, "C");
        assert_eq!(key.mode, "major");
        assert_eq!(key.confidence, 0.0);
    }

    #[test]
    fn test_fully_invalid_input_yields_neutral_key() {
        let config = InferenceConfig::default();
        let records = vec![json!({"pitch": 60}), json!("not even an object")];
        let (chords, key) = process_note_records(&records, &config);

        assert!(chords.is_empty());
        assert_eq!(key.key, "C");
        assert_eq!(key.confidence, 0.0);
    }

    #[test]
    fn test_records_round_trip_through_pipeline() {
        let config = InferenceConfig::default();
        let records = vec![
            json!({"onset": 0.0, "offset": 1.8, "pitch": 60, "confidence": 0.9}),
            json!({"onset": 0.0, "offset": 1.8, "pitch": 64, "confidence": 0.9}),
            json!({"onset": 0.0, "offset": 1.8, "pitch": 67, "confidence": 0.9}),
        ];

        let (chords, key) = process_note_records(&records, &config);
        assert_eq!(chords.len(), 1);
        assert_eq!(chords[0].chord, "C");
        assert_eq!(chords[0].pitch_classes, vec![0, 4, 7]);
        assert_eq!(key.key, "C");
        assert_eq!(key.mode, "major");
    }

    #[test]
    fn test_chord_record_serialization() {
        let record = ChordRecord {
            onset: 0.0,
            offset: 2.0,
            chord: "Am".to_string(),
            confidence: 0.8,
            pitch_classes: vec![0, 4, 9],
        };

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized["chord"], "Am");
        assert_eq!(serialized["pitch_classes"], json!([0, 4, 9]));
    }
}
