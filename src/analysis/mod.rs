//! Inference orchestration and result aggregation modules
//!
//! Sequences the pipeline stages and bundles the outcome:
//! - Engine (fixed stage order)
//! - Result and per-run diagnostic types

pub mod engine;
pub mod result;

pub use engine::ChordInferenceEngine;
pub use result::{InferenceResult, PipelineStats};
