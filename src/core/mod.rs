pub mod action;
pub mod critical;
pub mod engine;
pub mod explain;
pub mod extractor;
pub mod factors;
pub mod lexicon;
pub mod scoring;
pub mod triage;

pub use crate::domain::model::{
    ClassProbabilities, DetectedSymptoms, RiskFactor, RiskTier, TriageInput, TriageResult,
};
pub use crate::domain::ports::{AssessmentSink, Storage, SymptomClassifier};
pub use crate::utils::error::Result;
