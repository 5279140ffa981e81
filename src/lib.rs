pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{
    assessment_log::AssessmentLog,
    classifier::{FixedClassifier, KeywordClassifier},
    http_classifier::HttpClassifier,
    storage::LocalStorage,
};
pub use crate::core::{engine::TriageEngine, lexicon::SymptomLexicon, triage::assess};
pub use domain::model::{ClassProbabilities, RiskTier, TriageInput, TriageResult};
pub use utils::error::{Result, TriageError};
