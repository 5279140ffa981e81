// Adapters layer: concrete implementations of the domain ports (classifiers,
// storage, assessment log) plus CSV batch processing.

pub mod assessment_log;
pub mod batch;
pub mod classifier;
pub mod http_classifier;
pub mod storage;

use crate::config::toml_config::ClassifierConfig;
use crate::domain::ports::SymptomClassifier;
use crate::utils::error::{Result, TriageError};
use std::sync::Arc;
use std::time::Duration;

use classifier::{FixedClassifier, KeywordClassifier};
use http_classifier::HttpClassifier;

/// Builds the classifier selected by `[classifier] type`.
pub fn classifier_from_config(
    config: &ClassifierConfig,
    timeout_seconds: u64,
) -> Result<Arc<dyn SymptomClassifier>> {
    match config.r#type.as_str() {
        "keyword" => Ok(Arc::new(match &config.labels {
            Some(labels) => KeywordClassifier::from_config(labels),
            None => KeywordClassifier::default(),
        })),
        "http" => {
            let endpoint =
                config
                    .endpoint
                    .as_deref()
                    .ok_or_else(|| TriageError::MissingConfigError {
                        field: "classifier.endpoint".to_string(),
                    })?;
            Ok(Arc::new(HttpClassifier::new(
                endpoint,
                Duration::from_secs(timeout_seconds),
            )?))
        }
        "fixed" => {
            let p = config
                .probability
                .ok_or_else(|| TriageError::MissingConfigError {
                    field: "classifier.probability".to_string(),
                })?;
            Ok(Arc::new(FixedClassifier::high(p)))
        }
        other => Err(TriageError::InvalidConfigValueError {
            field: "classifier.type".to_string(),
            value: other.to_string(),
            reason: "Unsupported classifier".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_each_classifier_type() {
        let keyword = ClassifierConfig::default();
        assert_eq!(classifier_from_config(&keyword, 10).unwrap().name(), "keyword");

        let fixed = ClassifierConfig {
            r#type: "fixed".to_string(),
            probability: Some(0.4),
            ..ClassifierConfig::default()
        };
        assert_eq!(classifier_from_config(&fixed, 10).unwrap().name(), "fixed");

        let http = ClassifierConfig {
            r#type: "http".to_string(),
            endpoint: Some("http://localhost:8000/predict".to_string()),
            ..ClassifierConfig::default()
        };
        assert_eq!(classifier_from_config(&http, 10).unwrap().name(), "http");
    }

    #[test]
    fn test_missing_settings_are_errors() {
        let http = ClassifierConfig {
            r#type: "http".to_string(),
            ..ClassifierConfig::default()
        };
        assert!(classifier_from_config(&http, 10).is_err());

        let unknown = ClassifierConfig {
            r#type: "svm".to_string(),
            ..ClassifierConfig::default()
        };
        assert!(classifier_from_config(&unknown, 10).is_err());
    }
}
