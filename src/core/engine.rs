use crate::core::lexicon::{canonical_comorbidity, SymptomLexicon};
use crate::core::triage;
use crate::domain::model::{TriageInput, TriageResult};
use crate::domain::ports::{AssessmentSink, SymptomClassifier};
use crate::utils::error::{Result, TriageError};
use crate::utils::validation::validate_probabilities;
use std::sync::Arc;

/// Runs the classifier, then the scoring core, then hands the result to the
/// optional assessment sink.
pub struct TriageEngine {
    classifier: Arc<dyn SymptomClassifier>,
    lexicon: SymptomLexicon,
    sink: Option<Arc<dyn AssessmentSink>>,
}

impl TriageEngine {
    pub fn new(classifier: Arc<dyn SymptomClassifier>) -> Self {
        Self {
            classifier,
            lexicon: SymptomLexicon::default(),
            sink: None,
        }
    }

    pub fn with_lexicon(mut self, lexicon: SymptomLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn AssessmentSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub async fn assess(&self, input: &TriageInput) -> Result<TriageResult> {
        let probabilities = self
            .classifier
            .predict_probabilities(&input.symptoms)
            .await?;
        validate_probabilities(&probabilities)?;

        let model_probability =
            probabilities
                .model_probability()
                .ok_or_else(|| TriageError::ClassifierError {
                    message: "Classifier returned no class probabilities".to_string(),
                })?;

        tracing::debug!(
            "Classifier '{}' probabilities: {:?}, model probability {:.3}",
            self.classifier.name(),
            probabilities,
            model_probability
        );

        Ok(self.assess_with_probability(input, model_probability).await)
    }

    /// Skips the classifier and scores with a caller-supplied probability.
    pub async fn assess_with_probability(
        &self,
        input: &TriageInput,
        model_probability: f64,
    ) -> TriageResult {
        for name in &input.comorbidities {
            if canonical_comorbidity(name).is_none() {
                tracing::debug!("Unrecognised comorbidity '{}' counted as-is", name);
            }
        }

        let result = triage::assess(&self.lexicon, input, model_probability);

        if result.is_critical_override() {
            tracing::warn!(
                "⚠️ Critical symptom pattern detected, forcing {} risk",
                result.tier()
            );
        }
        tracing::info!(
            "Assessment complete: {} risk (score {:.2}, {} symptoms detected)",
            result.tier(),
            result.score(),
            result.detected_symptoms().len()
        );

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.record(input, &result).await {
                tracing::warn!("Failed to record assessment: {}", e);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::FixedClassifier;
    use crate::domain::model::{ClassProbabilities, RiskTier};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<(TriageInput, RiskTier)>>,
    }

    #[async_trait]
    impl AssessmentSink for RecordingSink {
        async fn record(&self, input: &TriageInput, result: &TriageResult) -> Result<()> {
            self.records
                .lock()
                .await
                .push((input.clone(), result.tier()));
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl AssessmentSink for FailingSink {
        async fn record(&self, _input: &TriageInput, _result: &TriageResult) -> Result<()> {
            Err(TriageError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn engine_with(probabilities: ClassProbabilities) -> TriageEngine {
        TriageEngine::new(Arc::new(FixedClassifier::new(probabilities)))
    }

    #[tokio::test]
    async fn test_uses_high_class_probability() {
        let engine = engine_with(
            ClassProbabilities::new()
                .with("Low", 0.3)
                .with("Moderate", 0.1)
                .with("High", 0.6),
        );
        let input = TriageInput::new(
            45,
            "female",
            vec!["hypertension".into(), "obesity".into()],
            "fever of 101 and joint pain",
        );

        let result = engine.assess(&input).await.unwrap();
        assert_eq!(result.score(), 6.0);
        assert_eq!(result.tier(), RiskTier::Moderate);
    }

    #[tokio::test]
    async fn test_falls_back_to_max_without_high_label() {
        let engine = engine_with(
            ClassProbabilities::new()
                .with("Routine", 0.2)
                .with("Urgent", 0.8),
        );
        let input = TriageInput::new(20, "male", vec![], "cough");

        let result = engine.assess(&input).await.unwrap();
        assert_eq!(result.score(), 4.0);
        assert_eq!(result.tier(), RiskTier::Moderate);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_probability() {
        let engine = engine_with(ClassProbabilities::new().with("High", 1.4));
        let input = TriageInput::new(20, "male", vec![], "cough");

        let err = engine.assess(&input).await.unwrap_err();
        assert!(matches!(err, TriageError::ClassifierError { .. }));
    }

    #[tokio::test]
    async fn test_rejects_empty_distribution() {
        let engine = engine_with(ClassProbabilities::new());
        let input = TriageInput::new(20, "male", vec![], "cough");

        assert!(engine.assess(&input).await.is_err());
    }

    #[tokio::test]
    async fn test_sink_receives_each_assessment() {
        let sink = Arc::new(RecordingSink::default());
        let engine = engine_with(ClassProbabilities::new().with("High", 0.2))
            .with_sink(sink.clone());

        let input = TriageInput::new(30, "female", vec![], "chest pain and sweating");
        let result = engine.assess(&input).await.unwrap();
        assert!(result.is_critical_override());

        let records = sink.records.lock().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, input);
        assert_eq!(records[0].1, RiskTier::High);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_fail_assessment() {
        let engine = engine_with(ClassProbabilities::new().with("High", 0.1))
            .with_sink(Arc::new(FailingSink));
        let input = TriageInput::new(30, "female", vec![], "runny nose");

        let result = engine.assess(&input).await.unwrap();
        assert_eq!(result.tier(), RiskTier::Low);
    }

    #[tokio::test]
    async fn test_custom_lexicon() {
        let lexicon = SymptomLexicon::new(vec!["facial droop"], vec![vec!["facial droop"]]);
        let engine =
            engine_with(ClassProbabilities::new().with("High", 0.0)).with_lexicon(lexicon);
        let input = TriageInput::new(25, "male", vec![], "Sudden facial droop");

        let result = engine.assess(&input).await.unwrap();
        assert_eq!(result.tier(), RiskTier::High);
        assert_eq!(result.detected_symptoms(), &["facial droop".to_string()]);
    }
}
