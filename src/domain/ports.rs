use crate::domain::model::{ClassProbabilities, TriageInput, TriageResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Black-box text classifier: symptom narrative in, label distribution out.
#[async_trait]
pub trait SymptomClassifier: Send + Sync {
    async fn predict_probabilities(&self, text: &str) -> Result<ClassProbabilities>;

    fn name(&self) -> &str;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Receives every completed assessment.
#[async_trait]
pub trait AssessmentSink: Send + Sync {
    async fn record(&self, input: &TriageInput, result: &TriageResult) -> Result<()>;
}
