use crate::domain::model::ClassProbabilities;
use crate::domain::ports::SymptomClassifier;
use crate::utils::error::{Result, TriageError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    probabilities: ClassProbabilities,
}

/// Calls a remote model service: `POST {"text": ...}` answered with
/// `{"probabilities": {"Low": 0.1, ...}}`.
pub struct HttpClassifier {
    client: Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SymptomClassifier for HttpClassifier {
    async fn predict_probabilities(&self, text: &str) -> Result<ClassProbabilities> {
        tracing::debug!("Requesting prediction from: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { text })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model service response status: {}", status);

        if !status.is_success() {
            return Err(TriageError::ClassifierError {
                message: format!("Model service returned HTTP {}", status),
            });
        }

        let body: PredictResponse =
            response
                .json()
                .await
                .map_err(|e| TriageError::ClassifierError {
                    message: format!("Unexpected model service response: {}", e),
                })?;

        Ok(body.probabilities)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_posts_text_and_parses_probabilities() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/predict")
                .json_body(serde_json::json!({"text": "chest pain"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "probabilities": {"Low": 0.1, "Moderate": 0.2, "High": 0.7}
                }));
        });

        let classifier =
            HttpClassifier::new(server.url("/predict"), Duration::from_secs(5)).unwrap();
        let probs = classifier.predict_probabilities("chest pain").await.unwrap();

        mock.assert();
        assert_eq!(probs.get("High"), Some(0.7));
        assert_eq!(probs.len(), 3);
    }

    #[tokio::test]
    async fn test_server_error_is_classifier_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(503);
        });

        let classifier =
            HttpClassifier::new(server.url("/predict"), Duration::from_secs(5)).unwrap();
        let err = classifier.predict_probabilities("cough").await.unwrap_err();

        assert!(matches!(err, TriageError::ClassifierError { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_classifier_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"label": "High"}));
        });

        let classifier =
            HttpClassifier::new(server.url("/predict"), Duration::from_secs(5)).unwrap();
        assert!(classifier.predict_probabilities("cough").await.is_err());
    }
}
