use crate::config::toml_config::LabelWeightsConfig;
use crate::domain::model::{ClassProbabilities, HIGH_LABEL};
use crate::domain::ports::SymptomClassifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Returns the same distribution for every text.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    probabilities: ClassProbabilities,
}

impl FixedClassifier {
    pub fn new(probabilities: ClassProbabilities) -> Self {
        Self { probabilities }
    }

    /// Only exposes the High class, with probability `p`.
    pub fn high(p: f64) -> Self {
        Self::new(ClassProbabilities::new().with(HIGH_LABEL, p))
    }
}

#[async_trait]
impl SymptomClassifier for FixedClassifier {
    async fn predict_probabilities(&self, _text: &str) -> Result<ClassProbabilities> {
        Ok(self.probabilities.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelWeights {
    pub label: String,
    pub bias: f64,
    pub keywords: Vec<(String, f64)>,
}

impl LabelWeights {
    pub fn new(label: &str, bias: f64, keywords: &[(&str, f64)]) -> Self {
        Self {
            label: label.to_string(),
            bias,
            keywords: keywords
                .iter()
                .map(|(phrase, weight)| (phrase.to_lowercase(), *weight))
                .collect(),
        }
    }

    fn logit(&self, text_lower: &str) -> f64 {
        self.bias
            + self
                .keywords
                .iter()
                .filter(|(phrase, _)| text_lower.contains(phrase.as_str()))
                .map(|(_, weight)| weight)
                .sum::<f64>()
    }
}

/// Multinomial logistic model over phrase indicators.
///
/// Each label scores `bias + Σ weight` over its phrases found in the
/// lower-cased text; the scores go through a softmax.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    labels: Vec<LabelWeights>,
}

impl KeywordClassifier {
    pub fn new(labels: Vec<LabelWeights>) -> Self {
        Self { labels }
    }

    pub fn from_config(labels: &BTreeMap<String, LabelWeightsConfig>) -> Self {
        Self::new(
            labels
                .iter()
                .map(|(label, weights)| LabelWeights {
                    label: label.clone(),
                    bias: weights.bias,
                    keywords: weights
                        .keywords
                        .iter()
                        .map(|(phrase, weight)| (phrase.to_lowercase(), *weight))
                        .collect(),
                })
                .collect(),
        )
    }

    pub fn predict(&self, text: &str) -> ClassProbabilities {
        let text_lower = text.to_lowercase();
        let logits: Vec<f64> = self.labels.iter().map(|l| l.logit(&text_lower)).collect();

        // 先減去最大值，避免 exp 溢位
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        self.labels
            .iter()
            .zip(exps)
            .map(|(label, e)| (label.label.clone(), e / total))
            .collect()
    }
}

impl Default for KeywordClassifier {
    /// Weights derived from the phrasing of typical Low, Moderate and High
    /// presentations.
    fn default() -> Self {
        Self::new(vec![
            LabelWeights::new(
                "Low",
                0.5,
                &[
                    ("mild", 1.5),
                    ("slight", 1.2),
                    ("minor", 1.2),
                    ("occasional", 1.0),
                    ("runny nose", 1.0),
                    ("sneezing", 1.0),
                    ("sore throat", 0.8),
                    ("scratchy throat", 0.8),
                    ("itchy eyes", 0.8),
                    ("watery eyes", 0.8),
                    ("dry skin", 0.8),
                    ("cold symptoms", 0.8),
                    ("after exercise", 0.6),
                ],
            ),
            LabelWeights::new(
                "Moderate",
                0.0,
                &[
                    ("persistent", 1.2),
                    ("recurrent", 1.0),
                    ("moderate", 1.0),
                    ("fever", 1.0),
                    ("vomiting", 0.8),
                    ("diarrhea", 0.8),
                    ("wheezing", 1.0),
                    ("chills", 0.8),
                    ("swelling", 0.6),
                    ("shortness of breath", 1.0),
                    ("chest tightness", 1.2),
                    ("blood in urine", 1.2),
                    ("dehydration", 1.0),
                    ("numbness", 0.8),
                    ("abdominal pain", 0.8),
                    ("painful urination", 0.8),
                    ("swollen lymph nodes", 0.8),
                ],
            ),
            LabelWeights::new(
                HIGH_LABEL,
                -0.5,
                &[
                    ("chest pain", 2.0),
                    ("sweating", 1.5),
                    ("severe", 1.2),
                    ("sudden", 1.2),
                    ("unconscious", 2.5),
                    ("loss of consciousness", 2.5),
                    ("radiating", 1.2),
                    ("bluish lips", 2.0),
                    ("paralysis", 2.0),
                    ("uncontrolled bleeding", 2.0),
                    ("throat swelling", 1.5),
                    ("seizure", 1.5),
                    ("coughing up blood", 2.0),
                    ("slurred speech", 2.0),
                    ("vomiting blood", 2.0),
                    ("stiff neck", 1.2),
                    ("crushing", 1.5),
                    ("vision loss", 1.5),
                    ("burns", 1.2),
                    ("blood loss", 1.5),
                    ("confusion", 1.0),
                ],
            ),
        ])
    }
}

#[async_trait]
impl SymptomClassifier for KeywordClassifier {
    async fn predict_probabilities(&self, text: &str) -> Result<ClassProbabilities> {
        Ok(self.predict(text))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
