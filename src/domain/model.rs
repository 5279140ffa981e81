use crate::utils::error::TriageError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Label the classifier uses for its most severe class.
pub const HIGH_LABEL: &str = "High";

/// One patient presentation as submitted for assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageInput {
    pub age: i64,
    /// Passed through to the assessment log; has no effect on scoring.
    pub gender: String,
    #[serde(default)]
    pub comorbidities: Vec<String>,
    pub symptoms: String,
}

impl TriageInput {
    pub fn new(
        age: i64,
        gender: impl Into<String>,
        comorbidities: Vec<String>,
        symptoms: impl Into<String>,
    ) -> Self {
        Self {
            age,
            gender: gender.into(),
            comorbidities,
            symptoms: symptoms.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "moderate" => Ok(RiskTier::Moderate),
            "high" => Ok(RiskTier::High),
            _ => Err(TriageError::InvalidInputError {
                field: "risk_level".to_string(),
                reason: format!("Unknown risk tier: {}", s),
            }),
        }
    }
}

/// A non-negative additive contribution to the composite score, with the
/// sentence that explains it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    contribution: f64,
    justification: String,
}

impl RiskFactor {
    pub fn new(contribution: f64, justification: impl Into<String>) -> Self {
        Self {
            contribution: contribution.max(0.0),
            justification: justification.into(),
        }
    }

    pub fn contribution(&self) -> f64 {
        self.contribution
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }
}

/// Symptom phrases found in a narrative, unique and in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DetectedSymptoms {
    phrases: Vec<String>,
}

impl DetectedSymptoms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `phrase` unless it was already collected. Returns whether it was added.
    pub fn insert(&mut self, phrase: &str) -> bool {
        if self.contains(phrase) {
            return false;
        }
        self.phrases.push(phrase.to_string());
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|p| p == phrase)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.phrases
    }
}

/// Probability per class label, as returned by a classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassProbabilities {
    by_label: BTreeMap<String, f64>,
}

impl ClassProbabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: impl Into<String>, probability: f64) -> Self {
        self.by_label.insert(label.into(), probability);
        self
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.by_label.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.by_label.iter().map(|(label, p)| (label.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    /// The scalar fed into the composite score: the "High" class probability
    /// when the classifier has that label, otherwise the largest probability
    /// of any class. `None` for an empty distribution.
    pub fn model_probability(&self) -> Option<f64> {
        match self.get(HIGH_LABEL) {
            Some(high) => Some(high),
            None => self.by_label.values().copied().reduce(f64::max),
        }
    }
}

impl FromIterator<(String, f64)> for ClassProbabilities {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            by_label: iter.into_iter().collect(),
        }
    }
}

/// Final output of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageResult {
    #[serde(rename = "risk_level")]
    tier: RiskTier,
    #[serde(rename = "risk_score")]
    score: f64,
    explanation: String,
    detected_symptoms: DetectedSymptoms,
    recommended_action: String,
    #[serde(skip)]
    critical_override: bool,
}

impl TriageResult {
    pub fn new(
        tier: RiskTier,
        score: f64,
        explanation: String,
        detected_symptoms: DetectedSymptoms,
        recommended_action: String,
    ) -> Self {
        Self {
            tier,
            score,
            explanation,
            detected_symptoms,
            recommended_action,
            critical_override: false,
        }
    }

    /// Marks a result whose tier was forced by a critical symptom pattern.
    pub fn with_critical_override(mut self, critical: bool) -> Self {
        self.critical_override = critical;
        self
    }

    pub fn is_critical_override(&self) -> bool {
        self.critical_override
    }

    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn detected_symptoms(&self) -> &[String] {
        self.detected_symptoms.as_slice()
    }

    pub fn recommended_action(&self) -> &str {
        &self.recommended_action
    }
}
