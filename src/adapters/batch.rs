use crate::core::engine::TriageEngine;
use crate::domain::model::{RiskTier, TriageInput};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One CSV input row. Comorbidities are `;`-separated inside their column.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub age: i64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub comorbidities: String,
    pub symptoms: String,
}

impl BatchRow {
    pub fn into_input(self) -> TriageInput {
        let comorbidities = self
            .comorbidities
            .split(';')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        TriageInput::new(self.age, self.gender, comorbidities, self.symptoms)
    }
}

#[derive(Debug, Serialize)]
struct BatchOutputRow<'a> {
    row: usize,
    age: i64,
    gender: &'a str,
    risk_level: &'static str,
    risk_score: f64,
    detected_symptoms: String,
    recommended_action: &'a str,
    explanation: &'a str,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub by_tier: BTreeMap<RiskTier, usize>,
}

impl BatchSummary {
    pub fn count(&self, tier: RiskTier) -> usize {
        self.by_tier.get(&tier).copied().unwrap_or(0)
    }
}

/// Assesses every row of `input` and writes one result row per patient to
/// `output`. Rows that fail to parse, validate or classify are skipped and
/// counted. Only I/O and CSV write errors abort the batch.
pub async fn run_batch(
    engine: &TriageEngine,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(input.as_ref())?;
    let mut writer = csv::Writer::from_path(output.as_ref())?;
    let mut summary = BatchSummary::default();

    for (index, record) in reader.deserialize::<BatchRow>().enumerate() {
        // 第 1 行是標題，資料從第 2 行開始
        let line = index + 2;
        let row = match record {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line, e);
                summary.skipped += 1;
                continue;
            }
        };

        let patient = row.into_input();
        if let Err(e) = patient.validate() {
            tracing::warn!("Skipping line {}: {}", line, e);
            summary.skipped += 1;
            continue;
        }

        let result = match engine.assess(&patient).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Skipping line {}: assessment failed: {}", line, e);
                summary.skipped += 1;
                continue;
            }
        };
        writer.serialize(BatchOutputRow {
            row: line,
            age: patient.age,
            gender: &patient.gender,
            risk_level: result.tier().as_str(),
            risk_score: result.score(),
            detected_symptoms: result.detected_symptoms().join("; "),
            recommended_action: result.recommended_action(),
            explanation: result.explanation(),
        })?;

        summary.processed += 1;
        *summary.by_tier.entry(result.tier()).or_insert(0) += 1;
    }

    writer.flush()?;
    tracing::info!(
        "Batch complete: {} assessed, {} skipped",
        summary.processed,
        summary.skipped
    );
    Ok(summary)
}
