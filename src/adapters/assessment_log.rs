use crate::domain::model::{TriageInput, TriageResult};
use crate::domain::ports::{AssessmentSink, Storage};
use crate::utils::error::{Result, TriageError};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    request: &'a TriageInput,
    response: &'a TriageResult,
}

/// Appends each assessment to a JSON array file:
/// `[{"timestamp": ..., "request": {...}, "response": {...}}, ...]`.
pub struct AssessmentLog<S: Storage> {
    storage: S,
    filename: String,
    // 讀取-修改-寫入 需要序列化
    write_lock: Mutex<()>,
}

impl<S: Storage> AssessmentLog<S> {
    pub fn new(storage: S, filename: impl Into<String>) -> Self {
        Self {
            storage,
            filename: filename.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Entries currently on disk; a missing file is an empty log.
    pub async fn entries(&self) -> Result<Vec<serde_json::Value>> {
        match self.storage.read_file(&self.filename).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(TriageError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn append(&self, input: &TriageInput, result: &TriageResult) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.entries().await {
            Ok(entries) => entries,
            Err(TriageError::SerializationError(e)) => {
                tracing::warn!(
                    "Assessment log '{}' is not a JSON array ({}), starting a new one",
                    self.filename,
                    e
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            request: input,
            response: result,
        };
        entries.push(serde_json::to_value(&entry)?);

        let data = serde_json::to_vec_pretty(&entries)?;
        self.storage.write_file(&self.filename, &data).await?;
        tracing::debug!(
            "Recorded assessment #{} in {}",
            entries.len(),
            self.filename
        );
        Ok(())
    }
}

#[async_trait]
impl<S: Storage> AssessmentSink for AssessmentLog<S> {
    async fn record(&self, input: &TriageInput, result: &TriageResult) -> Result<()> {
        self.append(input, result).await
    }
}
