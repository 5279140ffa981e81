use crate::core::lexicon::SymptomLexicon;
use crate::utils::error::{Result, TriageError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const CLASSIFIER_TYPES: [&str; 3] = ["keyword", "http", "fixed"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub assessment_log: AssessmentLogConfig,
    /// Replaces the built-in symptom vocabulary and critical groups.
    pub lexicon: Option<LexiconConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "acuvia".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// Probability of the High class for the `fixed` classifier.
    pub probability: Option<f64>,
    /// Per-label weights for the `keyword` classifier; built-in weights when absent.
    pub labels: Option<BTreeMap<String, LabelWeightsConfig>>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            r#type: "keyword".to_string(),
            endpoint: None,
            timeout_seconds: None,
            probability: None,
            labels: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelWeightsConfig {
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub keywords: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentLogConfig {
    pub enabled: bool,
    pub directory: String,
    pub filename: String,
}

impl Default for AssessmentLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "./logs".to_string(),
            filename: "assessments.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub critical_patterns: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TriageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TriageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ACUVIA_MODEL_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TriageError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("service.name", &self.service.name)?;

        let classifier = &self.classifier;
        if !CLASSIFIER_TYPES.contains(&classifier.r#type.as_str()) {
            return Err(TriageError::InvalidConfigValueError {
                field: "classifier.type".to_string(),
                value: classifier.r#type.clone(),
                reason: format!(
                    "Unsupported classifier. Valid types: {}",
                    CLASSIFIER_TYPES.join(", ")
                ),
            });
        }

        match classifier.r#type.as_str() {
            "http" => {
                let endpoint =
                    classifier
                        .endpoint
                        .as_deref()
                        .ok_or_else(|| TriageError::MissingConfigError {
                            field: "classifier.endpoint".to_string(),
                        })?;
                validation::validate_url("classifier.endpoint", endpoint)?;
            }
            "fixed" => {
                let probability =
                    classifier
                        .probability
                        .ok_or_else(|| TriageError::MissingConfigError {
                            field: "classifier.probability".to_string(),
                        })?;
                validation::validate_probability("classifier.probability", probability)?;
            }
            _ => {
                if let Some(labels) = &classifier.labels {
                    if labels.is_empty() {
                        return Err(TriageError::ConfigValidationError {
                            field: "classifier.labels".to_string(),
                            message: "At least one label is required".to_string(),
                        });
                    }
                }
            }
        }

        if let Some(timeout) = classifier.timeout_seconds {
            validation::validate_positive_number("classifier.timeout_seconds", timeout, 1)?;
        }

        if let Some(lexicon) = &self.lexicon {
            if lexicon.symptoms.iter().all(|s| s.trim().is_empty()) {
                return Err(TriageError::ConfigValidationError {
                    field: "lexicon.symptoms".to_string(),
                    message: "At least one symptom phrase is required".to_string(),
                });
            }
        }

        if self.assessment_log.enabled {
            validation::validate_path("assessment_log.directory", &self.assessment_log.directory)?;
            validation::validate_path("assessment_log.filename", &self.assessment_log.filename)?;
        }

        Ok(())
    }

    /// 取得模型服務逾時秒數
    pub fn timeout_seconds(&self) -> u64 {
        self.classifier.timeout_seconds.unwrap_or(10)
    }

    /// 自訂詞庫，未設定時使用內建詞庫
    pub fn lexicon(&self) -> SymptomLexicon {
        match &self.lexicon {
            Some(lexicon) => {
                SymptomLexicon::new(&lexicon.symptoms, lexicon.critical_patterns.iter())
            }
            None => SymptomLexicon::default(),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
