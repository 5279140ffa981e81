use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Model service request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Classifier error: {message}")]
    ClassifierError { message: String },

    #[error("Invalid input '{field}': {reason}")]
    InvalidInputError { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    Configuration,
    Classifier,
    Input,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TriageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TriageError::HttpError(_) => ErrorCategory::Network,
            TriageError::IoError(_) => ErrorCategory::Io,
            TriageError::CsvError(_) | TriageError::SerializationError(_) => ErrorCategory::Data,
            TriageError::ConfigValidationError { .. }
            | TriageError::InvalidConfigValueError { .. }
            | TriageError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TriageError::ClassifierError { .. } => ErrorCategory::Classifier,
            TriageError::InvalidInputError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Classifier => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TriageError::HttpError(_) => {
                "Check that the model service is running and reachable, then retry"
            }
            TriageError::CsvError(_) => {
                "Check the batch file has the columns age,gender,comorbidities,symptoms"
            }
            TriageError::IoError(_) => "Check that the file exists and is readable/writable",
            TriageError::SerializationError(_) => "Check the JSON payload or assessment log format",
            TriageError::ConfigValidationError { .. }
            | TriageError::InvalidConfigValueError { .. }
            | TriageError::MissingConfigError { .. } => {
                "Fix the configuration file and run again"
            }
            TriageError::ClassifierError { .. } => {
                "Check the classifier settings or pass --probability to bypass the model"
            }
            TriageError::InvalidInputError { .. } => "Correct the patient input and resubmit",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TriageError::HttpError(_) => "Could not reach the model service".to_string(),
            TriageError::InvalidInputError { field, reason } => {
                format!("Input '{}' is not valid: {}", field, reason)
            }
            TriageError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
