use crate::domain::model::TriageInput;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "acuvia")]
#[command(about = "Symptom triage and risk prioritization")]
#[command(version)]
pub struct CliConfig {
    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Assess a single patient and print the result as JSON
    Assess {
        #[arg(long, allow_negative_numbers = true)]
        age: i64,

        #[arg(long, default_value = "unspecified")]
        gender: String,

        /// Comma separated, e.g. --comorbidities diabetes,asthma
        #[arg(long, value_delimiter = ',')]
        comorbidities: Vec<String>,

        #[arg(long)]
        symptoms: String,

        /// Use this High-class probability instead of running the classifier
        #[arg(long)]
        probability: Option<f64>,

        /// Do not write to the assessment log
        #[arg(long)]
        no_log: bool,
    },

    /// Assess every row of a CSV file (age,gender,comorbidities,symptoms)
    Batch {
        #[arg(short, long)]
        input: String,

        #[arg(short, long)]
        output: String,

        #[arg(long)]
        no_log: bool,
    },
}

impl Command {
    pub fn no_log(&self) -> bool {
        match self {
            Command::Assess { no_log, .. } | Command::Batch { no_log, .. } => *no_log,
        }
    }
}

impl CliConfig {
    /// The patient described by an `assess` invocation.
    pub fn triage_input(&self) -> Option<TriageInput> {
        match &self.command {
            Command::Assess {
                age,
                gender,
                comorbidities,
                symptoms,
                ..
            } => Some(TriageInput::new(
                *age,
                gender.clone(),
                comorbidities
                    .iter()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect(),
                symptoms.clone(),
            )),
            Command::Batch { .. } => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }

        match &self.command {
            Command::Assess { probability, .. } => {
                if let Some(p) = probability {
                    validation::validate_probability("probability", *p)?;
                }
                if let Some(input) = self.triage_input() {
                    input.validate()?;
                }
            }
            Command::Batch { input, output, .. } => {
                validation::validate_path("input", input)?;
                validation::validate_path("output", output)?;
                validation::validate_file_extensions(
                    "input",
                    std::slice::from_ref(input),
                    &["csv"],
                )?;
            }
        }

        Ok(())
    }
}
