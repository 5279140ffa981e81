use acuvia_triage::adapters::{batch, classifier_from_config};
use acuvia_triage::domain::ports::SymptomClassifier;
use acuvia_triage::utils::error::{ErrorSeverity, TriageError};
use acuvia_triage::utils::{logger, validation::Validate};
use acuvia_triage::{
    AssessmentLog, CliConfig, Command, FixedClassifier, LocalStorage, RiskTier, TomlConfig,
    TriageEngine,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (未指定時使用內建預設)
    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!(
        "🚀 Starting {} v{}",
        config.service.name,
        config.service.version
    );

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Assessment failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &TomlConfig) -> Result<(), TriageError> {
    let classifier: Arc<dyn SymptomClassifier> = match &cli.command {
        Command::Assess {
            probability: Some(p),
            ..
        } => {
            tracing::info!("🔧 Using fixed model probability {}", p);
            Arc::new(FixedClassifier::high(*p))
        }
        _ => classifier_from_config(&config.classifier, config.timeout_seconds())?,
    };
    tracing::debug!("Classifier: {}", classifier.name());

    let mut engine = TriageEngine::new(classifier);
    if config.lexicon.is_some() {
        tracing::info!("📚 Using custom symptom lexicon from config");
        engine = engine.with_lexicon(config.lexicon());
    }

    if config.assessment_log.enabled && !cli.command.no_log() {
        let log = AssessmentLog::new(
            LocalStorage::new(config.assessment_log.directory.clone()),
            config.assessment_log.filename.clone(),
        );
        tracing::info!(
            "📁 Recording assessments to {}/{}",
            config.assessment_log.directory,
            config.assessment_log.filename
        );
        engine = engine.with_sink(Arc::new(log));
    }

    match &cli.command {
        Command::Assess { .. } => {
            let input = cli
                .triage_input()
                .ok_or_else(|| TriageError::InvalidInputError {
                    field: "command".to_string(),
                    reason: "assess requires patient details".to_string(),
                })?;
            let result = engine.assess(&input).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Batch { input, output, .. } => {
            let summary = batch::run_batch(&engine, input, output).await?;
            println!(
                "✅ Assessed {} patients ({} skipped): {} High, {} Moderate, {} Low",
                summary.processed,
                summary.skipped,
                summary.count(RiskTier::High),
                summary.count(RiskTier::Moderate),
                summary.count(RiskTier::Low)
            );
            println!("📁 Results saved to: {}", output);
        }
    }

    Ok(())
}
