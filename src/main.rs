use std::path::PathBuf;
use std::sync::Arc;

use miette::{IntoDiagnostic, Result, WrapErr};

use lessonsmith::config::AppConfig;
use lessonsmith::core::adaptation::AdaptationEngine;
use lessonsmith::core::generation::GenerationOrchestrator;
use lessonsmith::core::logging::{self, AppError};
use lessonsmith::core::pipeline::ContentPipeline;
use lessonsmith::core::profile::ProfileCatalog;
use lessonsmith::core::request::ContentRequest;
use lessonsmith::core::strategy::StrategySelector;

fn main() -> Result<()> {
    let config = AppConfig::load();
    let _log_guard = logging::init_file_only(&config);
    log::info!("lessonsmith v{} starting", lessonsmith::VERSION);

    let path = std::env::args_os().nth(1).map(PathBuf::from).ok_or_else(|| {
        AppError::new("Missing request file").with_help("Usage: lessonsmith <request.json>")
    })?;

    let source = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let request: ContentRequest = serde_json::from_str(&source)
        .map_err(|e| AppError::invalid_request(&source, &e))?;

    let registry = config.provider_registry().into_diagnostic()?;
    let orchestrator = GenerationOrchestrator::new(config.orchestrator_config().into_diagnostic()?);
    let pipeline = ContentPipeline::new(
        AdaptationEngine::new(Arc::new(ProfileCatalog::builtin())),
        StrategySelector::new(registry),
        orchestrator,
    );

    let plan = pipeline
        .plan(&request)
        .map_err(|e| AppError::new(e.to_string()).with_help(e.user_message()))?;

    let output = serde_json::to_string_pretty(&plan).into_diagnostic()?;
    println!("{output}");

    Ok(())
}
