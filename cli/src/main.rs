//! CLI entrypoint for conductor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use conductor_application::{
    NoProgress, NoRunLogger, OrchestrateInput, OrchestrateUseCase, OrchestrationProgress,
    RunLogger,
};
use conductor_domain::{ContextMap, OrchestrationPlanner};
use conductor_infrastructure::{
    ConfigLoader, FileConfig, JsonlRunLogger, KeywordIntentParser, build_backend_set,
};
use conductor_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting conductor");

    // === Configuration ===
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    config.validate().context("invalid configuration")?;

    let registry = Arc::new(config.build_registry()?);

    if cli.list_agents {
        println!("{}", ConsoleFormatter::format_agents(registry.all()));
        return Ok(());
    }

    let question = match cli.question.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => bail!("Question is required. Use --list-agents to see what can be asked about."),
    };

    // === Dependency Injection ===
    let planner = Arc::new(OrchestrationPlanner::new(
        Arc::clone(&registry),
        config.selection.clone(),
        config.backend_assigner()?,
    ));
    let intent_parser = Arc::new(KeywordIntentParser::new(config.intent_rules()));
    let backends = Arc::new(build_backend_set(
        &config.backend_endpoints()?,
        cli.offline,
    ));

    let mut params = config.execution_params();
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            bail!("--timeout must be greater than 0");
        }
        params = params.with_agent_timeout(Some(Duration::from_secs(secs)));
    }
    if cli.max_concurrency.is_some() {
        params = params.with_max_concurrency(cli.max_concurrency);
    }

    let run_logger: Arc<dyn RunLogger> = match &config.logging.run_log {
        Some(path) => match JsonlRunLogger::new(path) {
            Some(logger) => {
                info!("Writing run log to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoRunLogger),
        },
        None => Arc::new(NoRunLogger),
    };

    // Ctrl-C cancels the in-flight plan; partial results are still reported
    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling remaining agents");
            ctrl_c_token.cancel();
        }
    });

    let use_case = OrchestrateUseCase::new(planner, intent_parser, backends)
        .with_params(params)
        .with_run_logger(run_logger)
        .with_cancellation(cancellation);

    let mut input = OrchestrateInput::new(question.clone())
        .with_context(cli.context.iter().cloned().collect::<ContextMap>());
    if let Some(pattern) = cli.pattern {
        input = input.with_pattern(pattern);
    }

    if cli.plan_only {
        let planned = use_case.plan(&input).await;
        let output = match (&planned.plan, cli.output) {
            (Ok(plan), OutputFormat::Json) => serde_json::to_string_pretty(&serde_json::json!({
                "query": question,
                "intent": planned.intent,
                "plan": plan,
            }))?,
            (Ok(plan), _) => ConsoleFormatter::format_plan(&planned.intent, plan),
            (Err(e), OutputFormat::Json) => serde_json::to_string_pretty(&serde_json::json!({
                "query": question,
                "intent": planned.intent,
                "error": e.to_string(),
            }))?,
            (Err(e), _) => format!("Error: {}", e),
        };
        println!("{}", output);
        return Ok(());
    }

    if !cli.quiet && cli.output != OutputFormat::Json {
        println!();
        println!("+============================================================+");
        println!("|          Conductor - Contest Assistant Agents              |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question);
        println!();
    }

    let progress: Box<dyn OrchestrationProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.plain_progress(std::io::stderr().is_terminal()) {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let result = use_case
        .execute_with_progress(input, progress.as_ref())
        .await;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Answers => ConsoleFormatter::format_answers(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    match &cli.log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}
