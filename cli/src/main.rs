//! CLI entrypoint for chorus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chorus_application::{
    ChatRequest, ContextInjector, HandleChatUseCase, NoContext, NoOutcomeRecorder, NoProgress,
    OutcomeRecorder, ResponseSink, ResultCache, RunConsensusUseCase, SystemClock,
};
use chorus_domain::{OutputFormat, user_facing_message};
use chorus_infrastructure::{
    ConfigLoader, FileConfig, HttpProviderRegistry, InMemoryCacheStore, JsonlOutcomeLogger,
    LocalContextLoader, build_http_client,
};
use chorus_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, SimpleProgress,
    StdoutSink,
};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    info!("Starting chorus");

    let config = load_config(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("Effective configuration:");
        println!("{}", config.to_toml_string()?);
        return Ok(ExitCode::SUCCESS);
    }

    // === Dependency Injection ===
    let timeout = config.consensus.to_params().call_timeout;
    let client = build_http_client(timeout.map(|t| t * 2));
    let registry = Arc::new(HttpProviderRegistry::from_config(&config.providers, client)?);

    if cli.list_providers {
        list_providers(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(question) = cli.question.clone() else {
        bail!("Question is required. Run `chorus --help` for usage.");
    };

    let mut chat_config = config.chat_config();
    if let Some(mode) = cli.routing_override() {
        chat_config.mode = mode;
    }

    let cache = Arc::new(ResultCache::new(
        Arc::new(InMemoryCacheStore::new()),
        Arc::new(SystemClock),
    ));
    let consensus = Arc::new(RunConsensusUseCase::new(
        registry.clone(),
        cache,
        chat_config.consensus.clone(),
    ));
    let use_case = HandleChatUseCase::new(registry, consensus, chat_config)
        .with_context_injector(context_injector(&config))
        .with_outcome_recorder(outcome_recorder(&config));

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        config.output.format,
        config.output.color && !cli.no_color,
        cli.quiet,
    );
    if !output.color {
        colored::control::set_override(false);
    }

    let mut request = ChatRequest::question(question);
    if let Some(system) = &cli.system {
        request = request.with_system_prompt(system.clone());
    }

    // Answer-only output streams straight to stdout
    let sink = StdoutSink::stdout();
    let sink = (output.format == OutputFormat::Answer).then_some(&sink as &dyn ResponseSink);

    let result = if !output.show_progress {
        use_case.execute_with_progress(request, &NoProgress, sink).await
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(request, &progress, sink).await
    } else {
        use_case.execute_with_progress(request, &SimpleProgress, sink).await
    };

    match result {
        Ok(outcome) => {
            match output.format {
                OutputFormat::Answer => println!(),
                format => println!("{}", ConsoleFormatter.render(&outcome, format)),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!("Request failed: {}", e);
            eprintln!("{}", user_facing_message(&e.to_string()));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Stderr logging filtered by `-v` (or `RUST_LOG`), plus an optional log file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn context_injector(config: &FileConfig) -> Arc<dyn ContextInjector> {
    if !config.context.enabled {
        return Arc::new(NoContext);
    }
    let loader = LocalContextLoader::discover(config.context.file.as_deref());
    if let Some(source) = loader.source() {
        info!("Injecting context from {}", source.display());
    }
    Arc::new(loader)
}

fn outcome_recorder(config: &FileConfig) -> Arc<dyn OutcomeRecorder> {
    let Some(path) = &config.logging.outcome_log else {
        return Arc::new(NoOutcomeRecorder);
    };
    match JsonlOutcomeLogger::new(path) {
        Some(logger) => {
            info!("Recording outcomes to {}", logger.path().display());
            Arc::new(logger)
        }
        None => {
            warn!("Could not open outcome log {}", path.display());
            Arc::new(NoOutcomeRecorder)
        }
    }
}

fn list_providers(registry: &HttpProviderRegistry) {
    println!("Providers (in registry order):");
    for status in registry.statuses() {
        let mark = if status.available { "READY" } else { "NOKEY" };
        println!(
            "  [{}] {:<12} {:<18} {:<28} key: {}",
            mark,
            status.name,
            status.family.as_str(),
            status.model,
            status.key_source
        );
    }
    if registry.is_empty() {
        println!();
        println!("No provider has a usable API key. Set one of the key variables above.");
    }
}
