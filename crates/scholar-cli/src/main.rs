mod cli;
mod commands;
mod repl;

use std::process::ExitCode;
use std::sync::Arc;

use scholar_client::{ApiClient, CredentialStore, FileStore, KeyValueStore, MemoryStore};
use scholar_common::ScholarError;
use scholar_config::{LogLevel, ScholarConfig};
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

/// `--log-level` accepts a bare level or a full directive.
fn log_directive(flag: Option<&str>, config: &ScholarConfig) -> String {
    let Some(flag) = flag else {
        return config.logging.level.directive();
    };
    let level = match flag.to_ascii_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    };
    level.map_or_else(|| flag.to_string(), |level| level.directive())
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(LogLevel::Info.directive()))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn credential_store(config: &ScholarConfig) -> CredentialStore {
    let backing: Arc<dyn KeyValueStore> = match config.storage.resolve_directory() {
        Some(dir) => {
            tracing::debug!("Credential storage: {}", dir.display());
            Arc::new(FileStore::new(dir))
        }
        None => {
            tracing::warn!("No data directory available, credentials will not persist");
            Arc::new(MemoryStore::new())
        }
    };
    CredentialStore::load(backing)
}

async fn run(args: cli::Args, config: ScholarConfig) -> Result<(), ScholarError> {
    let credentials = credential_store(&config);
    let api = ApiClient::new(config.api.clone(), credentials)?;
    let ctx = Context {
        api,
        config,
        json: args.json,
    };
    commands::run(args.command, &ctx).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // An explicit config path must load; the default one falls back.
    let loaded = scholar_config::load_config(args.config.as_deref());
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) if args.config.is_some() => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => (ScholarConfig::default(), Some(e)),
    };

    init_logging(&log_directive(args.log_level.as_deref(), &config));
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::debug!(base_url = %config.api.base_url, "Scholar v{} starting", env!("CARGO_PKG_VERSION"));

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
