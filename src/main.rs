// src/main.rs
mod cli;
mod logging;

use clap::Parser;
use cli::Args;
use logging::setup_logging;
use nba_stats_proxy::config::Config;
use nba_stats_proxy::error::AppError;
use nba_stats_proxy::server::{AppState, serve};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // A .env file is optional; real environment variables take precedence
    let env_file_error = dotenv_error(dotenvy::dotenv());

    // Load config first to fail early if NBA_API_KEY is missing
    let mut config = Config::load(args.config.as_deref()).await?;
    if let Some(port) = args.port {
        config.port = port;
    }

    if args.list_config {
        if let Some(e) = &env_file_error {
            eprintln!("Warning: ignoring unreadable .env file: {e}");
        }
        config.display();
        return Ok(());
    }

    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");
    if let Some(e) = &env_file_error {
        tracing::warn!("Ignoring unreadable .env file: {e}");
    }
    tracing::info!(
        "Upstream: {} (timeout {}s, {} calls/s per operation, default season {})",
        config.api_base_url,
        config.http_timeout_seconds,
        config.calls_per_second,
        config.default_season
    );

    let state = AppState::from_config(&config)?;
    serve(state, config.port).await
}

/// A missing .env file is fine; anything else is reported once logging is up
fn dotenv_error<T>(result: dotenvy::Result<T>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_dotenv_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = dotenvy::from_path(dir.path().join(".env"));
        assert!(dotenv_error(result).is_none());
    }

    #[test]
    fn test_malformed_dotenv_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NBA_PROXY_TEST_VALUE='unterminated").unwrap();

        let result = dotenvy::from_path(file.path());
        assert!(dotenv_error(result).is_some());
    }
}
