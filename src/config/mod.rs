use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
///
/// Resolved in layers: optional TOML file, then environment variables, then
/// validation. Only the API key has no default.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Key for the NBA stats API. Required.
    pub api_key: String,
    /// Base URL of the stats API, without a trailing endpoint.
    pub api_base_url: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Secret key. Defaults to "dev".
    pub secret_key: String,
    /// Database URL. Accepted for compatibility, not used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Timeout in seconds for each upstream request. Defaults to 10 seconds.
    pub http_timeout_seconds: u64,
    /// Upstream calls allowed per second, per operation.
    pub calls_per_second: f64,
    /// Season used when a request does not specify one.
    pub default_season: String,
    /// Path to the log file. If not specified, logs go to the default log directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            api_base_url: constants::DEFAULT_API_BASE_URL.to_string(),
            port: constants::DEFAULT_PORT,
            secret_key: constants::DEFAULT_SECRET_KEY.to_string(),
            database_url: None,
            http_timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            calls_per_second: constants::DEFAULT_CALLS_PER_SECOND,
            default_season: constants::DEFAULT_SEASON.to_string(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file and the process environment.
    ///
    /// If `config_path` is given the file must exist. Otherwise the default
    /// config location is used when a file is present there, and defaults apply
    /// when it is not.
    ///
    /// # Environment Variables
    /// - `NBA_API_KEY` - API key (required unless set in the file)
    /// - `DATABASE_URL` - Database URL (unused)
    /// - `PORT` - Listening port (default: 5000)
    /// - `SECRET_KEY` - Secret key (default: "dev")
    /// - `NBA_API_BASE_URL` - Override upstream base URL
    /// - `NBA_API_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `NBA_API_CALLS_PER_SECOND` - Upstream calls per second (default: 1)
    /// - `NBA_DEFAULT_SEASON` - Season used when a request omits one (default: 2023-24)
    /// - `NBA_PROXY_LOG_FILE` - Override log file path
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(AppError)` - Missing API key, unreadable file or invalid values
    pub async fn load(config_path: Option<&str>) -> Result<Self, AppError> {
        let base = match config_path {
            Some(path) => Self::load_from_path(path).await?,
            None => {
                let default_path = get_config_path();
                if Path::new(&default_path).exists() {
                    Self::load_from_path(&default_path).await?
                } else {
                    Config::default()
                }
            }
        };

        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Loads configuration from a TOML file without applying the environment.
    /// Keys missing from the file keep their defaults.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`, then validates.
    ///
    /// Empty values are treated as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = var(env_vars::API_KEY) {
            self.api_key = api_key;
        }
        if let Some(database_url) = var(env_vars::DATABASE_URL) {
            self.database_url = Some(database_url);
        }
        if let Some(port) = var(env_vars::PORT) {
            self.port = parse_env(env_vars::PORT, &port)?;
        }
        if let Some(secret_key) = var(env_vars::SECRET_KEY) {
            self.secret_key = secret_key;
        }
        if let Some(api_base_url) = var(env_vars::API_BASE_URL) {
            self.api_base_url = api_base_url;
        }
        if let Some(timeout) = var(env_vars::HTTP_TIMEOUT) {
            self.http_timeout_seconds = parse_env(env_vars::HTTP_TIMEOUT, &timeout)?;
        }
        if let Some(rate) = var(env_vars::CALLS_PER_SECOND) {
            self.calls_per_second = parse_env(env_vars::CALLS_PER_SECOND, &rate)?;
        }
        if let Some(season) = var(env_vars::DEFAULT_SEASON) {
            self.default_season = season;
        }
        if let Some(log_file_path) = var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Prints the resolved configuration to stdout with secrets masked.
    pub fn display(&self) {
        let log_dir = get_log_dir_path();

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{}", get_config_path());
        println!("────────────────────────────────────");
        println!("API Base URL:");
        println!("{}", self.api_base_url);
        println!("API Key:");
        println!("{}", mask_secret(&self.api_key));
        println!("────────────────────────────────────");
        println!("Port:");
        println!("{}", self.port);
        println!("Secret Key:");
        println!("{}", mask_secret(&self.secret_key));
        println!("Database URL:");
        println!(
            "{}",
            if self.database_url.is_some() {
                "(set)"
            } else {
                "(not set)"
            }
        );
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", self.http_timeout_seconds);
        println!("Rate Limit:");
        println!("{} calls/second per operation", self.calls_per_second);
        println!("Default Season:");
        println!("{}", self.default_season);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", constants::DEFAULT_LOG_FILE_NAME);
            println!("(Default location)");
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config_error(format!("Invalid value for {key}: '{value}'")))
}

/// Keeps the first four characters of a secret and masks the rest
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_api_key() {
        let config = Config::default()
            .with_env_overrides(env(&[("NBA_API_KEY", "abc123")]))
            .unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.port, 5000);
        assert_eq!(config.secret_key, "dev");
        assert_eq!(config.database_url, None);
        assert_eq!(config.api_base_url, "https://stats.nba.com/stats");
        assert_eq!(config.http_timeout_seconds, 10);
        assert_eq!(config.calls_per_second, 1.0);
        assert_eq!(config.default_season, "2023-24");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let error = Config::default().with_env_overrides(env(&[])).unwrap_err();
        assert!(matches!(error, AppError::Config(_)));
        assert!(error.to_string().contains("NBA_API_KEY"));
    }

    #[test]
    fn test_empty_api_key_is_treated_as_missing() {
        let result = Config::default().with_env_overrides(env(&[("NBA_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_env_overrides(env(&[
                ("NBA_API_KEY", "key"),
                ("PORT", "8080"),
                ("SECRET_KEY", "s3cret"),
                ("DATABASE_URL", "postgres://localhost/nba"),
                ("NBA_API_BASE_URL", "http://localhost:9000"),
                ("NBA_API_TIMEOUT", "3"),
                ("NBA_API_CALLS_PER_SECOND", "2.5"),
                ("NBA_DEFAULT_SEASON", "2022-23"),
                ("NBA_PROXY_LOG_FILE", "/tmp/nba/proxy.log"),
            ]))
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/nba")
        );
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.http_timeout_seconds, 3);
        assert_eq!(config.calls_per_second, 2.5);
        assert_eq!(config.default_season, "2022-23");
        assert_eq!(config.log_file_path.as_deref(), Some("/tmp/nba/proxy.log"));
    }

    #[test]
    fn test_unparsable_port_is_rejected() {
        let error = Config::default()
            .with_env_overrides(env(&[("NBA_API_KEY", "key"), ("PORT", "http")]))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid value for PORT: 'http'"
        );
    }

    #[test]
    fn test_invalid_default_season_is_rejected() {
        let result = Config::default().with_env_overrides(env(&[
            ("NBA_API_KEY", "key"),
            ("NBA_DEFAULT_SEASON", "2023"),
        ]));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_from_path_partial_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_key = "file-key"
port = 6000
calls_per_second = 0.5
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.port, 6000);
        assert_eq!(config.calls_per_second, 0.5);
        assert_eq!(config.secret_key, "dev");
        assert_eq!(config.default_season, "2023-24");
    }

    #[tokio::test]
    async fn test_env_overrides_file_values() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        tokio::fs::write(&config_path, "api_key = \"file-key\"\nport = 6000\n")
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap()
            .with_env_overrides(env(&[("PORT", "7000")]))
            .unwrap();

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.port, 7000);
    }

    #[tokio::test]
    async fn test_load_missing_explicit_path_fails() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let result = Config::load(Some(&missing.to_string_lossy())).await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_invalid_toml_fails() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "port = \"not a number\"")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result, Err(AppError::TomlDeserialize(_))));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "abcd****");
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret(""), "****");
    }
}
