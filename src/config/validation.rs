use super::Config;
use crate::constants::env_vars;
use crate::error::AppError;
use crate::validators::validate_season_format;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API key cannot be empty
/// - API base URL must start with http:// or https://
/// - HTTP timeout must be at least one second
/// - Calls per second must be a positive, finite number
/// - Default season must have the YYYY-YY form
/// - If log file path is provided, it cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "Environment variable {} is not set",
            env_vars::API_KEY
        )));
    }

    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://")
    {
        return Err(AppError::config_error(
            "API base URL must start with http:// or https://",
        ));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if !config.calls_per_second.is_finite() || config.calls_per_second <= 0.0 {
        return Err(AppError::config_error(
            "Calls per second must be a positive number",
        ));
    }

    if !validate_season_format(&config.default_season) {
        return Err(AppError::config_error(format!(
            "Default season '{}' must use YYYY-YY format (e.g., 2023-24)",
            config.default_season
        )));
    }

    if let Some(log_path) = &config.log_file_path
        && log_path.trim().is_empty()
    {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    Ok(())
}
