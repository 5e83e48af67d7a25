use std::path::PathBuf;

use crate::constants::APP_DIR_NAME;

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_DIR_NAME: &str = "logs";

/// Per-user application directory, `<config dir>/nba_stats_proxy`.
/// Relative to the working directory when the platform has no config dir.
fn app_dir() -> PathBuf {
    app_dir_under(dirs::config_dir())
}

fn app_dir_under(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Default location of `config.toml`
pub fn get_config_path() -> String {
    app_dir().join(CONFIG_FILE_NAME).to_string_lossy().into_owned()
}

/// Directory for rolling log files when no log file path is configured
pub fn get_log_dir_path() -> String {
    app_dir().join(LOG_DIR_NAME).to_string_lossy().into_owned()
}
