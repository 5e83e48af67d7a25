use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// NBA Stats Proxy
///
/// Serves a small REST API in front of stats.nba.com. Upstream result sets are
/// reshaped into lists of records and each upstream operation is throttled to a
/// configurable number of calls per second.
///
/// Configuration is read from a TOML file (see --config), then from environment
/// variables. NBA_API_KEY must be set.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Read configuration from this TOML file instead of the default location.
    #[arg(long = "config", value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<String>,

    /// List current configuration settings (secrets masked) and exit.
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Port to listen on. Overrides PORT and the config file.
    #[arg(long = "port", short = 'p', help_heading = "Server")]
    pub port: Option<u16>,

    /// Enable debug logging, including rate limiter waits and upstream response details.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
