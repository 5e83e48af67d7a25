use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Request validation errors
    #[error("{message}")]
    Validation { message: String },

    #[error("Missing required parameters: {}", .names.join(", "))]
    MissingParams { names: Vec<String> },

    // Upstream (NBA stats API) errors
    #[error("Request timed out")]
    UpstreamTimeout { url: String },

    #[error("Request failed: {message}")]
    UpstreamTransport { url: String, message: String },

    #[error("NBA API returned status code: {status}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Failed to parse response: {message}")]
    Format { message: String },

    // Startup errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Failed to bind server: {0}")]
    ServerBind(String),
}

impl AppError {
    /// Create a request validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create the validation error returned for a malformed season string
    pub fn invalid_season() -> Self {
        Self::validation("Invalid season format. Use YYYY-YY format (e.g., 2023-24)")
    }

    /// Create a missing parameters error, keeping the caller's ordering
    pub fn missing_params<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingParams {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an upstream timeout error
    pub fn upstream_timeout(url: impl Into<String>) -> Self {
        Self::UpstreamTimeout { url: url.into() }
    }

    /// Create an upstream transport error (connection refused, DNS, etc.)
    pub fn upstream_transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamTransport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an error for a non-200 upstream response
    pub fn upstream_status(status: u16, url: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a response format error
    pub fn format_error(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// HTTP status code this error maps to when it reaches a client.
    ///
    /// Upstream status errors pass the provider's code through; a code outside
    /// the valid HTTP range is reported as 502.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Validation { .. } | AppError::MissingParams { .. } => 400,
            AppError::UpstreamTimeout { .. } => 504,
            AppError::UpstreamStatus { status, .. } if (100..=999).contains(status) => *status,
            AppError::UpstreamStatus { .. } => 502,
            _ => 500,
        }
    }

    /// Check if error was caused by the client's request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::MissingParams { .. }
        )
    }

    /// The upstream URL involved, if any. Logged but never shown to clients.
    pub fn upstream_url(&self) -> Option<&str> {
        match self {
            AppError::UpstreamTimeout { url }
            | AppError::UpstreamTransport { url, .. }
            | AppError::UpstreamStatus { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl warp::reject::Reject for AppError {}
