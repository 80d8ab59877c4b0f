use reqwest::StatusCode;
use thiserror::Error;
use toolbridge::core::tool::ToolCallError;

/// Failures raised by toolkit adapters.
///
/// `Config` is fatal and reported before any network traffic. `Transport` and
/// `Status` cover the outbound call itself, while `MalformedResponse` and
/// `Json` mean the upstream answered with something that could not be
/// reshaped. None of them are retried.
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned status {status} with body: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Tool not found: {0}")]
    UnknownTool(String),
}

impl ToolkitError {
    /// True for errors caused by missing or invalid configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, ToolkitError::Config(_) | ToolkitError::Toml(_))
    }

    /// True for failures of the outbound call (network or HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ToolkitError::Transport(_) | ToolkitError::Status { .. }
        )
    }
}

impl From<ToolkitError> for ToolCallError {
    fn from(err: ToolkitError) -> Self {
        ToolCallError::RuntimeError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
