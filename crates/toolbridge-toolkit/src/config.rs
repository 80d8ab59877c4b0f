use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ToolkitError};
use crate::utils::constant::{
    ENV_PYTHON_INTERPRETER_URL, ENV_REQUEST_TIMEOUT_SECS, ENV_XMOS_RETRIEVER_URL,
};

/// Endpoints and transport settings for the toolkit adapters.
///
/// Every field is optional. A missing endpoint makes the matching tool
/// report itself unavailable instead of failing at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Endpoint receiving `{"code": ...}` POST requests
    #[serde(default)]
    pub python_interpreter_url: Option<String>,
    /// Base URL of the LangServe retriever
    #[serde(default)]
    pub xmos_retriever_url: Option<String>,
    /// Whole-request timeout applied to the shared HTTP client
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Top-level configuration file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    toolkit: ToolkitConfig,
}

impl ToolkitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let request_timeout_secs = match read(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|err| {
                ToolkitError::Config(format!(
                    "{ENV_REQUEST_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}: {err}"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            python_interpreter_url: read(ENV_PYTHON_INTERPRETER_URL),
            xmos_retriever_url: read(ENV_XMOS_RETRIEVER_URL),
            request_timeout_secs,
        })
    }

    /// Load the `[toolkit]` table of a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.toolkit)
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(mut self, other: ToolkitConfig) -> Self {
        if other.python_interpreter_url.is_some() {
            self.python_interpreter_url = other.python_interpreter_url;
        }
        if other.xmos_retriever_url.is_some() {
            self.xmos_retriever_url = other.xmos_retriever_url;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        self
    }

    /// Overlay the process environment on top of this configuration.
    pub fn merge_env(self) -> Result<Self> {
        Ok(self.merge(Self::from_env()?))
    }

    pub fn with_python_interpreter_url(mut self, url: impl Into<String>) -> Self {
        self.python_interpreter_url = Some(url.into());
        self
    }

    pub fn with_xmos_retriever_url(mut self, url: impl Into<String>) -> Self {
        self.xmos_retriever_url = Some(url.into());
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn is_python_interpreter_available(&self) -> bool {
        self.python_interpreter_url.is_some()
    }

    pub fn is_xmos_retriever_available(&self) -> bool {
        self.xmos_retriever_url.is_some()
    }

    /// Parsed interpreter endpoint, `None` when unset.
    pub fn python_interpreter_endpoint(&self) -> Result<Option<Url>> {
        parse_endpoint(ENV_PYTHON_INTERPRETER_URL, self.python_interpreter_url.as_deref())
    }

    /// Parsed retriever base URL, `None` when unset.
    pub fn xmos_retriever_endpoint(&self) -> Result<Option<Url>> {
        parse_endpoint(ENV_XMOS_RETRIEVER_URL, self.xmos_retriever_url.as_deref())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// HTTP client shared by the adapters built from this configuration.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

fn parse_endpoint(name: &str, raw: Option<&str>) -> Result<Option<Url>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let url = Url::parse(raw.trim())
        .map_err(|err| ToolkitError::Config(format!("{name} is not a valid URL ({raw}): {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(ToolkitError::Config(format!(
            "{name} must use http or https, got {other}"
        ))),
    }
}
