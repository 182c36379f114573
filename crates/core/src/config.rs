//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables;
//! the upstream credential in particular is injected so the suggestion pipeline can be driven
//! deterministically in tests.

use crate::constants::{DEFAULT_INFERENCE_URL, DEFAULT_UPSTREAM_TIMEOUT, PLACEHOLDER_API_KEY};
use crate::{CoreError, CoreResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "HF_API_KEY";
/// Environment variable overriding the inference endpoint.
pub const INFERENCE_URL_ENV: &str = "LEADFLOW_INFERENCE_URL";
/// Environment variable overriding the upstream deadline, in whole seconds.
pub const UPSTREAM_TIMEOUT_ENV: &str = "LEADFLOW_UPSTREAM_TIMEOUT_SECS";
/// Environment variable pointing at a directory with `leads.json` and `analytics.json`.
pub const FIXTURE_DIR_ENV: &str = "LEADFLOW_FIXTURE_DIR";

/// State of the upstream credential.
#[derive(Clone, PartialEq, Eq)]
pub enum UpstreamCredential {
    /// Unset, empty or whitespace-only.
    Missing,
    /// The sample-file sentinel value.
    Placeholder,
    Present(String),
}

impl UpstreamCredential {
    /// Classify a raw configuration value.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_string()) {
            None => Self::Missing,
            Some(v) if v.is_empty() => Self::Missing,
            Some(v) if v == PLACEHOLDER_API_KEY => Self::Placeholder,
            Some(v) => Self::Present(v),
        }
    }

    /// The key, if one can actually be sent upstream.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Present(key) => Some(key),
            Self::Missing | Self::Placeholder => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key().is_some()
    }
}

// Keeps the key out of logs.
impl fmt::Debug for UpstreamCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("Missing"),
            Self::Placeholder => f.write_str("Placeholder"),
            Self::Present(_) => f.write_str("Present(<redacted>)"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    credential: UpstreamCredential,
    inference_url: String,
    upstream_timeout: Duration,
    fixture_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfig` if the inference URL is not an http(s) URL or the
    /// timeout is zero.
    pub fn new(
        credential: UpstreamCredential,
        inference_url: String,
        upstream_timeout: Duration,
        fixture_dir: Option<PathBuf>,
    ) -> CoreResult<Self> {
        let url = inference_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CoreError::InvalidConfig(format!(
                "inference URL must be http(s): {url:?}"
            )));
        }
        if upstream_timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "upstream timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            credential,
            inference_url: url.to_string(),
            upstream_timeout,
            fixture_dir,
        })
    }

    /// Resolve every setting from the process environment.
    ///
    /// Intended to be called once from a binary's `main`.
    pub fn from_env() -> CoreResult<Self> {
        Self::new(
            UpstreamCredential::from_env_value(std::env::var(API_KEY_ENV).ok()),
            inference_url_from_env_value(std::env::var(INFERENCE_URL_ENV).ok()),
            upstream_timeout_from_env_value(std::env::var(UPSTREAM_TIMEOUT_ENV).ok())?,
            fixture_dir_from_env_value(std::env::var(FIXTURE_DIR_ENV).ok()),
        )
    }

    pub fn credential(&self) -> &UpstreamCredential {
        &self.credential
    }

    pub fn inference_url(&self) -> &str {
        &self.inference_url
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }

    pub fn fixture_dir(&self) -> Option<&Path> {
        self.fixture_dir.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Use the override if present, otherwise the default endpoint.
pub fn inference_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string())
}

/// Parse the upstream deadline from an optional string of whole seconds.
///
/// If `value` is `None` or empty/whitespace, returns the default deadline.
pub fn upstream_timeout_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(DEFAULT_UPSTREAM_TIMEOUT);
    };
    let secs: u64 = raw.parse().map_err(|_| {
        CoreError::InvalidConfig(format!("{UPSTREAM_TIMEOUT_ENV} must be whole seconds: {raw:?}"))
    })?;
    Ok(Duration::from_secs(secs))
}

pub fn fixture_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    non_blank(value).map(PathBuf::from)
}
