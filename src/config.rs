//! Relay Configuration

use crate::{RelayError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default static flow pusher endpoint (Floodlight)
pub const DEFAULT_CONTROLLER_URL: &str = "http://127.0.0.1:8080/wm/staticflowpusher/json";

/// Default confidence above which an alert is mitigated
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.9;

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address the alert API binds to
    pub listen_addr: String,
    /// Classifier confidence that must be exceeded to mitigate
    pub confidence_threshold: f64,
    /// SDN controller settings
    pub controller: ControllerConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8081".into(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            controller: ControllerConfig::default(),
        }
    }
}

/// SDN controller endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Flow pusher URL
    pub url: String,
    /// TCP connect timeout; unset leaves the client default
    pub connect_timeout_ms: Option<u64>,
    /// Whole-request timeout; unset leaves the client default
    pub request_timeout_ms: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CONTROLLER_URL.into(),
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }
}

impl ControllerConfig {
    /// Parsed flow pusher URL; only http(s) with a host is accepted
    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| RelayError::Config(format!("controller url {}: {}", self.url, e)))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(RelayError::Config(format!(
                "controller url must be http(s) with a host: {}",
                self.url
            )));
        }

        Ok(url)
    }

    pub(crate) fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub(crate) fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl RelayConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RelayError::Config(e.to_string()))
    }

    /// Reject settings the relay cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.confidence_threshold.is_finite() {
            return Err(RelayError::Config(format!(
                "confidence_threshold must be finite, got {}",
                self.confidence_threshold
            )));
        }

        self.controller.endpoint().map(|_| ())
    }
}
