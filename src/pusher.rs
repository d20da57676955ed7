//! Flow Pusher
//!
//! Delivers flow rules to the SDN controller. Delivery is call-and-forget:
//! any HTTP status counts as delivered and is only logged; transport
//! failures are logged as errors and swallowed. Nothing is retried.

use crate::config::ControllerConfig;
use crate::policy::FlowRule;
use crate::{RelayError, Result};
use reqwest::{StatusCode, Url};

/// Destination for mitigation rules
#[async_trait::async_trait]
pub trait FlowSink: Send + Sync {
    /// Sink name for logs
    fn name(&self) -> &str;

    /// Deliver a rule; outcome is observed by logging only
    async fn push(&self, rule: &FlowRule);
}

/// Static flow pusher REST client
pub struct FlowPusher {
    url: Url,
    client: reqwest::Client,
}

impl FlowPusher {
    /// Create a client for the configured controller
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        let url = config.endpoint()?;

        // No idle pool: the connection is closed after every attempt.
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RelayError::Config(format!("controller client: {}", e)))?;

        Ok(Self { url, client })
    }

    /// Controller endpoint
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POST the rule and return whatever status the controller answered with
    pub async fn deliver(&self, rule: &FlowRule) -> Result<StatusCode> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(rule)
            .send()
            .await
            .map_err(|e| RelayError::DeliveryTransport(e.to_string()))?;

        Ok(resp.status())
    }
}

#[async_trait::async_trait]
impl FlowSink for FlowPusher {
    fn name(&self) -> &str {
        "staticflowpusher"
    }

    async fn push(&self, rule: &FlowRule) {
        match self.deliver(rule).await {
            Ok(status) => {
                tracing::info!(
                    status = status.as_u16(),
                    src = %rule.ipv4_src,
                    dst = %rule.ipv4_dst,
                    "FlowPusher response: HTTP {}",
                    status.as_u16()
                );
            }
            Err(e) => {
                tracing::error!(url = %self.url(), error = %e, "Error pushing flow");
            }
        }
    }
}
