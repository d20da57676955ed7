//! FLARE LSMA - Alert-Driven Mitigation Relay
//!
//! Receives intrusion alerts over HTTP and turns risky ones into drop rules
//! pushed to an SDN controller's static flow pusher.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            FLARE LSMA RELAY                             │
//! │                                                                         │
//! │   POST /flare/alert                                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ALERT INGESTION (api)                        │   │
//! │  │   Parse | Acknowledge | Log                                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     ALERT EVALUATOR                              │   │
//! │  │   confidence > threshold  OR  FRAG  OR  RST                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ urgent                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                MITIGATION POLICY BUILDER                         │   │
//! │  │   ipv4_src/ipv4_dst match → drop                                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     FLOW PUSHER                                  │   │
//! │  │   POST /wm/staticflowpusher/json (fire and forget)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod alert;
pub mod api;
pub mod config;
pub mod evaluator;
pub mod policy;
pub mod pusher;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

pub use alert::{Alert, AlertFlags};
pub use api::AppState;
pub use config::{ControllerConfig, RelayConfig};
pub use evaluator::{AlertEvaluator, Disposition, RiskSignals};
pub use policy::{FlowRule, MitigationPolicyBuilder};
pub use pusher::{FlowPusher, FlowSink};

/// Relay error types
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound alert is not valid JSON or lacks a required field
    #[error("malformed alert: {0}")]
    MalformedInput(String),
    /// Flow rule could not reach the controller
    #[error("delivery transport failure: {0}")]
    DeliveryTransport(String),
    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),
    /// Listener or server failure
    #[error("network error: {0}")]
    Network(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the relay
pub type Result<T> = std::result::Result<T, RelayError>;

/// Alert relay service
pub struct FlareRelay {
    /// Configuration
    pub config: Arc<RelayConfig>,
    state: AppState,
}

impl FlareRelay {
    /// Create a relay delivering through the configured controller
    pub fn new(config: RelayConfig) -> Result<Self> {
        config.validate()?;
        let pusher = FlowPusher::new(&config.controller)?;
        Ok(Self::with_sink(config, Arc::new(pusher)))
    }

    /// Create a relay delivering through an arbitrary sink
    pub fn with_sink(config: RelayConfig, sink: Arc<dyn FlowSink>) -> Self {
        let state = AppState::new(
            AlertEvaluator::new(config.confidence_threshold),
            MitigationPolicyBuilder::new(),
            sink,
        );
        Self {
            config: Arc::new(config),
            state,
        }
    }

    /// Build the HTTP application
    pub fn app(&self) -> axum::Router {
        api::router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Serve until the shutdown future resolves
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .map_err(|e| RelayError::Config(format!("listen_addr {}: {}", self.config.listen_addr, e)))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        tracing::info!(
            %addr,
            controller = %self.config.controller.url,
            threshold = self.config.confidence_threshold,
            "FLARE LSMA relay listening"
        );

        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RelayError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    struct NullSink;

    #[async_trait::async_trait]
    impl FlowSink for NullSink {
        fn name(&self) -> &str {
            "null"
        }

        async fn push(&self, _rule: &FlowRule) {}
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = RelayConfig::default();
        config.controller.url = "controller:8080".into();
        assert!(matches!(FlareRelay::new(config), Err(RelayError::Config(_))));
    }

    #[tokio::test]
    async fn test_app_serves_ping() {
        let relay = FlareRelay::with_sink(RelayConfig::default(), Arc::new(NullSink));
        let server = TestServer::new(relay.app()).unwrap();
        server.get("/flare/ping").await.assert_text(api::PING_REPLY);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = RelayConfig::default();
        config.listen_addr = "127.0.0.1:0".into();
        let relay = FlareRelay::with_sink(config, Arc::new(NullSink));
        relay.run(async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_rejects_bad_listen_addr() {
        let mut config = RelayConfig::default();
        config.listen_addr = "localhost".into();
        let relay = FlareRelay::with_sink(config, Arc::new(NullSink));
        assert!(matches!(relay.run(async {}).await, Err(RelayError::Config(_))));
    }
}
