//! Alert Intake API
//!
//! `GET /flare/ping` and `POST /flare/alert`. The acknowledgment only means
//! the alert was received and evaluated; controller delivery failures are
//! logged and never reach the submitter.

use crate::alert::Alert;
use crate::evaluator::{AlertEvaluator, Disposition};
use crate::policy::MitigationPolicyBuilder;
use crate::pusher::FlowSink;
use crate::{RelayError, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Liveness reply
pub const PING_REPLY: &str = "FLARE LSMA Controller is alive!";

/// Shared request pipeline, read-only
#[derive(Clone)]
pub struct AppState {
    evaluator: AlertEvaluator,
    builder: MitigationPolicyBuilder,
    sink: Arc<dyn FlowSink>,
}

impl AppState {
    /// Assemble the pipeline
    pub fn new(
        evaluator: AlertEvaluator,
        builder: MitigationPolicyBuilder,
        sink: Arc<dyn FlowSink>,
    ) -> Self {
        Self {
            evaluator,
            builder,
            sink,
        }
    }
}

/// Build the `/flare` router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/flare",
            Router::new()
                .route("/ping", get(ping))
                .route("/alert", post(receive_alert)),
        )
        .with_state(state)
}

/// Liveness check
pub async fn ping() -> &'static str {
    PING_REPLY
}

/// Receive, evaluate and (maybe) mitigate one alert
pub async fn receive_alert(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<String> {
    // unreadable or oversized bodies are reported like any other bad document
    let body = body
        .map_err(|e| RelayError::MalformedInput(e.body_text()))
        .map_err(log_rejected)?;
    let alert = Alert::from_slice(&body).map_err(log_rejected)?;

    tracing::info!(
        alert_id = %alert.alert_id,
        confidence = alert.classifier_confidence,
        frag = alert.flags.frag,
        rst = alert.flags.rst,
        syn = alert.flags.syn,
        fin = alert.flags.fin,
        protocol = alert.protocol.as_deref().unwrap_or("-"),
        recommended = alert.recommended_action.as_deref().unwrap_or("-"),
        timestamp = alert.timestamp.as_deref().unwrap_or("-"),
        "Received alert"
    );

    match state.evaluator.evaluate(alert.signals()) {
        Disposition::Urgent => {
            let (src, dst) = alert.endpoints().map_err(log_rejected)?;
            tracing::warn!(
                alert_id = %alert.alert_id,
                %src,
                %dst,
                sink = state.sink.name(),
                "Installing mitigation"
            );

            let rule = state.builder.build(src, dst);
            state.sink.push(&rule).await;
        }
        Disposition::Routine => {
            tracing::info!(
                alert_id = %alert.alert_id,
                threshold = state.evaluator.threshold(),
                "Routine alert, no mitigation"
            );
        }
    }

    Ok(format!("Alert processed: {}", alert.alert_id))
}

fn log_rejected(e: RelayError) -> RelayError {
    tracing::warn!(error = %e, "Error parsing alert JSON");
    e
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::MalformedInput(_) => (StatusCode::BAD_REQUEST, "Invalid JSON").into_response(),
            other => {
                tracing::error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
