//! HTTP handlers for the probe API.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use super::api::{ProbeQuery, NDJSON_CONTENT_TYPE};
use super::ApiError;
use crate::config::AppConfig;
use crate::exec::{
    collect_command, stream_command, write_json_line, ChannelSink, DiagnosticCommand, ExecError,
    BODY_CHANNEL_CAPACITY,
};
use crate::parser::ErrorEvent;
use crate::probe::ProbeKind;
use crate::target::is_valid_target;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable process-wide configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create app state from a configuration.
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

/// GET /health - Liveness check.
pub async fn get_health() -> &'static str {
    "ok"
}

/// GET /probe-latency - Ping the target.
///
/// # Errors
///
/// Returns `ApiError` for an invalid target or, in buffered mode, a failed run.
pub async fn get_probe_latency(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    run_probe(&state, ProbeKind::Latency, &ProbeQuery::from_pairs(pairs)).await
}

/// GET /probe-route - Trace the route to the target.
///
/// # Errors
///
/// Returns `ApiError` for an invalid target or, in buffered mode, a failed run.
pub async fn get_probe_route(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    run_probe(&state, ProbeKind::Route, &ProbeQuery::from_pairs(pairs)).await
}

async fn run_probe(
    state: &AppState,
    kind: ProbeKind,
    query: &ProbeQuery,
) -> Result<Response, ApiError> {
    let target = query.target();
    if !is_valid_target(target) {
        tracing::warn!(probe = %kind, host = %target, "Rejected invalid target");
        return Err(ApiError::InvalidTarget);
    }

    let command = kind.command(&state.config.tools, target);
    tracing::info!(
        probe = %kind,
        host = %target,
        streaming = query.is_streaming(),
        "Running probe"
    );

    if query.is_streaming() {
        return Ok(stream_response(state, kind, command));
    }

    let deadline = state.config.server.request_timeout();
    let Ok(result) = tokio::time::timeout(deadline, collect_command(&command, &kind.parser())).await
    else {
        tracing::warn!(probe = %kind, ?deadline, "Probe exceeded request deadline");
        return Err(ApiError::Timeout);
    };
    let events = result.inspect_err(|e| log_failure(kind, e))?;
    Ok(Json(events).into_response())
}

/// Exit failures are ordinary outcomes for an unreachable host.
fn log_failure(kind: ProbeKind, error: &ExecError) {
    if error.is_exit_failure() {
        tracing::info!(probe = %kind, error = %error, "Probe tool exited unsuccessfully");
    } else {
        tracing::warn!(probe = %kind, error = %error, "Probe failed");
    }
}

/// Start the probe in the background and return an NDJSON body fed by it.
///
/// Headers are committed before the process starts, so failures after this
/// point can only end the stream. A spawn failure is reported as one error
/// line first.
fn stream_response(state: &AppState, kind: ProbeKind, command: DiagnosticCommand) -> Response {
    let (sink, rx) = ChannelSink::new(BODY_CHANNEL_CAPACITY);
    let deadline = state.config.server.request_timeout();

    tokio::spawn(async move {
        let mut error_sink = sink.clone();
        let run = stream_command(&command, kind.parser(), sink);

        match tokio::time::timeout(deadline, run).await {
            Ok(Ok(())) => tracing::debug!(probe = %kind, "Stream completed"),
            Ok(Err(ExecError::Spawn(e))) => {
                tracing::warn!(probe = %kind, error = %e, "Failed to start probe");
                let event = ErrorEvent::new(e.to_string());
                if let Err(e) = write_json_line(&mut error_sink, &event).await {
                    tracing::debug!(error = %e, "Client gone before spawn error was sent");
                }
            }
            Ok(Err(e)) => log_failure(kind, &e),
            Err(_) => tracing::warn!(probe = %kind, ?deadline, "Stream exceeded request deadline"),
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));
    (
        [
            (header::CONTENT_TYPE, NDJSON_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}
