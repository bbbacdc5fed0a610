//! HTTP API for running probes.

mod api;
mod error;
mod handlers;
#[allow(clippy::module_inception)]
mod server;

pub use api::{ErrorResponse, ProbeQuery, NDJSON_CONTENT_TYPE};
pub use error::{ApiError, ServerError};
pub use handlers::{get_health, get_probe_latency, get_probe_route, AppState};
pub use server::{create_router, ProbeServer};
