//! Readiness and liveness probes.
//!
//! Orchestrators poll `/health/ready` to decide when to route traffic and
//! `/health/live` to decide when to restart the process. Both probes answer
//! from shared atomic flags and send `Cache-Control: no-store` so no
//! intermediary serves a stale verdict.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::StatusCode, http::header, web};

/// Probe flags shared between the server lifecycle and the health handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl HealthState {
    /// Start live but not ready. Readiness is flipped by the server once the
    /// listener is bound.
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    /// Flip the readiness flag once the service can take traffic.
    pub fn mark_ready(&self) {
        // The flags publish no associated data, so relaxed ordering suffices.
        self.ready.store(true, Ordering::Relaxed);
    }

    /// Clear the liveness flag so probes fail fast while draining.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Relaxed);
    }

    /// Current readiness flag.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    /// Current liveness flag. False turns `/health/live` into 503 so the
    /// orchestrator restarts the process.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

fn verdict(healthy: bool) -> HttpResponse {
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponseBuilder::new(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the server accepts traffic, 503 before that.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Ready to accept traffic"),
        (status = 503, description = "Still starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    verdict(state.is_ready())
}

/// Liveness probe: 200 while the process is healthy, 503 once draining.
/// Call [`HealthState::mark_unhealthy`] ahead of graceful shutdown so the
/// drain is visible before the listener closes.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is healthy"),
        (status = 503, description = "Process is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    verdict(state.is_alive())
}
