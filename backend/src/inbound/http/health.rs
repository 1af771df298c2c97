//! Liveness and readiness probes.
//!
//! The process moves through three phases: starting (live, not yet taking
//! traffic), ready, and draining (both probes fail so the orchestrator
//! drains and restarts it). One atomic carries the phase; probes derive
//! their answers from it.

use actix_web::{HttpResponse, get, http::header, web};
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle phase the process reports to its orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServicePhase {
    /// Booting; live but not yet taking traffic.
    Starting,
    /// Serving traffic.
    Ready,
    /// Shutting down.
    Draining,
}

impl ServicePhase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Ready,
            2 => Self::Draining,
            _ => Self::Starting,
        }
    }
}

/// Shared probe state, one per process.
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(ServicePhase::Starting as u8),
        }
    }
}

impl HealthState {
    /// New state in the starting phase: live, not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the ready phase once initialisation completes.
    pub fn mark_ready(&self) {
        self.phase.store(ServicePhase::Ready as u8, Ordering::Release);
    }

    /// Enter the draining phase so probes fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.phase
            .store(ServicePhase::Draining as u8, Ordering::Release);
    }

    fn phase(&self) -> ServicePhase {
        ServicePhase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Whether the service should receive traffic.
    pub fn is_ready(&self) -> bool {
        self.phase() == ServicePhase::Ready
    }

    /// Whether the process should keep running. False triggers a restart.
    pub fn is_alive(&self) -> bool {
        self.phase() != ServicePhase::Draining
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server process is healthy"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
