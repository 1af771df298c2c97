//! Razewatch portal service library.
//!
//! Administrative portal for a municipal building-demolition supervision
//! programme. The portal owns no business state: it holds the session,
//! derives role-aware navigation chrome, and guards pages whose data comes
//! from the upstream programme backend.
//!
//! Layered hexagonally: `domain` is transport agnostic, `inbound::http`
//! adapts it to Actix handlers, `outbound` reaches the upstream REST
//! backend, and `server` wires the application together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-tracing middleware attached to every response.
pub use middleware::Trace;
