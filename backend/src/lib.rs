//! Blog entry catalogue backend.
//!
//! Hexagonal layout: `domain` owns the types, services and ports; `inbound`
//! and `outbound` hold the adapters; `middleware` carries request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
