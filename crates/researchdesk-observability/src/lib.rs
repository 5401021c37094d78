//! ResearchDesk Observability
//!
//! - Structured logging via `tracing` (console plus rolling JSON files)
//! - Prometheus metrics for HTTP traffic and permission lookups
//! - Request logging middleware
//!
//! The whole stack can be left out at compile time by disabling the
//! `observability` feature. At runtime metrics are controlled by
//! `METRICS_ENABLED`.
//!
//! # Examples
//!
//! ```no_run
//! use researchdesk_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     let _metrics = init_metrics();
//! }
//! ```

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use self::logging::{init_cli_logging, init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, is_metrics_enabled, metrics_middleware, track_access_check,
    track_permission_change,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// Stand-in for the Prometheus handle; renders nothing.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    impl PrometheusHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn is_metrics_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {}

    pub fn init_cli_logging() {}

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn track_access_check(_access_level: &'static str) {}
    pub fn track_permission_change(_operation: &'static str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
