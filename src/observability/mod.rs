//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, pipeline, clients produce:
//!     → logging.rs (structured log events, request IDs via TraceLayer span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
