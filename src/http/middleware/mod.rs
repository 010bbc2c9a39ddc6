//! Request middleware for the browser-facing API.
//!
//! ```text
//! /api/* request
//!     → track.rs (request counter and latency, every outcome)
//!     → cors.rs (headers on every response, OPTIONS answered here)
//!     → credential.rs (protected routes only: Bearer gate)
//!     → handler
//! ```

pub mod cors;
pub mod credential;
pub mod track;

pub use cors::cors;
pub use credential::{optional_bearer, require_bearer, Credential};
pub use track::track_requests;
