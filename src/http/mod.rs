//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, shared layers: request id, trace, timeout, body limit)
//!     → /api/*            → middleware (CORS, bearer gate) → handlers/{auth,knowledge}.rs
//!     → /crisp/message    → handlers/webhook.rs → webhook pipeline
//!     → /, /login, /knowledge → static_pages.rs
//!     → response.rs (relay backend status + body)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod static_pages;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
