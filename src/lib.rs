//! Crisp webhook relay and Supabase proxy library.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod webhook;

pub use config::RelayConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
