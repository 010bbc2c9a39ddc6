//! Supabase backend integration.
//!
//! The relay never interprets backend payloads; it only needs to know where
//! each call goes and which credential it carries.

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{BackendError, LoginRequest, UpstreamResponse};
