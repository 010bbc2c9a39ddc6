//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! relay.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (CRISP_*, SUPABASE_*, PORT)
//!     → validation.rs (semantic checks, warnings for missing credentials)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BackendConfig, CrispConfig, DispatchMode, ListenerConfig, LogFormat, ObservabilityConfig,
    RelayConfig, ReplyConfig, TimeoutConfig,
};
