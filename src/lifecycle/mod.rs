//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl+C / SIGTERM (signals.rs) ─┐
//!                                ├─→ server stops accepting → in-flight requests drain → exit
//! Shutdown::trigger (tests)  ────┘
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
