//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Crisp chat-platform credentials and dispatch mode.
    pub crisp: CrispConfig,

    /// Supabase backend used by the proxy handlers.
    pub backend: BackendConfig,

    /// Reply generation settings.
    pub reply: ReplyConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Static HTML pages.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// How outbound replies are delivered.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Call the Crisp REST API.
    #[default]
    Crisp,
    /// Log the reply and skip the network call.
    DryRun,
}

/// Crisp REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrispConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_url: String,

    /// Plugin token identifier.
    pub identifier: String,

    /// Plugin token key.
    pub key: String,

    /// Authentication tier sent in `X-Crisp-Tier`.
    pub tier: String,

    pub mode: DispatchMode,
}

impl Default for CrispConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.crisp.chat/v1".to_string(),
            identifier: String::new(),
            key: String::new(),
            tier: "plugin".to_string(),
            mode: DispatchMode::Crisp,
        }
    }
}

impl CrispConfig {
    /// Both halves of the plugin token are present.
    pub fn has_credentials(&self) -> bool {
        !self.identifier.is_empty() && !self.key.is_empty()
    }
}

/// Supabase backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL (e.g., "https://xyz.supabase.co").
    pub url: String,

    /// Anonymous key, used for the password-grant login.
    pub anon_key: String,

    /// Service-role key, used for collection listing.
    pub service_key: String,
}

/// Reply generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// Template for the automatic reply. `{content}` is replaced with the
    /// user's message.
    pub template: String,
}

pub const DEFAULT_REPLY_TEMPLATE: &str =
    "您说：{content}\n\n这是AI自动回复。请替换此函数以集成您的AI模型。";

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_REPLY_TEMPLATE.to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for an inbound request, in seconds.
    pub request_secs: u64,

    /// Total time allowed for one outbound call, in seconds.
    pub upstream_secs: u64,

    /// Outbound connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 60,
            upstream_secs: 30,
            connect_secs: 5,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes (uploads included).
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Static page serving.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub enabled: bool,

    /// Directory holding index.html, login.html and knowledge.html.
    pub root: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root: ".".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
