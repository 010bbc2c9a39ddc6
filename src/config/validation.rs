//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Report missing credentials without refusing to start
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Missing credentials are warnings: unrelated routes keep serving

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{DispatchMode, RelayConfig};

/// A configuration problem that prevents startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidUrl { field: &'static str, value: String },
    ZeroTimeout(&'static str),
    ZeroBodyLimit,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::InvalidUrl { field, value } => {
                write!(f, "{} is not a valid URL: '{}'", field, value)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "timeouts.{} must be > 0", field),
            ValidationError::ZeroBodyLimit => write!(f, "security.max_body_size must be > 0"),
        }
    }
}

/// A configuration gap that is logged but tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    MissingBackendUrl,
    MissingServiceKey,
    MissingAnonKey,
    MissingCrispCredentials,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationWarning::MissingBackendUrl => "SUPABASE_URL not set",
            ValidationWarning::MissingServiceKey => "SUPABASE_SERVICE_ROLE_KEY not set",
            ValidationWarning::MissingAnonKey => "SUPABASE_ANON_KEY not set",
            ValidationWarning::MissingCrispCredentials => {
                "CRISP_IDENTIFIER or CRISP_KEY not set; replies will fail"
            }
        };
        f.write_str(msg)
    }
}

/// Validate a configuration. Ok carries the tolerated warnings.
pub fn validate_config(
    config: &RelayConfig,
) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Url::parse(&config.crisp.api_url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "crisp.api_url",
            value: config.crisp.api_url.clone(),
        });
    }

    if config.backend.url.is_empty() {
        warnings.push(ValidationWarning::MissingBackendUrl);
    } else if Url::parse(&config.backend.url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "backend.url",
            value: config.backend.url.clone(),
        });
    }

    if config.backend.service_key.is_empty() {
        warnings.push(ValidationWarning::MissingServiceKey);
    }
    if config.backend.anon_key.is_empty() {
        warnings.push(ValidationWarning::MissingAnonKey);
    }
    if config.crisp.mode == DispatchMode::Crisp && !config.crisp.has_credentials() {
        warnings.push(ValidationWarning::MissingCrispCredentials);
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("request_secs", timeouts.request_secs),
        ("upstream_secs", timeouts.upstream_secs),
        ("connect_secs", timeouts.connect_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> RelayConfig {
        let mut config = RelayConfig::default();
        config.backend.url = "https://project.supabase.co".into();
        config.backend.anon_key = "anon".into();
        config.backend.service_key = "service".into();
        config.crisp.identifier = "ident".into();
        config.crisp.key = "key".into();
        config
    }

    #[test]
    fn test_complete_config_has_no_warnings() {
        assert_eq!(validate_config(&complete_config()), Ok(vec![]));
    }

    #[test]
    fn test_missing_backend_is_only_a_warning() {
        let mut config = complete_config();
        config.backend.url.clear();
        config.backend.service_key.clear();

        let warnings = validate_config(&config).unwrap();
        assert!(warnings.contains(&ValidationWarning::MissingBackendUrl));
        assert!(warnings.contains(&ValidationWarning::MissingServiceKey));
    }

    #[test]
    fn test_dry_run_does_not_need_crisp_credentials() {
        let mut config = complete_config();
        config.crisp.identifier.clear();
        config.crisp.mode = DispatchMode::DryRun;
        assert_eq!(validate_config(&config), Ok(vec![]));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = complete_config();
        config.listener.bind_address = "not-an-address".into();
        config.backend.url = "::nope".into();
        config.timeouts.upstream_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream_secs")));
    }
}
