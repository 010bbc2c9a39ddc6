//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError, ValidationWarning};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides, then
/// validation.
///
/// Soft problems (missing credentials) come back alongside the config for the
/// caller to log once logging is up; they do not fail the load.
pub fn load_config(
    path: Option<&Path>,
) -> Result<(RelayConfig, Vec<ValidationWarning>), ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => RelayConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    let warnings = validate_config(&config).map_err(ConfigError::Validation)?;
    Ok((config, warnings))
}

/// Overlay environment variables onto `config`.
///
/// Empty values are ignored so that an exported-but-blank variable does not
/// wipe a value from the config file.
pub fn apply_env<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("CRISP_IDENTIFIER") {
        config.crisp.identifier = v;
    }
    if let Some(v) = get("CRISP_KEY") {
        config.crisp.key = v;
    }
    if let Some(v) = get("CRISP_API_URL") {
        config.crisp.api_url = v;
    }
    if let Some(v) = get("SUPABASE_URL") {
        config.backend.url = v;
    }
    if let Some(v) = get("SUPABASE_ANON_KEY") {
        config.backend.anon_key = v;
    }
    if let Some(v) = get("SUPABASE_SERVICE_ROLE_KEY") {
        config.backend.service_key = v;
    }
    if let Some(port) = get("PORT") {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = RelayConfig::default();
        config.backend.url = "https://from-file.supabase.co".into();

        let vars = env(&[
            ("SUPABASE_URL", "https://from-env.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
            ("CRISP_IDENTIFIER", "ident"),
            ("CRISP_KEY", "secret"),
            ("PORT", "3000"),
        ]);
        apply_env(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.backend.url, "https://from-env.supabase.co");
        assert_eq!(config.backend.service_key, "service");
        assert_eq!(config.crisp.identifier, "ident");
        assert_eq!(config.crisp.key, "secret");
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = RelayConfig::default();
        config.backend.anon_key = "anon".into();

        let vars = env(&[("SUPABASE_ANON_KEY", "")]);
        apply_env(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.backend.anon_key, "anon");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/relay.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
