//! `paddock-config`: Paddock runtime configuration.
//!
//! Provides:
//! - Typed config schema (server, llm, agent persona, sessions, logging)
//! - YAML loading with a first-run fallback to defaults
//! - `${ENV_VAR}` substitution and `PADDOCK_*` / `MISTRAL_*` overrides
//! - Default value application
//! - Validation with errors and warnings
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides_with, collect_referenced_vars, resolve_env_vars_with, MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, default_config_path, load_config};
pub use redact::{redact, redacted_config};
pub use schema::{
    AgentConfig, LlmConfig, LoggingConfig, PaddockConfig, ServerConfig, SessionConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use paddock_core::PaddockError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime. Any
/// validation error aborts; warnings are only logged.
pub async fn load_and_prepare(path: &Path) -> Result<PaddockConfig> {
    let raw_config = load_config(path).await?;
    prepare(raw_config, &std::env::vars().collect())
}

/// The pure half of [`load_and_prepare`], with an explicit environment.
pub fn prepare(raw_config: PaddockConfig, env: &HashMap<String, String>) -> Result<PaddockConfig> {
    let (config, report) = resolve(raw_config, env)?;
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.first() {
        return Err(PaddockError::ConfigError(format!(
            "{} config error(s); first: {}",
            report.errors.len(),
            first
        ))
        .into());
    }
    Ok(config)
}

/// Substitute, override, and default, then validate without failing on
/// validation errors. Used by diagnostics that want the whole report.
pub fn resolve(
    raw_config: PaddockConfig,
    env: &HashMap<String, String>,
) -> Result<(PaddockConfig, ValidationReport)> {
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    let referenced = collect_referenced_vars(&value);
    if !referenced.is_empty() {
        tracing::debug!(vars = ?referenced, "Config references env vars");
    }
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: PaddockConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(apply_env_overrides_with(config, env));
    let report = validate(&config);
    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prepare_runs_the_whole_pipeline() {
        let raw: PaddockConfig = serde_yaml::from_str(
            "llm:\n  apiKey: \"${MY_KEY}\"\nagent:\n  team: ferrari\n",
        )
        .unwrap();
        let cfg = prepare(raw, &env(&[("MY_KEY", "k-1"), ("PADDOCK_PORT", "7000")])).unwrap();
        assert_eq!(cfg.llm.as_ref().unwrap().api_key.as_deref(), Some("k-1"));
        assert_eq!(cfg.server.as_ref().unwrap().port, Some(7000));
        assert_eq!(cfg.agent.as_ref().unwrap().circuit.as_deref(), Some("silverstone"));
    }

    #[test]
    fn validation_errors_abort() {
        let raw: PaddockConfig = serde_yaml::from_str("agent:\n  circuit: nowhere\n").unwrap();
        let err = prepare(raw, &HashMap::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PaddockError>(),
            Some(PaddockError::ConfigError(_))
        ));
        assert!(err.to_string().contains("agent.circuit"));
    }

    #[test]
    fn resolve_reports_instead_of_failing() {
        let raw: PaddockConfig = serde_yaml::from_str("server:\n  port: 0\n").unwrap();
        let (cfg, report) = resolve(raw, &HashMap::new()).unwrap();
        assert_eq!(cfg.server.unwrap().port, Some(0));
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn load_and_prepare_missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_and_prepare(&dir.path().join("config.yaml")).await.unwrap();
        assert_eq!(cfg.session.unwrap().cookie_name.as_deref(), Some("paddock_session"));
    }
}
