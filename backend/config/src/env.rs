//! Environment handling for config values.
//!
//! Two passes run at load time:
//! - `${VAR_NAME}` substitution inside string values. Only uppercase
//!   `[A-Z_][A-Z0-9_]*` names are matched and `$${VAR}` escapes to a
//!   literal `${VAR}`.
//! - Well-known variables (`PADDOCK_PORT`, `MISTRAL_API_KEY`, ...) that
//!   override whatever the file says.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::schema::{AgentConfig, LlmConfig, LoggingConfig, PaddockConfig, ServerConfig};

/// `${VAR}` with an optional leading `$` marking an escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid regex"));

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree using the
/// provided environment map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Collect all env var names referenced in a config value tree (for diagnostics).
pub fn collect_referenced_vars(value: &Value) -> Vec<String> {
    let mut vars = Vec::new();
    collect_vars_recursive(value, &mut vars);
    vars.sort();
    vars.dedup();
    vars
}

fn collect_vars_recursive(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            for caps in ENV_VAR_PATTERN.captures_iter(s) {
                if caps[1].is_empty() {
                    out.push(caps[2].to_string());
                }
            }
        }
        Value::Array(arr) => arr.iter().for_each(|v| collect_vars_recursive(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_vars_recursive(v, out)),
        _ => {}
    }
}

/// Apply `PADDOCK_*` and `MISTRAL_*` overrides from a provided map.
pub fn apply_env_overrides_with(
    mut config: PaddockConfig,
    env: &HashMap<String, String>,
) -> PaddockConfig {
    let get = |key: &str| {
        env.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| {
                debug!(var = key, "Config overridden from environment");
                v.to_string()
            })
    };

    if let Some(bind) = get("PADDOCK_BIND") {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind);
    }
    if let Some(port) = get("PADDOCK_PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.server.get_or_insert_with(ServerConfig::default).port = Some(port),
            Err(_) => warn!(value = %port, "Ignoring PADDOCK_PORT: not a port number"),
        }
    }
    if let Some(level) = get("PADDOCK_LOG_LEVEL") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    if let Some(dir) = get("PADDOCK_LOG_DIR") {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir);
    }
    if let Some(name) = get("PADDOCK_DRIVER_NAME") {
        config.agent.get_or_insert_with(AgentConfig::default).driver_name = Some(name);
    }
    if let Some(key) = get("MISTRAL_API_KEY") {
        config.llm.get_or_insert_with(LlmConfig::default).api_key = Some(key);
    }
    if let Some(url) = get("MISTRAL_BASE_URL") {
        config.llm.get_or_insert_with(LlmConfig::default).base_url = Some(url);
    }
    if let Some(model) = get("MISTRAL_MODEL") {
        config.llm.get_or_insert_with(LlmConfig::default).model = Some(model);
    }
    config
}
