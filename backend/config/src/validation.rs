//! Config validation: checks with user-friendly error messages.

use crate::schema::PaddockConfig;
use paddock_core::TeamKey;
use thiserror::Error;

pub const KNOWN_PROVIDERS: &[&str] = &["mistral", "mock", "templates"];
const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &PaddockConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_llm(config, &mut report);
    validate_agent(config, &mut report);
    validate_session(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &PaddockConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if server.port == Some(0) {
        report.error("server.port", "Port must be between 1 and 65535");
    }
    if let Some(bind) = &server.bind {
        if bind.trim().is_empty() {
            report.error("server.bind", "Bind address must not be empty");
        }
    }
}

fn validate_llm(config: &PaddockConfig, report: &mut ValidationReport) {
    let Some(llm) = &config.llm else { return };

    let provider = llm.provider.as_deref().unwrap_or("mistral");
    if !KNOWN_PROVIDERS.contains(&provider) {
        report.error(
            "llm.provider",
            format!(
                "Unknown provider '{provider}'; expected one of {}",
                KNOWN_PROVIDERS.join(", ")
            ),
        );
    }
    let has_key = llm.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
    if provider == "mistral" && !has_key {
        report.warn(
            "llm.apiKey",
            "No API key configured; messages will come from templates",
        );
    }

    if let Some(t) = llm.temperature {
        if !(0.0..=2.0).contains(&t) {
            report.error("llm.temperature", "Temperature must be between 0.0 and 2.0");
        }
    }
    if let Some(p) = llm.top_p {
        if !(p > 0.0 && p <= 1.0) {
            report.error("llm.topP", "topP must be in (0.0, 1.0]");
        }
    }
    if llm.max_tokens == Some(0) {
        report.error("llm.maxTokens", "maxTokens must be positive");
    }
    if llm.timeout_secs == Some(0) {
        report.error("llm.timeoutSecs", "timeoutSecs must be positive");
    }
    if let Some(url) = &llm.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("llm.baseUrl", "baseUrl must be an http(s) URL");
        }
    }
}

fn validate_agent(config: &PaddockConfig, report: &mut ValidationReport) {
    let Some(agent) = &config.agent else { return };
    if let Some(team) = &agent.team {
        if team.parse::<TeamKey>().is_err() {
            report.error("agent.team", format!("Unknown team '{team}'"));
        }
    }
    if let Some(circuit) = &agent.circuit {
        if paddock_racing::circuit(circuit).is_none() {
            report.error("agent.circuit", format!("Unknown circuit '{circuit}'"));
        }
    }
    if let Some(name) = &agent.driver_name {
        if name.trim().is_empty() {
            report.error("agent.driverName", "Driver name must not be empty");
        }
    }
    if agent.history_limit == Some(0) {
        report.error("agent.historyLimit", "historyLimit must be positive");
    }
}

fn validate_session(config: &PaddockConfig, report: &mut ValidationReport) {
    let Some(session) = &config.session else { return };
    if let Some(name) = &session.cookie_name {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            report.error(
                "session.cookieName",
                "Cookie name may only contain letters, digits, '_' and '-'",
            );
        }
    }
    if session.idle_timeout_secs == Some(0) {
        report.error("session.idleTimeoutSecs", "idleTimeoutSecs must be positive");
    }
}

fn validate_logging(config: &PaddockConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        // Full EnvFilter directives like "paddock_agent=debug" are allowed.
        let plain = !level.contains('=') && !level.contains(',');
        if plain && !KNOWN_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.warn("logging.level", format!("Unrecognized log level '{level}'"));
        }
    }
}
