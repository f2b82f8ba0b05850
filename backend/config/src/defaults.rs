//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{
    AgentConfig, LlmConfig, LoggingConfig, PaddockConfig, ServerConfig, SessionConfig,
};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_PROVIDER: &str = "mistral";
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_DRIVER_NAME: &str = "Alex Driver";
pub const DEFAULT_TEAM: &str = "mclaren";
pub const DEFAULT_CIRCUIT: &str = "silverstone";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

pub const DEFAULT_COOKIE_NAME: &str = "paddock_session";
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 3600;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PaddockConfig) -> PaddockConfig {
    let config = apply_server_defaults(config);
    let config = apply_llm_defaults(config);
    let config = apply_agent_defaults(config);
    let config = apply_session_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: PaddockConfig) -> PaddockConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    config
}

fn apply_llm_defaults(mut config: PaddockConfig) -> PaddockConfig {
    let llm = config.llm.get_or_insert_with(LlmConfig::default);
    llm.provider.get_or_insert_with(|| DEFAULT_PROVIDER.to_string());
    llm.base_url.get_or_insert_with(|| DEFAULT_BASE_URL.to_string());
    llm.model.get_or_insert_with(|| DEFAULT_MODEL.to_string());
    llm.max_tokens.get_or_insert(DEFAULT_MAX_TOKENS);
    llm.temperature.get_or_insert(DEFAULT_TEMPERATURE);
    llm.top_p.get_or_insert(DEFAULT_TOP_P);
    llm.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    config
}

fn apply_agent_defaults(mut config: PaddockConfig) -> PaddockConfig {
    let agent = config.agent.get_or_insert_with(AgentConfig::default);
    agent.driver_name.get_or_insert_with(|| DEFAULT_DRIVER_NAME.to_string());
    agent.team.get_or_insert_with(|| DEFAULT_TEAM.to_string());
    agent.circuit.get_or_insert_with(|| DEFAULT_CIRCUIT.to_string());
    agent.history_limit.get_or_insert(DEFAULT_HISTORY_LIMIT);
    config
}

fn apply_session_defaults(mut config: PaddockConfig) -> PaddockConfig {
    let session = config.session.get_or_insert_with(SessionConfig::default);
    session.cookie_name.get_or_insert_with(|| DEFAULT_COOKIE_NAME.to_string());
    session.idle_timeout_secs.get_or_insert(DEFAULT_IDLE_TIMEOUT_SECS);
    config
}

fn apply_logging_defaults(mut config: PaddockConfig) -> PaddockConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}
