//! Wiring: turns a prepared [`PaddockConfig`] into the agent's runtime parts.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use paddock_agent::{AgentProfile, ContextStore, Dispatcher, Speaker};
use paddock_config::defaults::{
    DEFAULT_BIND, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
};
use paddock_config::PaddockConfig;
use paddock_core::TeamKey;
use paddock_providers::{
    LlmTextGenerator, MistralProvider, MockProvider, ProviderRegistry, SamplingConfig,
};

/// How often the idle-session sweeper runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub fn collaborator_timeout(config: &PaddockConfig) -> Duration {
    let secs = config
        .llm
        .as_ref()
        .and_then(|l| l.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Every provider the config makes available, keyed by name.
pub fn build_registry(config: &PaddockConfig) -> Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    registry.register("mock", Arc::new(MockProvider::new("mock")));

    let llm = config.llm.clone().unwrap_or_default();
    if let Some(api_key) = llm.api_key.filter(|k| !k.trim().is_empty()) {
        let mut provider = MistralProvider::new(api_key, collaborator_timeout(config))?;
        if let Some(url) = &llm.base_url {
            provider = provider.with_base_url(url);
        }
        registry.register("mistral", Arc::new(provider));
        info!("Registered Mistral provider");
    }
    Ok(registry)
}

/// The speaker for the configured provider. Falls back to templates when
/// the provider is `templates` or has no credentials.
pub fn build_speaker(config: &PaddockConfig) -> Result<Speaker> {
    let llm = config.llm.clone().unwrap_or_default();
    let wanted = llm.provider.as_deref().unwrap_or("mistral");
    if wanted == "templates" {
        return Ok(Speaker::templates_only());
    }

    let registry = build_registry(config)?;
    let Some(provider) = registry.get(wanted) else {
        warn!(provider = wanted, available = ?registry.list(), "Provider unavailable; using templates");
        return Ok(Speaker::templates_only());
    };

    let defaults = SamplingConfig::default();
    let sampling = SamplingConfig {
        model: llm.model.unwrap_or(defaults.model),
        max_tokens: llm.max_tokens.unwrap_or(defaults.max_tokens),
        temperature: llm.temperature.unwrap_or(defaults.temperature),
        top_p: llm.top_p.or(defaults.top_p),
    };
    let generator = LlmTextGenerator::new(provider, sampling);
    Ok(Speaker::new(Arc::new(generator), collaborator_timeout(config)))
}

pub fn build_dispatcher(config: &PaddockConfig) -> Result<Dispatcher> {
    let speaker = build_speaker(config)?;
    Ok(Dispatcher::new(speaker).with_classifier_timeout(collaborator_timeout(config)))
}

/// The persona new sessions start from.
pub fn agent_profile(config: &PaddockConfig) -> Result<AgentProfile> {
    let mut profile = AgentProfile::default();
    let Some(agent) = &config.agent else {
        return Ok(profile);
    };
    if let Some(name) = &agent.driver_name {
        profile.driver_name = name.clone();
    }
    if let Some(team) = &agent.team {
        profile.team = team.parse::<TeamKey>().context("agent.team")?;
    }
    if let Some(circuit) = &agent.circuit {
        profile.circuit = circuit.clone();
    }
    if let Some(limit) = agent.history_limit {
        profile.history_limit = limit;
    }
    Ok(profile)
}

pub fn listen_addr(config: &PaddockConfig, port_override: Option<u16>) -> Result<SocketAddr> {
    let server = config.server.clone().unwrap_or_default();
    let bind = server.bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
    let port = port_override.or(server.port).unwrap_or(DEFAULT_PORT);
    format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {bind}:{port}"))
}

/// Build the store, start its idle sweeper, and return it.
pub fn start_store(config: &PaddockConfig) -> Result<ContextStore> {
    let store = ContextStore::new(agent_profile(config)?);
    let idle = config
        .session
        .as_ref()
        .and_then(|s| s.idle_timeout_secs)
        .unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS);
    store.spawn_sweeper(SWEEP_INTERVAL, Duration::from_secs(idle));
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_config::{AgentConfig, LlmConfig, ServerConfig};

    fn with_llm(llm: LlmConfig) -> PaddockConfig {
        PaddockConfig {
            llm: Some(llm),
            ..Default::default()
        }
    }

    #[test]
    fn no_key_means_templates() {
        let speaker = build_speaker(&PaddockConfig::default()).unwrap();
        assert_eq!(speaker.primary_name(), "templates");
    }

    #[test]
    fn mock_provider_is_always_available() {
        let speaker = build_speaker(&with_llm(LlmConfig {
            provider: Some("mock".into()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(speaker.primary_name(), "mock");
    }

    #[tokio::test]
    async fn api_key_registers_mistral() {
        let config = with_llm(LlmConfig {
            api_key: Some("k".into()),
            base_url: Some("http://localhost:9/v1".into()),
            ..Default::default()
        });
        assert_eq!(build_registry(&config).unwrap().list(), vec!["mistral", "mock"]);
        assert_eq!(build_speaker(&config).unwrap().primary_name(), "mistral");
    }

    #[test]
    fn profile_follows_agent_section() {
        let config = PaddockConfig {
            agent: Some(AgentConfig {
                driver_name: Some("Sam Racer".into()),
                team: Some("ferrari".into()),
                circuit: Some("monza".into()),
                history_limit: Some(5),
            }),
            ..Default::default()
        };
        let profile = agent_profile(&config).unwrap();
        assert_eq!(profile.driver_name, "Sam Racer");
        assert_eq!(profile.team, TeamKey::Ferrari);
        assert_eq!(profile.circuit, "monza");
        assert_eq!(profile.history_limit, 5);
    }

    #[test]
    fn port_flag_wins() {
        let config = PaddockConfig {
            server: Some(ServerConfig {
                bind: Some("0.0.0.0".into()),
                port: Some(5000),
            }),
            ..Default::default()
        };
        assert_eq!(listen_addr(&config, Some(6000)).unwrap().port(), 6000);
        assert_eq!(listen_addr(&config, None).unwrap().to_string(), "0.0.0.0:5000");
    }
}
