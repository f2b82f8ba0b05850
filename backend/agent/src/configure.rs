//! Explicit agent configuration for a session.

use serde::{Deserialize, Serialize};

use paddock_core::{Result, TeamKey, WeekendType};
use paddock_racing::{require_circuit, team};

use crate::store::{AgentProfile, ContextStore};

/// Client-chosen persona. Omitted or blank fields fall back to the
/// store's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigureRequest {
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub team_key: Option<String>,
    #[serde(default)]
    pub circuit_key: Option<String>,
    #[serde(default)]
    pub weekend_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configured {
    pub driver_name: String,
    pub team_name: String,
    pub circuit: String,
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ConfigureRequest {
    /// Validate the request into a profile and weekend format.
    pub fn resolve(&self, defaults: &AgentProfile) -> Result<(AgentProfile, WeekendType)> {
        let team = provided(&self.team_key)
            .map(str::parse::<TeamKey>)
            .transpose()?
            .unwrap_or(defaults.team);
        let circuit = match provided(&self.circuit_key) {
            Some(key) => require_circuit(key)?.key.to_string(),
            None => defaults.circuit.clone(),
        };
        let weekend_type = provided(&self.weekend_type)
            .map(str::parse::<WeekendType>)
            .transpose()?
            .unwrap_or_default();
        let driver_name = provided(&self.driver_name)
            .map(str::to_string)
            .unwrap_or_else(|| defaults.driver_name.clone());

        Ok((
            AgentProfile {
                driver_name,
                team,
                circuit,
                ..defaults.clone()
            },
            weekend_type,
        ))
    }
}

impl ContextStore {
    /// Replace the session with one built from `request`.
    pub async fn apply_configuration(&self, id: &str, request: &ConfigureRequest) -> Result<Configured> {
        let (profile, weekend_type) = request.resolve(self.defaults())?;
        let shared = self.configure(id, &profile).await;
        let mut session = shared.lock().await;
        session.context.weekend_type = weekend_type;

        let circuit = require_circuit(&session.context.current_circuit)?;
        Ok(Configured {
            driver_name: session.context.driver_name.clone(),
            team_name: team(session.context.team).name.to_string(),
            circuit: circuit.name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::PaddockError;

    fn store() -> ContextStore {
        ContextStore::new(AgentProfile {
            championship_position: Some(3),
            ..AgentProfile::default()
        })
    }

    #[tokio::test]
    async fn configures_from_request() {
        let store = store();
        let request = ConfigureRequest {
            driver_name: Some("Lewis Hamilton".into()),
            team_key: Some("ferrari".into()),
            circuit_key: Some("monza".into()),
            weekend_type: Some("sprint_weekend".into()),
        };
        let configured = store.apply_configuration("s", &request).await.unwrap();
        assert_eq!(configured.team_name, "Scuderia Ferrari");
        assert_eq!(configured.driver_name, "Lewis Hamilton");

        let session = store.get("s").await.unwrap();
        let session = session.lock().await;
        assert_eq!(session.context.teammate, "Charles Leclerc");
        assert_eq!(session.context.current_circuit, "monza");
        assert_eq!(session.context.weekend_type, WeekendType::Sprint);
    }

    #[tokio::test]
    async fn blank_fields_use_defaults() {
        let configured = store()
            .apply_configuration("s", &ConfigureRequest::default())
            .await
            .unwrap();
        assert_eq!(configured.driver_name, "Alex Driver");
        assert_eq!(configured.team_name, "McLaren F1 Team");
        assert_eq!(configured.circuit, "Silverstone Circuit");
    }

    #[tokio::test]
    async fn unknown_team_is_rejected() {
        let store = store();
        let request = ConfigureRequest {
            team_key: Some("brabham".into()),
            ..ConfigureRequest::default()
        };
        let err = store.apply_configuration("s", &request).await.unwrap_err();
        assert!(matches!(err, PaddockError::Validation(_)));
        assert!(store.get("s").await.is_none());
    }
}
