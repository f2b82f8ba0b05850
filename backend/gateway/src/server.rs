//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use paddock_agent::{ContextStore, Dispatcher};

use crate::session::{DEFAULT_COOKIE_NAME, resolve_session};
use crate::{act_api, data_api, health_api, session_api, simulation_api, speak_api, think_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub store: ContextStore,
    pub dispatcher: Arc<Dispatcher>,
    pub cookie_name: Arc<str>,
}

impl GatewayState {
    pub fn new(store: ContextStore, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            dispatcher: Arc::new(dispatcher),
            cookie_name: Arc::from(DEFAULT_COOKIE_NAME),
        }
    }

    pub fn with_cookie_name(mut self, name: &str) -> Self {
        self.cookie_name = Arc::from(name);
        self
    }
}

/// Build the router. Capability routes run behind session resolution;
/// reference data and health do not need a session.
pub fn build_router(state: GatewayState) -> Router {
    let session_routes = Router::new()
        .route("/speak", post(speak_api::speak))
        .route("/act/post", post(act_api::post))
        .route("/act/reply", post(act_api::reply))
        .route("/act/like", post(act_api::like))
        .route("/act/mention", post(act_api::mention))
        .route("/act/history", get(act_api::history))
        .route("/think/context", get(think_api::context))
        .route("/think/update", post(think_api::update))
        .route("/think/analysis", get(think_api::analysis))
        .route("/think/reset", post(think_api::reset))
        .route("/simulation", post(simulation_api::run))
        .route("/configure", post(session_api::configure))
        .route("/session/export", get(session_api::export))
        .route("/session", delete(session_api::end))
        .route("/api/agent/status", get(session_api::status))
        .route_layer(middleware::from_fn_with_state(state.clone(), resolve_session));

    let public_routes = Router::new()
        .route("/api/health", get(health_api::get_health))
        .route("/api/data/circuits", get(data_api::list_circuits))
        .route("/api/data/circuits/:key", get(data_api::get_circuit))
        .route("/api/data/teams", get(data_api::list_teams));

    session_routes
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the main Axum HTTP server for the gateway.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state).layer(CorsLayer::permissive());

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use paddock_agent::{AgentProfile, FixedEngagement, Speaker};
    use paddock_racing::ScriptedResultPolicy;

    use super::*;

    fn app() -> Router {
        let store = ContextStore::new(AgentProfile {
            championship_position: Some(9),
            ..AgentProfile::default()
        });
        let dispatcher = Dispatcher::new(Speaker::templates_only())
            .with_engagement(Arc::new(FixedEngagement(777)))
            .with_results(Arc::new(ScriptedResultPolicy::new(vec![5, 4, 3, 2, 1])));
        build_router(GatewayState::new(store, dispatcher))
    }

    fn request(method: &str, uri: &str, session: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-session-id", session);
        match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn speak_returns_envelope() {
        let app = app();
        let (status, json) = send(
            &app,
            request("POST", "/speak", "s1", Some(json!({"message_type": "status_update"}))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message_type"], "status_update");
        let message = json["message"].as_str().unwrap();
        assert!(!message.is_empty() && message.chars().count() <= 280);
    }

    #[tokio::test]
    async fn unknown_message_type_is_unprocessable() {
        let app = app();
        let (status, json) = send(
            &app,
            request("POST", "/speak", "s1", Some(json!({"message_type": "haiku"}))),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert_eq!(json["kind"], "generation");
        assert!(json["error"].as_str().unwrap().contains("haiku"));

        let (status, json) = send(
            &app,
            request("POST", "/speak", "s1", Some(json!({"message_type": ""}))),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["kind"], "generation");

        let (status, json) = send(&app, request("POST", "/speak", "s1", Some(json!({})))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message_type"], "post");
    }

    #[tokio::test]
    async fn update_then_context_round() {
        let app = app();
        let (status, json) = send(
            &app,
            request("POST", "/think/update", "s2", Some(json!({"mood": "ecstatic"}))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["updates"], json!({"mood": "ecstatic"}));

        let (_, first) = send(&app, request("GET", "/think/context", "s2", None)).await;
        let (_, second) = send(&app, request("GET", "/think/context", "s2", None)).await;
        assert_eq!(first, second);
        assert_eq!(first["context"]["mood"], "ecstatic");

        let (_, other) = send(&app, request("GET", "/think/context", "s3", None)).await;
        assert_eq!(other["context"]["mood"], "neutral");

        let (status, json) = send(
            &app,
            request(
                "POST",
                "/think/update",
                "s2",
                Some(json!({"circuit": "monza", "session": "race"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["updates"],
            json!({"current_circuit": "monza", "current_session": "race"})
        );
        let (_, after) = send(&app, request("GET", "/think/context", "s2", None)).await;
        assert_eq!(after["context"]["current_session"], "race");
        assert_eq!(after["context"]["phase"], first["context"]["phase"]);
    }

    #[tokio::test]
    async fn empty_update_is_bad_request() {
        let app = app();
        let (status, json) =
            send(&app, request("POST", "/think/update", "s1", Some(json!({})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/act/post")
            .header("x-session-id", "s1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, json) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation");
    }

    #[tokio::test]
    async fn act_routes_record_history() {
        let app = app();
        let (_, post) = send(
            &app,
            request("POST", "/act/post", "s4", Some(json!({"content": "Lights out!"}))),
        )
        .await;
        assert_eq!(post["engagement"], 777);

        let (_, like) = send(
            &app,
            request("POST", "/act/like", "s4", Some(json!({"post_content": "Nice overtake"}))),
        )
        .await;
        assert_eq!(like["liked_post"], "Nice overtake");

        let (_, mention) = send(
            &app,
            request("POST", "/act/mention", "s4", Some(json!({"person_name": "Zak Brown"}))),
        )
        .await;
        assert_eq!(mention["context"], "general");
        assert!(mention["content"].as_str().unwrap().contains("Zak Brown"));

        let (_, reply) = send(
            &app,
            request(
                "POST",
                "/act/reply",
                "s4",
                Some(json!({"fan_comment": "Worst strategy ever, terrible"})),
            ),
        )
        .await;
        assert_eq!(reply["sentiment"], "negative");

        let (_, history) =
            send(&app, request("GET", "/act/history?limit=2", "s4", None)).await;
        let actions = history["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1]["kind"], "reply");

        let (_, status) = send(&app, request("GET", "/api/agent/status", "s4", None)).await;
        assert_eq!(status["configured"], true);
        assert_eq!(status["actions_performed"], 4);
    }

    #[tokio::test]
    async fn simulation_runs_full_weekend() {
        let app = app();
        let (status, json) = send(
            &app,
            request(
                "POST",
                "/simulation",
                "s5",
                Some(json!({"circuit_key": "silverstone", "weekend_type": "standard"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let sessions = json["results"]["sessions"].as_array().unwrap();
        let names: Vec<&str> = sessions.iter().map(|s| s["session"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["fp1", "fp2", "fp3", "qualifying", "race"]);
        assert_eq!(json["results"]["final_tier"], "podium");

        let (status, json) = send(
            &app,
            request(
                "POST",
                "/simulation",
                "s5",
                Some(json!({"circuit_key": "nowhere", "weekend_type": "standard"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn new_clients_get_a_cookie() {
        let app = app();
        let req = Request::builder()
            .uri("/think/context")
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        let cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("paddock_session="));

        let pair = cookie.split(';').next().unwrap().to_string();
        let req = Request::builder()
            .uri("/api/agent/status")
            .header(header::COOKIE, pair)
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert!(res.headers().get(header::SET_COOKIE).is_none());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["configured"], true);
    }

    #[tokio::test]
    async fn configure_reset_export_and_end() {
        let app = app();
        let (status, json) = send(
            &app,
            request(
                "POST",
                "/configure",
                "s6",
                Some(json!({"driver_name": "George Russell", "team_key": "mercedes"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["team_name"], "Mercedes-AMG Petronas F1 Team");
        assert_eq!(json["circuit"], "Silverstone Circuit");

        let (status, _) = send(
            &app,
            request("POST", "/configure", "s6", Some(json!({"team_key": "brabham"}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(&app, request("POST", "/speak", "s6", Some(json!({})))).await;
        let (_, export) = send(&app, request("GET", "/session/export", "s6", None)).await;
        assert_eq!(export["export"]["conversation_memory"].as_array().unwrap().len(), 1);

        let (_, reset) = send(&app, request("POST", "/think/reset", "s6", None)).await;
        assert_eq!(reset["context"]["driver_name"], "George Russell");
        assert_eq!(reset["context"]["activity"]["messages_spoken"], 0);

        let (_, analysis) = send(&app, request("GET", "/think/analysis", "s6", None)).await;
        assert_eq!(analysis["analysis"]["performance_trend"], "stable");

        let (_, ended) = send(&app, request("DELETE", "/session", "s6", None)).await;
        assert_eq!(ended["ended"], true);
        let (_, status) = send(&app, request("GET", "/api/agent/status", "s6", None)).await;
        assert_eq!(status["configured"], false);
    }

    #[tokio::test]
    async fn reference_data_is_raw() {
        let app = app();
        let (status, circuits) = send(&app, request("GET", "/api/data/circuits", "x", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(circuits.get("success").is_none());
        assert_eq!(circuits["monaco"]["country"], "Monaco");
        assert_eq!(circuits.as_object().unwrap().len(), 24);

        let (_, teams) = send(&app, request("GET", "/api/data/teams", "x", None)).await;
        assert_eq!(teams["ferrari"]["short_name"], "Ferrari");

        let (_, monza) = send(&app, request("GET", "/api/data/circuits/monza", "x", None)).await;
        assert_eq!(monza["name"], "Autodromo Nazionale di Monza");

        let (status, json) =
            send(&app, request("GET", "/api/data/circuits/atlantis", "x", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);

        let (_, health) = send(&app, request("GET", "/api/health", "x", None)).await;
        assert_eq!(health["status"], "ok");
    }
}
