//! HTTP API gateway for the Health & Hygiene chatbot.
//!
//! Exposes the ping, chat, history and reset endpoints over JSON.
//!
//! Built on Axum for high performance async HTTP.

pub mod api;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use hygienebot_config::AppConfig;
use hygienebot_core::{
    ConversationStore, InMemoryConversationStore, PatternError, PatternTable, Responder,
};

/// Shared application state for the gateway.
pub struct AppState {
    /// Name reported by `/ping`.
    pub bot_name: String,
    /// User identifier for chat requests that omit one.
    pub default_user_id: String,
    pub max_body_bytes: usize,
    pub responder: Responder,
    pub store: Arc<dyn ConversationStore>,
}

impl AppState {
    pub fn new(config: &AppConfig, responder: Responder, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            bot_name: config.bot.name.clone(),
            default_user_id: config.bot.default_user_id.clone(),
            max_body_bytes: config.gateway.max_body_bytes,
            responder,
            store,
        }
    }

    /// State with the built-in pattern table and an empty in-memory store.
    pub fn from_config(config: &AppConfig) -> Result<Self, PatternError> {
        let table = Arc::new(PatternTable::builtin()?);
        Ok(Self::new(
            config,
            Responder::new(table),
            Arc::new(InMemoryConversationStore::new()),
        ))
    }
}

pub type SharedState = Arc<AppState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - Request body size limit (`gateway.max_body_bytes`)
/// - CORS open to any origin, with credentials
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/ping", get(api::ping_handler))
        .route("/chat", post(api::chat_handler))
        .route("/history/{user_id}", get(api::history_handler))
        .route("/reset/{user_id}", delete(api::reset_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for browser front-ends.
///
/// A literal `*` cannot be combined with credentials, so origin, methods and
/// headers are mirrored from the request instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Start the gateway HTTP server and run until Ctrl-C.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::from_config(&config)?);

    info!(
        topics = state.responder.table().len(),
        store = state.store.name(),
        "Chatbot state ready"
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        Arc::new(AppState::from_config(&AppConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn ping_endpoint() {
        let app = build_router(test_state());

        let req = Request::builder().uri("/ping").body(Body::empty()).unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn preflight_mirrors_origin_and_allows_credentials() {
        let app = build_router(test_state());

        let req = Request::builder()
            .method("OPTIONS")
            .uri("/chat")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-client")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "content-type,x-client"
        );
    }

    #[tokio::test]
    async fn simple_request_carries_cors_headers() {
        let app = build_router(test_state());

        let req = Request::builder()
            .uri("/ping")
            .header(header::ORIGIN, "https://example.org")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://example.org"
        );
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = build_router(test_state());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
