//! HTTP service
//!
//! Routes:
//! - `POST /api/chat`: transcript in, assistant reply with extracted blocks out
//! - `POST /api/generate`: structured code request, same reply shape
//! - `GET /api/templates`: prompt template catalog
//! - `GET /health`

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::ai::SharedProvider;
use crate::config::ServerConfig;
use crate::types::{CodeweaveError, Result};

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub provider: SharedProvider,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(provider: SharedProvider, server: ServerConfig) -> Self {
        Self {
            provider,
            server: Arc::new(server),
        }
    }
}

pub fn create_app(state: AppState) -> Result<Router> {
    let cors = match state.server.cors_origin.as_deref() {
        Some(origin) if origin != "*" => {
            let origin = origin.parse::<HeaderValue>().map_err(|e| {
                CodeweaveError::Config(format!("Invalid CORS origin '{}': {}", origin, e))
            })?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/generate", post(handlers::chat::generate))
        .route("/templates", get(handlers::templates::list_templates))
}

/// Bind and serve
pub async fn serve(state: AppState) -> Result<()> {
    let address = state.server.bind_address();
    let provider = state.provider.name().to_string();
    let model = state.provider.model().to_string();
    let app = create_app(state)?;

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{} ({} / {})", address, provider, model);
    log_routes();

    axum::serve(listener, app)
        .await
        .map_err(|e| CodeweaveError::Server(e.to_string()))?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  POST /api/chat       - Chat completion with code block extraction");
    info!("  POST /api/generate   - Structured code generation request");
    info!("  GET  /api/templates  - Prompt template catalog");
    info!("  GET  /health         - Health check");
}
