use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::server::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "codeweave",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider.name(),
        "model": state.provider.model(),
    }))
}
