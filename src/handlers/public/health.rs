// handlers/public/health.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::types::HealthStatus;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Digital Desk API",
        "version": version,
        "description": "Tasks, articles, YouTube links and images, per user",
        "endpoints": {
            "health": "/api/health (public)",
            "users": "/api/users/register, /api/users/login (public), /api/users/profile (protected)",
            "todos": "/api/todos[/:id[/toggle]] (protected)",
        }
    }))
}

/// GET /health - liveness, including a probe of the item store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.items.backend().to_string();

    match state.items.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok".to_string(),
                message: "Todo App Backend is running!".to_string(),
                store,
                timestamp: Utc::now(),
            }),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "degraded".to_string(),
                    message: "Item store is not reachable".to_string(),
                    store,
                    timestamp: Utc::now(),
                }),
            )
        }
    }
}
