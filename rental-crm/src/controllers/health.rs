use rental_core::http::{routing, IntoResponse, Json, Response, Router, State, StatusCode};
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", routing::get(health))
        .route("/health/live", routing::get(live))
}

/// `200 UP` when the database answers, `503 DOWN` otherwise.
async fn health(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "UP", "profile": state.config.profile() })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "DOWN", "reason": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn live() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}
