use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::infrastructure::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Backend is running" }))
}
