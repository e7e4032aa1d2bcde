use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness plus a storage round-trip.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db.ping().await {
        Ok(()) => "ok",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": "ok",
        "database": database,
    }))
}
