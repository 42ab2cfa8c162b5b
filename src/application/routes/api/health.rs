use axum::Json;
use serde_json::{Value, json};

/// Liveness probe: always `{"ok": true}`.
pub(crate) async fn liveness() -> Json<Value> {
    Json(json!({ "ok": true }))
}
