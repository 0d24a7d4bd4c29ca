use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// GET /api/health
/// Returns a status object with the current UTC time.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}
