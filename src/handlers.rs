use crate::config::Config;
use crate::services::WhoIsService;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Name lookup pipeline against the CCB API.
    pub who_is: WhoIsService,
}

/// Incoming `/WhoIs` body posted by the chat integration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WhoIsRequest {
    #[serde(default)]
    pub name: String,
}

/// Outgoing `/WhoIs` body.
///
/// `name` carries the transcoded person record as a JSON string. Empty fields
/// are omitted, so a failure only carries `error`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WhoIsResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "ccb-whois",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /WhoIs
///
/// Looks a person up in CCB by name and returns the record as a JSON string.
/// Lookup failures are reported in the `error` field with `200 OK` unless
/// strict status codes are enabled.
pub async fn who_is(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WhoIsRequest>,
) -> (StatusCode, Json<WhoIsResponse>) {
    tracing::info!("POST /WhoIs");
    tracing::debug!("WhoIs lookup for {:?}", request.name);

    match state.who_is.who_is(&request.name).await {
        Ok(record) => (
            StatusCode::OK,
            Json(WhoIsResponse {
                name: record,
                error: String::new(),
            }),
        ),
        Err(e) => {
            let status = if state.config.strict_status_codes {
                e.status_code()
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(WhoIsResponse {
                    name: String::new(),
                    error: e.to_string(),
                }),
            )
        }
    }
}
