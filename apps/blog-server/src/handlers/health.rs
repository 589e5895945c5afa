//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: StorageHealth,
    pub timestamp: String,
}

/// Result of reading the post store once.
#[derive(Serialize)]
pub struct StorageHealth {
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint - reads the store and reports whether it answered.
///
/// GET /api/health. 200 when the store is readable, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backend = state.posts.backend();
    let (status, storage) = match state.posts.list().await {
        Ok(posts) => (
            "ok",
            StorageHealth {
                backend,
                posts: Some(posts.len()),
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(backend, error = %e, "Health check could not read the post store");
            (
                "degraded",
                StorageHealth {
                    backend,
                    posts: None,
                    error: Some(e.to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if status == "ok" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
