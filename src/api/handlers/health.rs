//! # Health Check Handler
//!
//! برای بررسی سلامت سرویس

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::AppState;

/// پاسخ health check
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,

    /// تعداد redirect‌های لود شده
    pub redirects: usize,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy(redirects: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            redirects,
        }
    }
}

// =====================================
// Health Check
// =====================================
/// بررسی سلامت سرویس
///
/// # Endpoint
/// `GET /health`
///
/// # Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "redirects": 2
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.redirects))
}
