//! # لایه API
//!
//! این ماژول دو بخش داره:
//!
//! 1. **Redirect middleware** (`redirect.rs`): factory‌هایی که از یک `PathMap`
//!    یا یک سند YAML/JSON، handler redirect میسازن. این بخش هسته کتابخونه‌ست
//!    و به هیچ Router خاصی وابسته نیست.
//! 2. **Router میزبان** (`create_router`): برای باینری؛ health check،
//!    fallback پیش‌فرض 404 و middleware‌های tracing.
//!
//! ## ساختار URL‌ها در میزبان:
//! - `GET /health` - Health check
//! - هر مسیر ثبت شده در سند - `302 Found` به URL مقصد
//! - بقیه - `404` با بدنه JSON

pub mod handlers;
mod middleware;
mod redirect;

pub use middleware::*;
pub use redirect::*;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

// =====================================
// Application State
// =====================================
/// وضعیت مشترک handler‌های میزبان
#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    /// تعداد redirect‌های لود شده
    pub redirects: usize,
}

// =====================================
// Router Builder
// =====================================
/// ساخت Router برنامه میزبان
///
/// ترتیب لایه‌ها از بیرون به داخل:
/// `TraceLayer` → `request_id` → `RedirectLayer` → route‌ها / `not_found`
///
/// # Arguments
/// * `redirects` - Layer ساخته شده از سند تنظیمات
pub fn create_router(redirects: RedirectLayer) -> Router {
    let state = AppState {
        redirects: redirects.len(),
    };

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::not_found::not_found)
        .with_state(state)
        // redirect باید بعد از route‌ها و fallback اضافه بشه تا روی همه اعمال بشه
        .layer(redirects)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_id)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::models::PathMap;

    fn app() -> Router {
        let map: PathMap = [("/gh", "https://github.com")].into_iter().collect();
        create_router(RedirectLayer::new(map))
    }

    #[tokio::test]
    async fn test_router_redirects() {
        let response = app()
            .oneshot(Request::builder().uri("/gh").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://github.com");
        assert!(response.headers().contains_key(&REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_router_falls_back_to_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_redirect_count() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: handlers::health::HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.redirects, 1);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .header("x-request-id", "abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[&REQUEST_ID_HEADER], "abc123");
    }
}
