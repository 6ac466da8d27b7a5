//! # Middleware
//!
//! Middleware‌های سفارشی برنامه میزبان. middleware اصلی redirect در
//! `redirect.rs` هست؛ این‌جا فقط چیزهای جانبی.
//!
//! ## مفاهیم:
//! - **`from_fn`**: ساخت middleware از یک async function
//! - **Next**: ادامه زنجیره middleware

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::trace;

/// نام header شناسه request
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

// =====================================
// Request ID Middleware
// =====================================
/// اضافه کردن Request ID به هر request و response
///
/// اگه کلاینت خودش `X-Request-Id` فرستاده باشه همون استفاده میشه،
/// وگرنه یک nanoid جدید ساخته میشه. redirect‌ها هم این header رو میگیرن.
///
/// # استفاده:
/// ```rust,ignore
/// let app = Router::new()
///     .layer(axum::middleware::from_fn(request_id));
/// ```
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response {
    let id = match request.headers().get(&REQUEST_ID_HEADER) {
        Some(existing) => existing.clone(),
        None => {
            let generated = HeaderValue::from_str(&nanoid::nanoid!(12))
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            request
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), generated.clone());
            generated
        }
    };

    trace!(request_id = ?id, "Request id assigned");

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER.clone(), id);

    response
}
