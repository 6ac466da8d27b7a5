//! # Fallback پیش‌فرض
//!
//! وقتی هیچ redirect‌ی برای مسیر ثبت نشده باشه به این‌جا میرسیم.

use axum::http::Uri;

use crate::error::AppError;

/// پاسخ 404 با بدنه JSON
///
/// # Endpoint
/// هر مسیری که route یا redirect نداشته باشه
pub async fn not_found(uri: Uri) -> AppError {
    AppError::path_not_found(uri.path())
}
