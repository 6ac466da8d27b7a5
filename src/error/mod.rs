//! # ماژول مدیریت خطاها (Error Handling)
//!
//! این ماژول دو نوع خطا تعریف میکنه:
//!
//! - **`ParseError`**: سند تنظیمات (YAML/JSON) خراب هست یا یه رکورد فیلد اجباری نداره.
//!   این خطا همزمان (synchronous) به کسی که handler رو میسازه برمیگرده.
//! - **`AppError`**: خطاهای برنامه میزبان (تنظیمات، IO، سرور).
//!
//! خطای transport موقع نوشتن response اینجا تعریف نشده؛ اون از همون مسیر
//! خود fallback یا stack HTTP رد میشه و ما لاگش نمیکنیم.
//!
//! ## مفاهیم Rust:
//! - **thiserror**: derive macro برای Error trait
//! - **`#[from]`**: تبدیل خودکار خطاها با `?`
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی برنامه
///
/// به جای نوشتن `Result<Config, AppError>` میتونیم بنویسیم `Result<Config>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Parse Error
// =====================================
/// خطای parse کردن سند redirect‌ها
///
/// در صورت خطا هیچ لیست نیمه‌کاره‌ای برنمیگرده.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// بایت‌ها UTF-8 معتبر نیستن
    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),

    /// سند از نظر syntax خرابه
    #[error("malformed {format} document: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    /// سطح بالای سند یه لیست نیست
    #[error("expected a top-level sequence of records, found {found}")]
    NotASequence { found: &'static str },

    /// یه رکورد مشکل داره (فیلد نداره یا نوعش string نیست)
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

impl ParseError {
    /// اندیس رکورد خراب، اگه خطا مربوط به یه رکورد خاص باشه
    #[must_use]
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Self::InvalidRecord { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// =====================================
// Application Error
// =====================================
/// خطای اصلی برنامه میزبان
///
/// # مفاهیم:
/// - `enum`: نوع شمارشی با انواع مختلف خطا
/// - `#[from]`: `ParseError` و `io::Error` خودکار به این تبدیل میشن
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------

    /// پیدا نشد - 404
    #[error("Not found: {0}")]
    NotFound(String),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------

    /// سند redirect‌ها قابل parse نبود
    #[error("Redirect document error: {0}")]
    Parse(#[from] ParseError),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),

    /// خطای IO (مثلا فایل redirect‌ها پیدا نشد)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// خطای سرور
    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// گرفتن HTTP status code متناسب با خطا
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            Self::Parse(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// آیا این یه خطای سرور هست؟
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// ساخت خطای Not Found برای مسیری که redirect نداره
    #[must_use]
    pub fn path_not_found(path: &str) -> Self {
        Self::NotFound(format!("No redirect registered for '{}'", path))
    }
}

// =====================================
// Error Response DTO
// =====================================
/// ساختار پاسخ خطا در API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// کد خطا (مثلا "Not Found")
    pub error: String,

    /// پیام خطا
    pub message: String,

    /// کد وضعیت HTTP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    /// ساخت پاسخ خطای جدید
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// اضافه کردن کد وضعیت
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// تبدیل AppError به Response HTTP
///
/// fallback پیش‌فرض میزبان (`not_found`) از همین استفاده میکنه.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = %self, "Server error occurred");
        }

        let status = self.status_code();

        let error_response = ErrorResponse::new(
            status.canonical_reason().unwrap_or("Error"),
            self.to_string(),
        )
        .with_status(status);

        (status, Json(error_response)).into_response()
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::path_not_found("/x").status_code(),
            StatusCode::NOT_FOUND
        );

        assert_eq!(
            AppError::Config("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let parse = AppError::from(ParseError::NotASequence { found: "mapping" });
        assert!(parse.is_server_error());
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("Not Found", "nothing here")
            .with_status(StatusCode::NOT_FOUND);

        assert_eq!(response.status_code, Some(404));
    }

    #[test]
    fn test_record_index() {
        let err = ParseError::InvalidRecord {
            index: 3,
            reason: "missing field `url`".to_string(),
        };
        assert_eq!(err.record_index(), Some(3));
        assert_eq!(err.to_string(), "invalid record #3: missing field `url`");

        assert_eq!(ParseError::Encoding("x".into()).record_index(), None);
    }

    #[tokio::test]
    async fn test_not_found_renders_json() {
        let response = AppError::path_not_found("/nope").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.status_code, Some(404));
        assert!(parsed.message.contains("/nope"));
    }
}
