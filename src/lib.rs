//! # URL Redirector Library
//!
//! یک middleware برای axum/tower که مسیر هر request رو با یک جدول
//! کد کوتاه → URL مقایسه میکنه: اگه پیدا شد `302 Found`، وگرنه fallback.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── main.rs         # نقطه ورود باینری (میزبان)
//! ├── config/         # تنظیمات میزبان
//! ├── error/          # ParseError و AppError
//! ├── models/         # PathRecord، PathMap، DocumentFormat
//! ├── parser/         # parse سند YAML / JSON
//! ├── services/       # build_map و Normalization
//! └── api/            # RedirectService، RedirectLayer و Router میزبان
//! ```
//!
//! ## جریان داده
//!
//! ```text
//! bytes ──parse──> Vec<PathRecord> ──build_map──> PathMap ──map_handler──> RedirectService
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust
//! use std::convert::Infallible;
//! use axum::{body::Body, http::{Request, StatusCode}, response::{IntoResponse, Response}};
//! use tower::{service_fn, ServiceExt};
//! use url_redirector::api::yaml_handler;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fallback = service_fn(|_req: Request<Body>| async {
//!     Ok::<Response, Infallible>((StatusCode::NOT_FOUND, "not found").into_response())
//! });
//!
//! let yaml = b"- path: /dogs\n  url: https://en.wikipedia.org/wiki/Dog\n";
//! let handler = yaml_handler(yaml, fallback).expect("valid document");
//!
//! let request = Request::builder().uri("/dogs").body(Body::empty()).unwrap();
//! let response = handler.oneshot(request).await.unwrap();
//! assert_eq!(response.status(), StatusCode::FOUND);
//! # }
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول تنظیمات برنامه میزبان
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول مدل‌های داده
pub mod models;

/// ماژول parse سند redirect‌ها
pub mod parser;

/// ماژول منطق خالص (Map Builder)
pub mod services;

/// ماژول redirect middleware و Router میزبان
pub mod api;

// =====================================
// Re-exports
// =====================================

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطاهای برنامه
pub use error::{AppError, ParseError};

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// کاربرد:
/// ```rust
/// use url_redirector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        document_handler, json_handler, map_handler, yaml_handler, RedirectLayer,
        RedirectService,
    };
    pub use crate::error::{AppError, ParseError, Result};
    pub use crate::models::*;
    pub use crate::parser::{parse_document, parse_json, parse_yaml};
    pub use crate::services::{build_map, Normalization};
}
