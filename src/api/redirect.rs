//! # Redirect Middleware
//!
//! Handler اصلی: مسیر هر request رو در جدول redirect‌ها پیدا میکنه؛
//! اگه بود `302 Found` با header `Location` برمیگردونه، وگرنه request رو
//! بدون تغییر به fallback میده.
//!
//! ## مفاهیم Rust + Tower:
//! - **Service**: trait اصلی Tower؛ هر چیزی که request بگیره و response بده
//! - **Layer**: wrapper که یک Service رو دور Service دیگه میپیچه
//! - **`Arc<T>`**: جدول فقط‌خواندنی بین همه clone‌ها و thread‌ها share میشه
//! - **Either**: دو نوع future مختلف پشت یک نوع
//!
//! ## استفاده:
//! ```rust,ignore
//! let fallback = Router::new().fallback(not_found);
//! let app = map_handler(paths, fallback);
//!
//! // یا به صورت middleware روی یک Router
//! let app = Router::new()
//!     .route("/health", get(health_check))
//!     .layer(RedirectLayer::new(paths));
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::{ready, Either, Ready};
use tower::{Layer, Service};
use tracing::{debug, info, warn};

use crate::{
    error::ParseError,
    models::{DocumentFormat, PathMap},
    parser,
    services::{build_map, Normalization},
};

// =====================================
// Redirect Table
// =====================================
/// جدول کامپایل شده: مسیر (نرمال شده) به header `Location`
///
/// مقدارهای header یک بار موقع ساخت آماده میشن و بعد از اون
/// جدول هیچ وقت تغییر نمیکنه؛ پس خواندن همزمان نیازی به قفل نداره.
#[derive(Debug)]
struct RedirectTable {
    entries: HashMap<String, HeaderValue>,
    normalization: Normalization,
}

impl RedirectTable {
    fn compile(map: PathMap, normalization: Normalization) -> Self {
        let mut pairs: Vec<(String, String)> = map.into_iter().collect();

        // با نرمال‌سازی ممکنه دو کلید یکی بشن؛ ترتیب ثابت یعنی نتیجه قطعی
        if !normalization.is_identity() {
            pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        }

        let mut entries = HashMap::with_capacity(pairs.len());
        for (path, url) in pairs {
            let key = normalization.apply(&path).into_owned();
            let location = location_header(&path, &url);

            if entries.insert(key, location).is_some() {
                debug!(path = %path, "Normalized path collides with an earlier entry, later one wins");
            }
        }

        info!(
            redirects = entries.len(),
            normalized = !normalization.is_identity(),
            "Redirect table built"
        );

        Self {
            entries,
            normalization,
        }
    }

    fn lookup(&self, path: &str) -> Option<&HeaderValue> {
        self.entries.get(&*self.normalization.apply(path))
    }
}

/// تبدیل URL مقصد به `HeaderValue`
///
/// URL بدون تغییر استفاده میشه (حتی رشته خالی). فقط بایت‌های کنترلی که
/// اصلا در header مجاز نیستن percent-encode میشن.
fn location_header(path: &str, url: &str) -> HeaderValue {
    if let Ok(value) = HeaderValue::from_str(url) {
        return value;
    }

    let mut escaped = Vec::with_capacity(url.len() + 8);
    for &byte in url.as_bytes() {
        if (byte < 0x20 && byte != b'\t') || byte == 0x7f {
            escaped.extend_from_slice(format!("%{:02X}", byte).as_bytes());
        } else {
            escaped.push(byte);
        }
    }

    warn!(path = %path, "Redirect target contains control characters, percent-encoding them");

    HeaderValue::from_bytes(&escaped).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// ساخت response redirect: `302 Found` با بدنه خالی
fn redirect_response(location: HeaderValue) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    response.headers_mut().insert(header::LOCATION, location);
    response
}

// =====================================
// Redirect Service
// =====================================
/// Service که redirect میکنه یا به fallback میسپاره
///
/// # مفاهیم:
/// - `S` هر Service با response از نوع `axum::response::Response` هست:
///   یک `Router`، یک `service_fn`، یا `handler.into_service()`
/// - clone کردن ارزونه: جدول داخل `Arc` هست
/// - خطای fallback (مثلا خطای transport) بدون تغییر رد میشه
#[derive(Debug, Clone)]
pub struct RedirectService<S> {
    table: Arc<RedirectTable>,
    fallback: S,
}

impl<S> RedirectService<S> {
    /// ساخت Service از یک نگاشت آماده، بدون نرمال‌سازی
    pub fn new(map: PathMap, fallback: S) -> Self {
        Self::with_normalization(map, Normalization::none(), fallback)
    }

    /// ساخت Service با سیاست نرمال‌سازی مشخص
    pub fn with_normalization(map: PathMap, normalization: Normalization, fallback: S) -> Self {
        Self {
            table: Arc::new(RedirectTable::compile(map, normalization)),
            fallback,
        }
    }

    /// تعداد redirect‌های ثبت شده
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    /// مقصد یک مسیر، اگه ثبت شده باشه
    #[must_use]
    pub fn location(&self, path: &str) -> Option<&str> {
        self.table.lookup(path).and_then(|value| value.to_str().ok())
    }
}

impl<S, B> Service<Request<B>> for RedirectService<S>
where
    S: Service<Request<B>, Response = Response>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Either<Ready<Result<Response, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        // فقط path؛ query و fragment جزو کلید نیستن
        if let Some(location) = self.table.lookup(request.uri().path()) {
            debug!(path = %request.uri().path(), location = ?location, "Redirecting");
            return Either::Left(ready(Ok(redirect_response(location.clone()))));
        }

        debug!(path = %request.uri().path(), "No redirect registered, delegating to fallback");
        Either::Right(self.fallback.call(request))
    }
}

// =====================================
// Redirect Layer
// =====================================
/// Layer برای پیچیدن هر Service با جدول redirect
///
/// # استفاده:
/// ```rust,ignore
/// let app = Router::new()
///     .fallback(not_found)
///     .layer(RedirectLayer::from_document(&bytes, DocumentFormat::Yaml, Normalization::none())?);
/// ```
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    table: Arc<RedirectTable>,
}

impl RedirectLayer {
    #[must_use]
    pub fn new(map: PathMap) -> Self {
        Self::with_normalization(map, Normalization::none())
    }

    #[must_use]
    pub fn with_normalization(map: PathMap, normalization: Normalization) -> Self {
        Self {
            table: Arc::new(RedirectTable::compile(map, normalization)),
        }
    }

    /// parse سند و ساخت Layer
    ///
    /// # Errors
    /// `ParseError` اگه سند معتبر نباشه؛ در این حالت هیچ Layer ساخته نمیشه.
    pub fn from_document(
        data: &[u8],
        format: DocumentFormat,
        normalization: Normalization,
    ) -> Result<Self, ParseError> {
        let records = parser::parse_document(data, format)?;
        Ok(Self::with_normalization(build_map(records), normalization))
    }

    /// تعداد redirect‌های ثبت شده
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = RedirectService<S>;

    fn layer(&self, fallback: S) -> Self::Service {
        RedirectService {
            table: Arc::clone(&self.table),
            fallback,
        }
    }
}

// =====================================
// Factory Functions
// =====================================
/// ساخت handler از یک نگاشت آماده
///
/// این تابع هیچ وقت fail نمیشه؛ نگاشت خالی یعنی همه چیز به fallback میره.
pub fn map_handler<S>(map: PathMap, fallback: S) -> RedirectService<S> {
    RedirectService::new(map, fallback)
}

/// parse سند YAML، ساخت نگاشت و برگردوندن handler
///
/// # Errors
/// `ParseError` اگه YAML خراب باشه یا رکوردی `path`/`url` نداشته باشه.
pub fn yaml_handler<S>(yaml: &[u8], fallback: S) -> Result<RedirectService<S>, ParseError> {
    document_handler(yaml, DocumentFormat::Yaml, fallback)
}

/// مثل `yaml_handler` برای سند JSON
///
/// # Errors
/// `ParseError` اگه JSON معتبر نباشه.
pub fn json_handler<S>(json: &[u8], fallback: S) -> Result<RedirectService<S>, ParseError> {
    document_handler(json, DocumentFormat::Json, fallback)
}

/// ساخت handler از سند با فرمت دلخواه
///
/// # Errors
/// `ParseError` از parser بدون تغییر برمیگرده.
pub fn document_handler<S>(
    data: &[u8],
    format: DocumentFormat,
    fallback: S,
) -> Result<RedirectService<S>, ParseError> {
    let records = parser::parse_document(data, format)?;
    Ok(map_handler(build_map(records), fallback))
}
