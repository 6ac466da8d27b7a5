//! # URL Redirector - نقطه ورود برنامه
//!
//! میزبان ساده برای middleware redirect: سند redirect‌ها رو از فایل
//! میخونه، Router رو میسازه و سرور رو اجرا میکنه.
//!
//! اگه سند خراب باشه برنامه با خطا خارج میشه؛ هیچ سروری بالا نمیاد.

use std::fs;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use url_redirector::{
    api::{create_router, RedirectLayer},
    config::{Config, Environment},
    error::{AppError, Result},
};

/// نقطه ورود اصلی برنامه
///
/// # Errors
/// خطا برمیگردونه اگه:
/// - تنظیمات نامعتبر باشن
/// - فایل redirect‌ها خونده یا parse نشه
/// - سرور استارت نشه
#[tokio::main]
async fn main() -> Result<()> {
    // اگه فایل .env نباشه اوکیه
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.environment);

    info!("🚀 Starting URL Redirector...");

    config.validate()?;
    info!(environment = ?config.environment, "✅ Configuration loaded successfully");

    let document = fs::read(&config.redirects_file)?;
    let format = config.document_format();
    let redirects = RedirectLayer::from_document(&document, format, config.normalization())?;
    info!(
        file = %config.redirects_file.display(),
        format = %format,
        redirects = redirects.len(),
        "✅ Redirects loaded"
    );

    let app = create_router(redirects);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("🌐 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}

/// راه‌اندازی سیستم tracing برای لاگینگ
///
/// EnvFilter از متغیر RUST_LOG میخونه؛ اگه نبود، default استفاده میشه.
fn init_tracing(environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("url_redirector=debug,tower_http=debug"));

    // production: یک خط JSON برای هر رویداد؛ development: خروجی pretty
    let json = environment.is_production().then(|| fmt::layer().json().with_current_span(true));
    let pretty = environment.is_development().then(|| {
        fmt::layer()
            .pretty()
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });
    let compact = (!environment.is_production() && !environment.is_development())
        .then(|| fmt::layer().compact().with_target(true).with_level(true));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .with(compact)
        .init();
}
