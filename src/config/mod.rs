//! # ماژول تنظیمات (Configuration)
//!
//! تنظیمات برنامه میزبان (باینری `url-redirector`). خود کتابخانه هیچ
//! متغیر محیطی‌ای نمیخونه؛ این ماژول فقط برای `main.rs` هست.
//!
//! ## مفاهیم Rust:
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Serde**: سریالایز/دسریالایز
//! - **Builder Pattern**: ساخت تدریجی آبجکت

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    models::DocumentFormat,
    services::Normalization,
};

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use url_redirector::config::Config;
///
/// let config = Config::default();
/// println!("Port: {}", config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// فایل سند redirect‌ها (YAML یا JSON، بر اساس پسوند)
    pub redirects_file: PathBuf,

    /// حذف `/` انتهایی قبل از lookup
    pub trim_trailing_slash: bool,

    /// lookup بدون حساسیت به حروف
    pub case_insensitive: bool,

    /// محیط اجرا (development, production)
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// محیط توسعه
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// تبدیل String به Environment
///
/// مقدار ناشناخته یعنی Development.
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            redirects_file: PathBuf::from("redirects.yaml"),
            trim_trailing_slash: false,
            case_insensitive: false,
            environment: Environment::Development,
        }
    }
}

/// خوندن bool از متن متغیر محیطی
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// | متغیر | پیش‌فرض |
    /// |---|---|
    /// | `HOST` | `127.0.0.1` |
    /// | `PORT` | `3000` |
    /// | `REDIRECTS_FILE` | `redirects.yaml` |
    /// | `TRIM_TRAILING_SLASH` | `false` |
    /// | `CASE_INSENSITIVE` | `false` |
    /// | `ENVIRONMENT` | `development` |
    ///
    /// # Errors
    /// خطا برمیگردونه اگه `PORT` عدد نباشه یا flag‌ها مقدار نامعتبر داشته باشن.
    ///
    /// # مثال
    /// ```rust,no_run
    /// use url_redirector::config::Config;
    ///
    /// let config = Config::from_env().expect("Failed to load config");
    /// ```
    pub fn from_env() -> Result<Self> {
        let get_env = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let get_flag = |key: &str| -> Result<bool> {
            match env::var(key) {
                Ok(value) => parse_flag(&value).ok_or_else(|| {
                    AppError::Config(format!("{} must be a boolean, got '{}'", key, value))
                }),
                Err(_) => Ok(false),
            }
        };

        let port = get_env("PORT", "3000");
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("PORT '{}' is invalid: {}", port, e)))?;

        Ok(Self {
            host: get_env("HOST", "127.0.0.1"),
            port,
            redirects_file: PathBuf::from(get_env("REDIRECTS_FILE", "redirects.yaml")),
            trim_trailing_slash: get_flag("TRIM_TRAILING_SLASH")?,
            case_insensitive: get_flag("CASE_INSENSITIVE")?,
            environment: get_env("ENVIRONMENT", "development").into(),
        })
    }

    /// اعتبارسنجی تنظیمات
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        if self.redirects_file.as_os_str().is_empty() {
            return Err(AppError::Config(
                "REDIRECTS_FILE cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// آدرس کامل سرور
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// سیاست نرمال‌سازی مسیر برای handler
    #[must_use]
    pub fn normalization(&self) -> Normalization {
        Normalization::none()
            .trim_trailing_slash(self.trim_trailing_slash)
            .case_insensitive(self.case_insensitive)
    }

    /// فرمت سند redirect‌ها از روی پسوند فایل
    #[must_use]
    pub fn document_format(&self) -> DocumentFormat {
        DocumentFormat::from_path(&self.redirects_file)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use url_redirector::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .redirects_file("redirects.json")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// تنظیم مسیر فایل redirect‌ها
    #[must_use]
    pub fn redirects_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.redirects_file = path.into();
        self
    }

    #[must_use]
    pub fn trim_trailing_slash(mut self, enabled: bool) -> Self {
        self.config.trim_trailing_slash = enabled;
        self
    }

    #[must_use]
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.config.case_insensitive = enabled;
        self
    }

    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
