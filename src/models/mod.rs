//! # ماژول مدل‌ها (Domain Models)
//!
//! مدل‌های داده‌ای که بین parser، map builder و handler رد و بدل میشن:
//!
//! ```text
//! bytes ──parser──> Vec<PathRecord> ──build_map──> PathMap ──map_handler──> RedirectService
//! ```
//!
//! ## مفاهیم Rust:
//! - **Serialize/Deserialize**: تبدیل از/به YAML و JSON
//! - **Newtype Pattern**: کپسوله کردن `HashMap`
//! - **FromIterator**: پشتیبانی از `.collect()`

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

// =====================================
// Path Record
// =====================================
/// یک رکورد `{path, url}` از سند تنظیمات
///
/// # مفاهیم:
/// - فیلدها `pub` هستن و با نام‌های `path` و `url` در سند deserialize میشن
/// - فیلدهای اضافه در سند نادیده گرفته میشن (رفتار پیش‌فرض serde)
/// - parser محتوای فیلدها رو اعتبارسنجی نمیکنه
///
/// # مثال
/// ```rust
/// use url_redirector::models::PathRecord;
///
/// let record = PathRecord::new("/dogs", "https://en.wikipedia.org/wiki/Dog");
/// assert_eq!(record.path, "/dogs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathRecord {
    /// مسیر کوتاه (مثلا "/dogs")
    pub path: String,

    /// آدرس مقصد
    pub url: String,
}

impl PathRecord {
    /// ساخت رکورد جدید
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

// =====================================
// Path Map
// =====================================
/// نگاشت مسیر به URL مقصد
///
/// کلیدها یکتا هستن و ترتیب درج اهمیتی نداره. بعد از اینکه داخل
/// یک handler قرار گرفت دیگه تغییر نمیکنه.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap(HashMap<String, String>);

impl PathMap {
    /// ساخت نگاشت خالی
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// اضافه کردن یا جایگزینی یک مسیر
    ///
    /// مقدار قبلی (اگه بود) برگردونده میشه.
    pub fn insert(&mut self, path: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.0.insert(path.into(), url.into())
    }

    /// پیدا کردن مقصد یک مسیر
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// گرفتن `HashMap` داخلی
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for PathMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// ساخت از رکوردها؛ همون الگوریتم `build_map` (آخرین رکورد برنده‌ست)
impl FromIterator<PathRecord> for PathMap {
    fn from_iter<I: IntoIterator<Item = PathRecord>>(iter: I) -> Self {
        crate::services::build_map(iter)
    }
}

impl<K, V> FromIterator<(K, V)> for PathMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for PathMap {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =====================================
// Document Format
// =====================================
/// فرمت متنی سند تنظیمات
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// فرمت اصلی
    #[default]
    Yaml,

    /// همون ساختار، به صورت آرایه JSON
    Json,
}

impl DocumentFormat {
    /// تشخیص فرمت از پسوند فایل
    ///
    /// `.json` یعنی JSON؛ بقیه (`.yaml`، `.yml`، یا ناشناخته) YAML حساب میشن.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// نام فرمت برای پیام‌های خطا و لاگ
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path("redirects.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("REDIRECTS.JSON"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("redirects.yml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("redirects.yaml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("redirects"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_path_map_from_pairs() {
        let map: PathMap = [("/a", "https://x.example/a")].into_iter().collect();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("/a"), Some("https://x.example/a"));
        assert!(map.get("/A").is_none());
    }

    #[test]
    fn test_path_map_from_hash_map() {
        let mut inner = HashMap::new();
        inner.insert("/x".to_string(), String::new());

        let map = PathMap::from(inner);
        assert!(map.contains("/x"));
        assert_eq!(map.get("/x"), Some(""));
    }
}
