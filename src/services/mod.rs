//! # ماژول سرویس‌ها (Business Logic)
//!
//! منطق خالص و بدون IO که بین parser و handler قرار میگیره:
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- RedirectService / RedirectLayer
//! ├─────────────────┤
//! │  Service Layer  │  <-- build_map + Normalization (اینجا!)
//! ├─────────────────┤
//! │     Parser      │  <-- YAML / JSON
//! └─────────────────┘
//! ```

use std::borrow::Cow;

use crate::models::{PathMap, PathRecord};

// =====================================
// Map Builder
// =====================================
/// ساخت `PathMap` از دنباله رکوردها
///
/// رکوردها به ترتیب پیمایش میشن و برای هر کدوم `map[path] = url`؛
/// پس در مسیرهای تکراری آخرین رکورد برنده‌ست. ورودی خالی نگاشت خالی میده.
///
/// # مثال
/// ```rust
/// use url_redirector::{models::PathRecord, services::build_map};
///
/// let map = build_map(vec![
///     PathRecord::new("/x", "https://first"),
///     PathRecord::new("/x", "https://second"),
/// ]);
/// assert_eq!(map.get("/x"), Some("https://second"));
/// ```
pub fn build_map<I>(records: I) -> PathMap
where
    I: IntoIterator<Item = PathRecord>,
{
    let mut map = PathMap::new();
    for record in records {
        map.insert(record.path, record.url);
    }
    map
}

// =====================================
// Path Normalization
// =====================================
/// سیاست نرمال‌سازی مسیر قبل از lookup
///
/// پیش‌فرض هیچ نرمال‌سازی‌ای انجام نمیده: مسیر درخواست دقیقا همونطور که
/// هست (حساس به حروف بزرگ و کوچک) مقایسه میشه.
///
/// # مثال
/// ```rust
/// use url_redirector::services::Normalization;
///
/// let normalization = Normalization::default().trim_trailing_slash(true);
/// assert_eq!(normalization.apply("/docs/"), "/docs");
/// assert_eq!(normalization.apply("/"), "/");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalization {
    trim_trailing_slash: bool,
    case_insensitive: bool,
}

impl Normalization {
    /// بدون نرمال‌سازی
    #[must_use]
    pub const fn none() -> Self {
        Self {
            trim_trailing_slash: false,
            case_insensitive: false,
        }
    }

    /// حذف `/` انتهایی (به جز خود ریشه `/`)
    #[must_use]
    pub const fn trim_trailing_slash(mut self, enabled: bool) -> Self {
        self.trim_trailing_slash = enabled;
        self
    }

    /// مقایسه بدون حساسیت به حروف (ASCII lowercase)
    #[must_use]
    pub const fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// آیا هیچ قانونی فعال نیست؟
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        !self.trim_trailing_slash && !self.case_insensitive
    }

    /// اعمال نرمال‌سازی روی یک مسیر
    ///
    /// وقتی چیزی تغییر نکنه، allocation انجام نمیشه.
    #[must_use]
    pub fn apply<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let mut normalized: &'a str = path;

        if self.trim_trailing_slash && normalized.len() > 1 {
            normalized = match normalized.trim_end_matches('/') {
                "" => "/",
                trimmed => trimmed,
            };
        }

        if self.case_insensitive && normalized.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(normalized.to_ascii_lowercase());
        }

        Cow::Borrowed(normalized)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_map_last_writer_wins() {
        let map = build_map(vec![
            PathRecord::new("/p", "https://u1"),
            PathRecord::new("/q", "https://q"),
            PathRecord::new("/p", "https://u2"),
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("/p"), Some("https://u2"));
        assert_eq!(map.get("/q"), Some("https://q"));
    }

    #[test]
    fn test_build_map_empty() {
        assert!(build_map(Vec::new()).is_empty());
    }

    #[test]
    fn test_collect_uses_same_rules() {
        let map: PathMap = vec![
            PathRecord::new("/a", "https://1"),
            PathRecord::new("/a", "https://2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.get("/a"), Some("https://2"));
    }

    #[test]
    fn test_default_normalization_is_identity() {
        let n = Normalization::default();

        assert!(n.is_identity());
        assert_eq!(n.apply("/A/"), "/A/");
        assert!(matches!(n.apply("/A/"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_trim_trailing_slash() {
        let n = Normalization::none().trim_trailing_slash(true);

        assert_eq!(n.apply("/docs/"), "/docs");
        assert_eq!(n.apply("/docs//"), "/docs");
        assert_eq!(n.apply("/"), "/");
        assert_eq!(n.apply("//"), "/");
        assert_eq!(n.apply(""), "");
    }

    #[test]
    fn test_case_insensitive() {
        let n = Normalization::none().case_insensitive(true);

        assert_eq!(n.apply("/Docs/API"), "/docs/api");
        assert!(matches!(n.apply("/docs"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_combined() {
        let n = Normalization::none()
            .trim_trailing_slash(true)
            .case_insensitive(true);

        assert_eq!(n.apply("/Docs/"), "/docs");
    }
}
