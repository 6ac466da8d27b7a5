//! # HTTP Handlers
//!
//! handler‌های برنامه میزبان. هیچ‌کدوم جزو منطق redirect نیستن؛
//! `not_found` فقط fallback پیش‌فرض میزبانه.

pub mod health;
pub mod not_found;
