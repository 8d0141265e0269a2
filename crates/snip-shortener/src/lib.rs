//! Store-backed implementations of [`Shortener`](snip_core::Shortener) and
//! [`ClickAnalytics`](snip_core::ClickAnalytics).

pub mod analytics;
pub mod client;
mod degrade;
pub mod service;
pub mod settings;
#[cfg(test)]
mod testing;

pub use analytics::AnalyticsService;
pub use client::{ClientInfo, FORWARDED_FOR_HEADER};
pub use service::ShortenerService;
pub use settings::{AnalyticsSettings, ShortenerSettings, DEFAULT_MAPPING_TTL};
