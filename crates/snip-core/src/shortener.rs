use crate::click::ClickEvent;
use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a short code for `original_url` and returns it.
    async fn shorten(&self, original_url: &str) -> Result<ShortCode>;

    /// Resolves a short code to its original URL.
    /// Returns `None` if the code does not exist or has expired.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;
}

#[async_trait]
pub trait ClickAnalytics: Send + Sync + 'static {
    /// Records one click against `code`.
    ///
    /// The code does not need to resolve; clicks on unknown or expired codes
    /// are recorded all the same.
    async fn record_click(&self, code: &ShortCode, ip: &str, user_agent: &str) -> Result<()>;

    /// Returns every click recorded for `code`, newest first.
    async fn analytics(&self, code: &ShortCode) -> Result<Vec<ClickEvent>>;
}
