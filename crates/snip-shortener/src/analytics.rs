use crate::degrade::absorb;
use crate::settings::AnalyticsSettings;
use async_trait::async_trait;
use jiff::Timestamp;
use snip_core::error::{Result, StoreResult};
use snip_core::keys::analytics_key;
use snip_core::{ClickAnalytics, ClickEvent, KeyValueStore, ShortCode, StoreError};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Records clicks into, and reads them back from, a per-code list.
///
/// Clicks are prepended to `analytics:{code}`, so reads come back newest
/// first. The list is independent of the code's mapping: it is neither
/// checked on record nor removed when the mapping expires. Growth is bounded
/// only by the configured [`Retention`](snip_core::Retention).
#[derive(Debug, Clone)]
pub struct AnalyticsService<S> {
    store: Arc<S>,
    settings: AnalyticsSettings,
}

impl<S: KeyValueStore> AnalyticsService<S> {
    /// Creates a new `AnalyticsService` with default settings.
    pub fn new(store: S) -> Self {
        Self::with_settings(store, AnalyticsSettings::default())
    }

    pub fn with_settings(store: S, settings: AnalyticsSettings) -> Self {
        Self {
            store: Arc::new(store),
            settings,
        }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    async fn append(&self, key: &str, payload: &str) -> StoreResult<()> {
        let len = self.store.list_prepend(key, payload).await?;
        let retention = self.settings.retention;

        if let Some(max_events) = retention.max_events {
            if len > max_events.get() as u64 {
                self.store
                    .list_trim(key, 0, max_events.get() as i64 - 1)
                    .await?;
            }
        }
        if let Some(ttl) = retention.ttl {
            self.store.expire(key, ttl).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore> ClickAnalytics for AnalyticsService<S> {
    async fn record_click(&self, code: &ShortCode, ip: &str, user_agent: &str) -> Result<()> {
        let event = ClickEvent::new(Timestamp::now(), ip, user_agent);
        let payload =
            serde_json::to_string(&event).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let result = self.append(&analytics_key(code), &payload).await;
        absorb(self.settings.failure_mode, "record_click", code, result, || ())?;

        trace!(code = %code, ip = %ip, "recorded click");
        Ok(())
    }

    async fn analytics(&self, code: &ShortCode) -> Result<Vec<ClickEvent>> {
        let result = self.store.list_range(&analytics_key(code), 0, -1).await;
        let raw = absorb(self.settings.failure_mode, "analytics", code, result, Vec::new)?;

        let events: Vec<ClickEvent> = raw
            .iter()
            .filter_map(|entry| match serde_json::from_str::<ClickEvent>(entry) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(code = %code, error = %e, "skipping unreadable click event");
                    None
                }
            })
            .collect();

        debug!(code = %code, count = events.len(), "read click events");
        Ok(events)
    }
}
