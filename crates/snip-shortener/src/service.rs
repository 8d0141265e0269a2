use crate::degrade::absorb;
use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use snip_core::error::{Result, StoreResult};
use snip_core::keys::url_key;
use snip_core::{CollisionPolicy, KeyValueStore, ShortCode, Shortener, ShortenerError, StoreError};
use snip_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a [`KeyValueStore`] and a [`Generator`] to handle:
/// - Short code generation
/// - Mapping persistence under `url:{code}` with a fixed TTL
/// - Resolution of codes back to URLs
///
/// Whether a generated code is checked for uniqueness is decided by the
/// configured [`CollisionPolicy`]; by default it is not.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<S: KeyValueStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_settings(store, generator, ShortenerSettings::default())
    }

    pub fn with_settings(store: S, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            settings,
        }
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    async fn write_overwriting(&self, value: &str) -> Result<ShortCode> {
        let code = self.generator.generate()?;

        let result = self
            .store
            .set(&url_key(&code), value, self.settings.mapping_ttl)
            .await;
        absorb(self.settings.failure_mode, "shorten", &code, result, || ())?;

        Ok(code)
    }

    async fn write_unique(&self, value: &str, max_attempts: u32) -> Result<ShortCode> {
        let attempts = max_attempts.max(1);

        for attempt in 1..=attempts {
            let code = self.generator.generate()?;

            match self
                .store
                .set_if_absent(&url_key(&code), value, self.settings.mapping_ttl)
                .await
            {
                Ok(true) => return Ok(code),
                Ok(false) => {
                    warn!(code = %code, attempt, "generated short code already taken");
                }
                Err(e) => {
                    absorb(self.settings.failure_mode, "shorten", &code, Err(e), || false)?;
                    return Ok(code);
                }
            }
        }

        Err(ShortenerError::CodeSpaceExhausted { attempts })
    }
}

fn decode_url(raw: &str) -> StoreResult<String> {
    serde_json::from_str(raw)
        .map_err(|e| StoreError::InvalidData(format!("stored URL is not a JSON string: {e}")))
}

#[async_trait]
impl<S: KeyValueStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, original_url: &str) -> Result<ShortCode> {
        let value = serde_json::to_string(original_url)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let code = match self.settings.collision_policy {
            CollisionPolicy::Overwrite => self.write_overwriting(&value).await?,
            CollisionPolicy::RetryOnConflict { max_attempts } => {
                self.write_unique(&value, max_attempts).await?
            }
        };

        debug!(code = %code, url = %original_url, "shortened URL");
        Ok(code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "resolving short code");

        let result = match self.store.get(&url_key(code)).await {
            Ok(Some(raw)) => decode_url(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        let url = absorb(self.settings.failure_mode, "resolve", code, result, || None)?;
        match &url {
            Some(url) => debug!(code = %code, url = %url, "resolved short code"),
            None => trace!(code = %code, "short code not found"),
        }
        Ok(url)
    }
}
