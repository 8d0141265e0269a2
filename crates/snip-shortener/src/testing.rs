//! Test doubles shared by the service tests.

use async_trait::async_trait;
use snip_core::error::StoreResult;
use snip_core::{GeneratorError, KeyValueStore, ShortCode, StoreError};
use snip_generator::Generator;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;

/// A store whose backend is always down.
pub(crate) struct UnavailableStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn ping(&self) -> StoreResult<()> {
        Err(down())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<()> {
        Err(down())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> StoreResult<bool> {
        Err(down())
    }

    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(down())
    }

    async fn delete(&self, _key: &str) -> StoreResult<u64> {
        Err(down())
    }

    async fn delete_many(&self, _keys: &[String]) -> StoreResult<u64> {
        Err(down())
    }

    async fn scan_keys(&self, _pattern: &str) -> StoreResult<Vec<String>> {
        Err(down())
    }

    async fn list_prepend(&self, _key: &str, _value: &str) -> StoreResult<u64> {
        Err(down())
    }

    async fn list_range(&self, _key: &str, _start: i64, _stop: i64) -> StoreResult<Vec<String>> {
        Err(down())
    }

    async fn list_trim(&self, _key: &str, _start: i64, _stop: i64) -> StoreResult<()> {
        Err(down())
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> StoreResult<bool> {
        Err(down())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        Err(down())
    }
}

/// Hands out a fixed sequence of codes, then fails.
pub(crate) struct ScriptedGenerator {
    codes: Mutex<Vec<&'static str>>,
}

impl ScriptedGenerator {
    pub(crate) fn new(codes: &[&'static str]) -> Self {
        let mut codes = codes.to_vec();
        codes.reverse();
        Self {
            codes: Mutex::new(codes),
        }
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        self.codes
            .lock()
            .expect("scripted generator lock")
            .pop()
            .map(ShortCode::new_unchecked)
            .ok_or_else(|| GeneratorError::Entropy("script exhausted".to_string()))
    }
}

/// Collects formatted log output of the current thread.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Installs a subscriber writing into the returned buffer until the
    /// guard is dropped.
    pub(crate) fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer lock")).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
