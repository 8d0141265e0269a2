use crate::clock::{Clock, SystemClock};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use snip_core::error::StoreResult;
use snip_core::{KeyValueStore, StoreError};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
enum Value {
    Scalar(String),
    List(VecDeque<String>),
}

/// In-memory storage entry.
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn scalar(value: &str, expire_at: Timestamp) -> Self {
        Self {
            value: Value::Scalar(value.to_owned()),
            expire_at: Some(expire_at),
        }
    }

    fn empty_list() -> Self {
        Self {
            value: Value::List(VecDeque::new()),
            expire_at: None,
        }
    }

    fn is_expired(&self, now: Timestamp) -> bool {
        self.expire_at.is_some_and(|expire_at| now >= expire_at)
    }
}

/// In-memory implementation of [`KeyValueStore`] using DashMap.
///
/// Expiry is lazy: an expired entry is treated as absent by every read and
/// dropped when next touched. Time comes from a [`Clock`], so tests can move
/// past a TTL without sleeping. Clones share the same data.
#[derive(Debug, Clone)]
pub struct InMemoryStore<C = SystemClock> {
    entries: Arc<DashMap<String, Entry>>,
    clock: C,
}

impl InMemoryStore<SystemClock> {
    /// Creates a new in-memory store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> InMemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Whole seconds, at least one, the same granularity Redis `EX` has.
    fn expiry(&self, ttl: Duration) -> StoreResult<Timestamp> {
        let ttl = Duration::from_secs(ttl.as_secs().max(1));
        SignedDuration::try_from(ttl)
            .ok()
            .and_then(|ttl| self.clock.now().checked_add(ttl).ok())
            .ok_or_else(|| StoreError::InvalidData(format!("ttl out of range: {ttl:?}")))
    }
}

fn wrong_type(key: &str) -> StoreError {
    warn!(key = %key, "operation against a key holding the wrong kind of value");
    StoreError::Operation(format!(
        "WRONGTYPE operation against key '{key}' holding the wrong kind of value"
    ))
}

/// Resolves inclusive, possibly negative list bounds against `len`.
///
/// Returns `None` when the range selects nothing.
fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };

    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl<C: Clock + Clone> KeyValueStore for InMemoryStore<C> {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        let expire_at = self.expiry(ttl)?;
        self.entries
            .insert(key.to_owned(), Entry::scalar(value, expire_at));
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool> {
        let expire_at = self.expiry(ttl)?;
        let now = self.clock.now();

        match self.entries.entry(key.to_owned()) {
            MapEntry::Occupied(mut occupied) => {
                if !occupied.get().is_expired(now) {
                    return Ok(false);
                }
                occupied.insert(Entry::scalar(value, expire_at));
                Ok(true)
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry::scalar(value, expire_at));
                Ok(true)
            }
        }
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = self.clock.now();

        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };

        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            return Ok(None);
        }

        match &entry.value {
            Value::Scalar(value) => Ok(Some(value.clone())),
            Value::List(_) => Err(wrong_type(key)),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<u64> {
        let now = self.clock.now();
        Ok(match self.entries.remove(key) {
            Some((_, entry)) if !entry.is_expired(now) => 1,
            _ => 0,
        })
    }

    async fn delete_many(&self, keys: &[String]) -> StoreResult<u64> {
        let mut removed = 0;
        for key in keys {
            removed += self.delete(key).await?;
        }
        Ok(removed)
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let matcher = glob::Pattern::new(pattern)
            .map_err(|e| StoreError::InvalidData(format!("invalid key pattern '{pattern}': {e}")))?;
        let now = self.clock.now();

        Ok(self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now) && matcher.matches(entry.key()))
            .map(|entry| entry.key().clone())
            .collect())
    }

    async fn list_prepend(&self, key: &str, value: &str) -> StoreResult<u64> {
        let now = self.clock.now();
        let mut entry = self
            .entries
            .entry(key.to_owned())
            .or_insert_with(Entry::empty_list);

        if entry.is_expired(now) {
            *entry = Entry::empty_list();
        }

        match &mut entry.value {
            Value::List(items) => {
                items.push_front(value.to_owned());
                Ok(items.len() as u64)
            }
            Value::Scalar(_) => Err(wrong_type(key)),
        }
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        let now = self.clock.now();

        let Some(entry) = self.entries.get(key) else {
            return Ok(Vec::new());
        };
        if entry.is_expired(now) {
            return Ok(Vec::new());
        }

        match &entry.value {
            Value::List(items) => Ok(match resolve_range(items.len(), start, stop) {
                Some((start, stop)) => items.range(start..=stop).cloned().collect(),
                None => Vec::new(),
            }),
            Value::Scalar(_) => Err(wrong_type(key)),
        }
    }

    async fn list_trim(&self, key: &str, start: i64, stop: i64) -> StoreResult<()> {
        let now = self.clock.now();

        let emptied = {
            let Some(mut entry) = self.entries.get_mut(key) else {
                return Ok(());
            };
            if entry.is_expired(now) {
                return Ok(());
            }

            match &mut entry.value {
                Value::List(items) => match resolve_range(items.len(), start, stop) {
                    Some((start, stop)) => {
                        items.truncate(stop + 1);
                        items.drain(..start);
                        false
                    }
                    None => {
                        items.clear();
                        true
                    }
                },
                Value::Scalar(_) => return Err(wrong_type(key)),
            }
        };

        // an empty list does not exist; a concurrent push may have refilled it
        if emptied {
            self.entries
                .remove_if(key, |_, e| matches!(&e.value, Value::List(items) if items.is_empty()));
        }
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let expire_at = self.expiry(ttl)?;
        let now = self.clock.now();

        let Some(mut entry) = self.entries.get_mut(key) else {
            return Ok(false);
        };
        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            return Ok(false);
        }

        entry.expire_at = Some(expire_at);
        Ok(true)
    }

    async fn flush_all(&self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}
