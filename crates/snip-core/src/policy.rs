use std::num::NonZeroUsize;
use std::time::Duration;

/// How `shorten` handles a generated code that is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Write unconditionally; a colliding code silently replaces the older
    /// mapping (last writer wins).
    #[default]
    Overwrite,
    /// Write only when the key is free, regenerating on conflict.
    RetryOnConflict {
        /// Total number of codes tried before giving up.
        max_attempts: u32,
    },
}

/// What a service does when the backing store fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Log the failure and return the operation's empty value.
    #[default]
    Degrade,
    /// Return the store error to the caller.
    Surface,
}

/// Growth limits for a click list.
///
/// The default keeps every event forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Retention {
    /// Keep at most this many of the newest events.
    pub max_events: Option<NonZeroUsize>,
    /// Expire the whole list this long after the latest click.
    pub ttl: Option<Duration>,
}

impl Retention {
    pub fn is_unbounded(&self) -> bool {
        self.max_events.is_none() && self.ttl.is_none()
    }
}
