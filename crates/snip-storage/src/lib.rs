//! Implementations of the [`KeyValueStore`](snip_core::KeyValueStore) contract.

pub mod clock;
pub mod memory;
pub mod redis;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::InMemoryStore;
pub use self::redis::{RedisConfig, RedisStore};
