//! Core types and traits for the snip URL shortener.
//!
//! This crate holds the domain types, the key-value store contract and the
//! service traits shared by the storage adapters, the services and the
//! gateway. It performs no I/O of its own.

pub mod click;
pub mod error;
pub mod keys;
pub mod policy;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use click::ClickEvent;
pub use error::{GeneratorError, ShortenerError, StoreError};
pub use policy::{CollisionPolicy, FailureMode, Retention};
pub use shortcode::ShortCode;
pub use shortener::{ClickAnalytics, Shortener};
pub use store::KeyValueStore;
