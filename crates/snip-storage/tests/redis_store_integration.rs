use std::time::Duration;

use snip_core::{KeyValueStore, StoreError};
use snip_storage::{RedisConfig, RedisStore};
use snip_test_infra::redis::{RedisServer, RedisServerConfig};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

struct Fixture {
    _redis: RedisServer,
    store: RedisStore,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::start(RedisServerConfig::default())
            .await
            .expect("start redis");
        let config = RedisConfig::builder()
            .host(redis.host().await.expect("redis host"))
            .port(redis.port().await.expect("redis port"))
            .build();
        let store = RedisStore::connect(&config).await.expect("connect store");

        Self {
            _redis: redis,
            store,
        }
    }
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn set_get_and_delete() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    assert!(store.get("url:abc1234").await.unwrap().is_none());

    store
        .set("url:abc1234", "\"https://example.com\"", DAY)
        .await
        .unwrap();
    assert_eq!(
        store.get("url:abc1234").await.unwrap().as_deref(),
        Some("\"https://example.com\"")
    );

    assert_eq!(store.delete("url:abc1234").await.unwrap(), 1);
    assert_eq!(store.delete("url:abc1234").await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn values_expire() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    store.set("short", "v", Duration::from_secs(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    assert!(store.get("short").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn set_if_absent_only_writes_once() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    assert!(store.set_if_absent("k", "first", DAY).await.unwrap());
    assert!(!store.set_if_absent("k", "second", DAY).await.unwrap());
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("first"));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn lists_are_newest_first_and_trimmable() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    for (i, value) in ["one", "two", "three"].into_iter().enumerate() {
        assert_eq!(store.list_prepend("l", value).await.unwrap(), i as u64 + 1);
    }
    assert_eq!(
        store.list_range("l", 0, -1).await.unwrap(),
        vec!["three", "two", "one"]
    );

    store.list_trim("l", 0, 1).await.unwrap();
    assert_eq!(store.list_range("l", 0, -1).await.unwrap(), vec!["three", "two"]);

    assert!(store.expire("l", DAY).await.unwrap());
    assert!(!store.expire("missing", DAY).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn wrong_type_is_reported() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    store.set("scalar", "v", DAY).await.unwrap();
    let err = store.list_prepend("scalar", "x").await.unwrap_err();
    assert!(!err.is_retryable());
    assert!(!matches!(err, StoreError::Unavailable(_)));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn scan_clear_and_flush() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    store.set("url:a", "1", DAY).await.unwrap();
    store.set("url:b", "2", DAY).await.unwrap();
    store.list_prepend("analytics:a", "x").await.unwrap();

    let keys = store.scan_keys("url:*").await.unwrap();
    assert_eq!(keys, vec!["url:a", "url:b"]);

    assert_eq!(store.clear_by_pattern("url:*").await.unwrap(), 2);
    assert_eq!(store.scan_keys("*").await.unwrap(), vec!["analytics:a"]);

    store.flush_all().await.unwrap();
    assert!(store.scan_keys("*").await.unwrap().is_empty());
}
