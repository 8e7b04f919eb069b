#![cfg(feature = "async")]

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use dotconf::{AsyncConfig, Config, Error, Options};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Retry {
    attempts: u32,
    backoff_ms: u64,
}

fn scratch(dir: &tempfile::TempDir) -> Options {
    Options::new().cwd(dir.path())
}

fn as_defaults(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("defaults must be an object, got {:?}", other),
    }
}

#[tokio::test]
async fn async_set_then_get_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    config.set("server.port", 8080).await.unwrap();

    assert_eq!(config.get("server.port").await.unwrap(), Some(json!(8080)));
    assert_eq!(
        config.get("server").await.unwrap(),
        Some(json!({"port": 8080}))
    );
}

#[tokio::test]
async fn async_open_merges_and_persists_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{\n\t\"a\": 2\n}").unwrap();

    let options = scratch(&dir).defaults(as_defaults(json!({"a": 1, "b": 3})));
    let config = AsyncConfig::open(options).await.unwrap();

    // Persisted values win, defaults fill the gaps, and the merge landed
    // on disk during open.
    assert_eq!(config.get("a").await.unwrap(), Some(json!(2)));
    assert_eq!(config.get("b").await.unwrap(), Some(json!(3)));

    let text = fs::read_to_string(config.path()).unwrap();
    assert!(text.contains("\"b\": 3"));
}

#[tokio::test]
async fn sequential_awaits_observe_prior_writes() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    config.set("counter", 1).await.unwrap();
    config.set("counter", 2).await.unwrap();
    assert_eq!(config.get("counter").await.unwrap(), Some(json!(2)));

    config.set("counter", 3).await.unwrap();
    assert_eq!(config.get("counter").await.unwrap(), Some(json!(3)));
}

#[tokio::test]
async fn async_set_many_applies_all_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    config
        .set_many(json!({"a.b": 1, "c": 2}))
        .await
        .unwrap();

    assert_eq!(config.get("a.b").await.unwrap(), Some(json!(1)));
    assert_eq!(config.get("c").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn async_set_many_rejects_non_objects() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    let err = config.set_many(json!("nope")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidAssignments { .. }));
}

#[tokio::test]
async fn async_typed_access_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    let retry = Retry {
        attempts: 5,
        backoff_ms: 250,
    };
    config.set("retry", &retry).await.unwrap();

    let recovered: Retry = config.get_as("retry").await.unwrap().unwrap();
    assert_eq!(recovered, retry);
}

#[tokio::test]
async fn async_corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    fs::write(config.path(), "garbage [[[").unwrap();

    assert_eq!(config.get("anything").await.unwrap(), None);
    assert_eq!(
        config.get_or("anything", json!(1)).await.unwrap(),
        json!(1)
    );
}

#[tokio::test]
async fn async_non_utf8_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    fs::write(config.path(), [0xff, 0xfe, 0x7b, 0x22]).unwrap();

    assert_eq!(config.get("anything").await.unwrap(), None);
    assert_eq!(config.load_store().await.unwrap(), json!({}));
}

#[tokio::test]
async fn async_whole_store_read_and_replace() {
    let dir = tempfile::tempdir().unwrap();
    let config = AsyncConfig::open(scratch(&dir)).await.unwrap();

    config.set("a.b", 1).await.unwrap();
    assert_eq!(
        config.load_store().await.unwrap(),
        json!({"a": {"b": 1}})
    );

    config
        .save_store(&json!({"replaced": true}))
        .await
        .unwrap();
    assert_eq!(config.get("a.b").await.unwrap(), None);
    assert_eq!(config.get("replaced").await.unwrap(), Some(json!(true)));
}

#[tokio::test]
async fn sync_and_async_handles_share_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = scratch(&dir).config_name("shared");

    let sync_config = Config::new(options.clone()).unwrap();
    let async_config = AsyncConfig::open(options).await.unwrap();
    assert_eq!(sync_config.path(), async_config.path());

    sync_config.set("from.sync", 1).unwrap();
    assert_eq!(async_config.get("from.sync").await.unwrap(), Some(json!(1)));

    async_config.set("from.task", 2).await.unwrap();
    assert_eq!(sync_config.get("from.task").unwrap(), Some(json!(2)));
}
