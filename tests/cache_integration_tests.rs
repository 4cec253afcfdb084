//! Integration Tests for the Cache Facade
//!
//! Drives the public API over both backends.

use std::collections::BTreeMap;
use std::fs;
use std::thread::sleep;
use std::time::Duration;

use chrono::TimeDelta;
use mini_cache::adapter::is_cache_file_name;
use mini_cache::cache::Expiration;
use mini_cache::{
    Backend, Cache, CacheConfig, CacheError, CacheValue, FileAdapter, MemoryAdapter,
    StorageAdapter, Ttl,
};
use tempfile::TempDir;

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn memory_cache() -> Cache {
    init_tracing();
    Cache::new(Box::new(MemoryAdapter::new()), None)
}

fn file_cache() -> (TempDir, Cache) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let adapter = FileAdapter::new(dir.path()).unwrap();
    (dir, Cache::new(Box::new(adapter), None))
}

/// Runs `check` once per backend.
fn with_each_backend(check: impl Fn(&mut Cache)) {
    let mut memory = memory_cache();
    check(&mut memory);

    let (_dir, mut file) = file_cache();
    check(&mut file);
}

// == Shared Contract ==

#[test]
fn test_round_trip_on_both_backends() {
    with_each_backend(|cache| {
        let mut profile = BTreeMap::new();
        profile.insert("name".to_string(), CacheValue::from("ada"));
        profile.insert("admin".to_string(), CacheValue::from(false));

        assert!(cache.set("profile:1", CacheValue::Map(profile.clone()), None).unwrap());
        assert_eq!(
            cache.get("profile:1", CacheValue::Null).unwrap(),
            CacheValue::Map(profile)
        );
    });
}

#[test]
fn test_miss_returns_default_on_both_backends() {
    with_each_backend(|cache| {
        assert_eq!(cache.get("never-set", "default").unwrap(), CacheValue::from("default"));
        assert!(!cache.has("never-set").unwrap());
    });
}

#[test]
fn test_bulk_round_trip_on_both_backends() {
    with_each_backend(|cache| {
        assert!(cache.set_multiple([("a", 1), ("b", 2)], None).unwrap());

        let values = cache.get_multiple(["a", "b", "c"], 0).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values["a"], CacheValue::Int(1));
        assert_eq!(values["b"], CacheValue::Int(2));
        assert_eq!(values["c"], CacheValue::Int(0));
    });
}

#[test]
fn test_set_multiple_accepts_any_iterator() {
    with_each_backend(|cache| {
        let pairs = (1..=3).map(|n| (format!("item:{}", n), n * 10));

        assert!(cache.set_multiple(pairs, None).unwrap());
        assert_eq!(cache.get("item:2", CacheValue::Null).unwrap(), CacheValue::Int(20));
    });
}

#[test]
fn test_clear_on_both_backends() {
    with_each_backend(|cache| {
        cache.set_multiple([("a", 1), ("b", 2), ("c", 3)], None).unwrap();

        assert!(cache.clear());
        for key in ["a", "b", "c"] {
            assert!(!cache.has(key).unwrap());
        }
    });
}

#[test]
fn test_falsy_values_are_present_on_both_backends() {
    with_each_backend(|cache| {
        cache.set("false", false, None).unwrap();
        cache.set("empty", "", None).unwrap();
        cache.set("null", CacheValue::Null, None).unwrap();

        assert!(cache.has("false").unwrap());
        assert!(cache.has("empty").unwrap());
        assert!(cache.has("null").unwrap());
    });
}

#[test]
fn test_non_positive_ttl_on_both_backends() {
    with_each_backend(|cache| {
        assert!(cache.set("zero", "v", Some(Ttl::Seconds(0))).unwrap());
        assert!(cache.set("negative", "v", Some(Ttl::Seconds(-5))).unwrap());
        assert!(cache.set("short-span", "v", Some(TimeDelta::milliseconds(500).into())).unwrap());

        assert!(!cache.has("zero").unwrap());
        assert!(!cache.has("negative").unwrap());
        assert!(!cache.has("short-span").unwrap());
    });
}

#[test]
fn test_ttl_expiry_on_both_backends() {
    with_each_backend(|cache| {
        cache.set("short", "value", Some(Ttl::Seconds(1))).unwrap();
        cache.set("long", "value", Some(Duration::from_secs(3600).into())).unwrap();
        assert!(cache.has("short").unwrap());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        assert_eq!(cache.get("short", "expired").unwrap(), CacheValue::from("expired"));
        assert!(!cache.has("short").unwrap());
        assert!(cache.has("long").unwrap());
    });
}

#[test]
fn test_invalid_keys_on_both_backends() {
    with_each_backend(|cache| {
        assert!(matches!(cache.get("", 0), Err(CacheError::InvalidArgument(_))));
        assert!(matches!(cache.set("", 0, None), Err(CacheError::InvalidArgument(_))));
        assert!(matches!(cache.delete(""), Err(CacheError::InvalidArgument(_))));
        assert!(matches!(cache.has(""), Err(CacheError::InvalidArgument(_))));
        assert!(matches!(
            cache.set_multiple([("ok", 1), ("", 2)], None),
            Err(CacheError::InvalidArgument(_))
        ));
        assert!(!cache.has("ok").unwrap(), "rejected batch writes nothing");
    });
}

// == Backend-Specific Semantics ==

#[test]
fn test_delete_multiple_memory_always_true() {
    let mut cache = memory_cache();
    cache.set("a", 1, None).unwrap();

    assert!(cache.delete_multiple(["a", "never-set"]).unwrap());
}

#[test]
fn test_delete_multiple_file_false_for_missing_key() {
    let (_dir, mut cache) = file_cache();
    cache.set("a", 1, None).unwrap();

    assert!(!cache.delete_multiple(["a", "never-set"]).unwrap());
    assert!(!cache.has("a").unwrap());

    cache.set_multiple([("b", 2), ("c", 3)], None).unwrap();
    assert!(cache.delete_multiple(["b", "c"]).unwrap());
}

#[test]
fn test_file_cache_survives_reopen() -> anyhow::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;

    {
        let mut cache = Cache::new(Box::new(FileAdapter::new(dir.path())?), None);
        cache.set("persisted", "still here", None)?;
    }

    let mut cache = Cache::new(Box::new(FileAdapter::new(dir.path())?), None);
    assert_eq!(cache.get("persisted", CacheValue::Null)?, CacheValue::from("still here"));
    Ok(())
}

#[test]
fn test_file_cache_layout() -> anyhow::Result<()> {
    let (dir, mut cache) = file_cache();
    fs::write(dir.path().join("README"), "unrelated")?;

    cache.set("alpha", 1, None)?;
    cache.set("beta", 2, None)?;

    let names: Vec<String> = fs::read_dir(dir.path())?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    assert_eq!(names.len(), 3);
    assert_eq!(names.iter().filter(|n| is_cache_file_name(n)).count(), 2);

    assert!(cache.clear());
    assert!(dir.path().join("README").exists());
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_unreadable_values_fall_back_to_default_on_file_backend() {
    let (_dir, mut cache) = file_cache();

    let mut deep = CacheValue::Int(0);
    for _ in 0..100 {
        deep = CacheValue::List(vec![deep]);
    }

    assert!(!cache.set("nan", f64::NAN, None).unwrap());
    assert!(!cache.set("deep", deep, None).unwrap());
    assert_eq!(cache.get("nan", "default").unwrap(), CacheValue::from("default"));
    assert!(!cache.has("deep").unwrap());
}

#[test]
fn test_huge_ttl_never_expires_on_both_backends() {
    with_each_backend(|cache| {
        assert!(cache.set("forever", "v", Some(Ttl::Seconds(i64::MAX))).unwrap());
        assert!(cache.set("span", "v", Some(TimeDelta::MAX.into())).unwrap());

        assert!(cache.has("forever").unwrap());
        assert!(cache.has("span").unwrap());
    });
}

#[test]
fn test_file_adapter_rejects_missing_directory() {
    let dir = TempDir::new().unwrap();
    let result = FileAdapter::new(dir.path().join("nope"));

    assert!(matches!(result, Err(CacheError::Io(_))));
}

#[test]
fn test_custom_adapter_gets_bulk_operations() {
    /// Backend that stores nothing and refuses every write.
    struct ReadOnly;

    impl StorageAdapter for ReadOnly {
        fn get(&mut self, _key: &str) -> Option<CacheValue> {
            None
        }

        fn set(&mut self, _key: &str, _value: CacheValue, _expiration: Expiration) -> bool {
            false
        }

        fn delete(&mut self, _key: &str) -> bool {
            false
        }

        fn clear(&mut self) -> bool {
            true
        }
    }

    let mut cache = Cache::new(Box::new(ReadOnly), None);

    assert!(!cache.set("a", 1, None).unwrap());
    assert!(!cache.set_multiple([("a", 1), ("b", 2)], None).unwrap());
    assert_eq!(cache.get("a", "miss").unwrap(), CacheValue::from("miss"));
    assert_eq!(cache.stats().writes, 0);
}

// == Configuration ==

#[test]
fn test_from_config_file_backend() -> anyhow::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let config = CacheConfig {
        backend: Backend::File {
            dir: dir.path().to_path_buf(),
        },
        default_ttl: Some(60),
    };

    let mut cache = Cache::from_config(&config)?;
    cache.set("configured", true, None)?;

    let adapter = FileAdapter::new(dir.path())?;
    assert!(adapter.path_for("configured").is_file());
    Ok(())
}
