//! Unit tests for the TTL cache

use super::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_cache_entry_creation() {
    let entry = CacheEntry::new("payload".to_string());

    assert_eq!(entry.data, "payload");
    assert_eq!(entry.ttl, Duration::from_secs(300)); // 5 minute default
    assert!(entry.is_fresh());
}

#[test]
fn test_cache_set_and_get() {
    let cache = TtlCache::new();
    cache.set("search:{\"query\":\"led\"}", 42u32);

    assert_eq!(cache.get("search:{\"query\":\"led\"}"), Some(42));
}

#[test]
fn test_cache_get_nonexistent() {
    let cache: TtlCache<u32> = TtlCache::new();
    assert_eq!(cache.get("missing"), None);
}

#[tokio::test(start_paused = true)]
async fn test_entry_is_fresh_until_ttl_elapses() {
    let cache = TtlCache::new();
    cache.set_with_ttl("key", "value", Duration::from_secs(10));

    tokio::time::advance(Duration::from_millis(9_999)).await;
    assert_eq!(cache.get("key"), Some("value"));

    // Exactly at the TTL boundary the entry counts as expired
    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(cache.get("key"), None);
}

#[tokio::test(start_paused = true)]
async fn test_expired_get_evicts_entry() {
    let cache = TtlCache::new();
    cache.set_with_ttl("key", 1u8, Duration::from_secs(1));
    assert_eq!(cache.len(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(cache.get("key"), None);
    assert_eq!(cache.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stats_still_count_unread_stale_entries() {
    let cache = TtlCache::new();
    cache.set_with_ttl("stale", 1u8, Duration::from_secs(1));
    cache.set_with_ttl("fresh", 2u8, Duration::from_secs(60));

    tokio::time::advance(Duration::from_secs(5)).await;

    let stats = cache.stats();
    assert_eq!(stats.size, 2);
    assert_eq!(stats.keys, vec!["fresh".to_string(), "stale".to_string()]);

    // Reading the stale key evicts it
    assert_eq!(cache.get("stale"), None);
    assert_eq!(cache.stats().size, 1);
}

#[tokio::test(start_paused = true)]
async fn test_default_ttl_is_applied_by_set() {
    let cache = TtlCache::with_default_ttl(Duration::from_secs(30));
    cache.set("key", 7i32);

    tokio::time::advance(Duration::from_secs(29)).await;
    assert_eq!(cache.get("key"), Some(7));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(cache.get("key"), None);
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_resets_expiry() {
    let cache = TtlCache::new();
    cache.set_with_ttl("key", 1u8, Duration::from_secs(10));

    tokio::time::advance(Duration::from_secs(8)).await;
    cache.set_with_ttl("key", 2u8, Duration::from_secs(10));

    tokio::time::advance(Duration::from_secs(8)).await;
    assert_eq!(cache.get("key"), Some(2));
}

#[test]
fn test_cache_clear() {
    let cache = TtlCache::new();
    cache.set("a", 1u8);
    cache.set("b", 2u8);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats(), CacheStats { size: 0, keys: Vec::new() });
}

#[test]
fn test_cache_default() {
    let cache: TtlCache<String> = TtlCache::default();
    assert_eq!(cache.default_ttl(), DEFAULT_TTL);
    assert_eq!(cache.stats().size, 0);
}

#[test]
fn test_concurrent_access() {
    let cache = Arc::new(TtlCache::new());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("k{}", i % 10);
                    cache.set(key.clone(), worker * 1000 + i);
                    assert!(cache.get(&key).is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 10);
}

#[derive(Serialize)]
struct SearchShape<'a> {
    query: &'a str,
    limit: Option<usize>,
    category: Option<&'a str>,
}

#[derive(Serialize)]
struct ReorderedShape<'a> {
    category: Option<&'a str>,
    limit: Option<usize>,
    query: &'a str,
}

#[test]
fn test_cache_key_ignores_field_order() {
    let a = cache_key("search", &SearchShape { query: "led", limit: Some(2), category: Some("led") });
    let b = cache_key("search", &ReorderedShape { category: Some("led"), limit: Some(2), query: "led" });

    assert_eq!(a, b);
    assert_eq!(a, r#"search:{"category":"led","limit":2,"query":"led"}"#);
}

#[test]
fn test_cache_key_ignores_map_insertion_order() {
    let mut first = HashMap::new();
    first.insert("zeta", 1);
    first.insert("alpha", 2);

    let mut second = HashMap::new();
    second.insert("alpha", 2);
    second.insert("zeta", 1);

    assert_eq!(cache_key("op", &first), cache_key("op", &second));
}

#[test]
fn test_cache_key_drops_absent_parameters() {
    let key = cache_key("search", &SearchShape { query: "led", limit: None, category: None });
    assert_eq!(key, r#"search:{"query":"led"}"#);
}

#[test]
fn test_cache_key_separates_operations_and_values() {
    let search = cache_key("search", &SearchShape { query: "led", limit: None, category: None });
    let other_query = cache_key("search", &SearchShape { query: "leds", limit: None, category: None });
    let package = cache_key("package", &SearchShape { query: "led", limit: None, category: None });

    assert_ne!(search, other_query);
    assert_ne!(search, package);
}
