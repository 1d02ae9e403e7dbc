//! Response caching with TTL support

use std::time::Duration;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::time::Instant;

/// Default time-to-live for cached responses (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache entry with TTL
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// Cached value
    pub data: T,
    /// When the entry was stored
    pub created_at: Instant,
    /// Time-to-live duration
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Create new cache entry with the default TTL
    pub fn new(data: T) -> Self {
        Self::with_ttl(data, DEFAULT_TTL)
    }

    /// Create cache entry with custom TTL
    pub fn with_ttl(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Check if cache entry is still fresh; an entry exactly `ttl` old is stale
    pub fn is_fresh(&self) -> bool {
        self.age() < self.ttl
    }

    /// Get age of cache entry
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// In-memory key/value cache with per-entry expiry.
///
/// Expiry is lazy: a stale entry is evicted by the `get` that finds it.
/// Nothing sweeps entries nobody reads, so [`CacheStats::size`] may count
/// stale entries.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Cache storage
    entries: DashMap<String, CacheEntry<V>>,
    /// TTL applied by `set`
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create new cache with the default TTL
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    /// Create cache whose `set` uses the given TTL
    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// TTL applied by `set`
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get cached value if fresh, evicting it if stale
    pub fn get(&self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh() => return Some(entry.data.clone()),
            Some(_) => {}
            None => return None,
        }

        // The read guard is released above; holding it across remove would deadlock the shard.
        // remove_if re-checks so an entry overwritten in between survives.
        self.entries.remove_if(key, |_, entry| !entry.is_fresh());
        None
    }

    /// Store value with the default TTL
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store value with custom TTL
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::with_ttl(value, ttl));
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of entries present, stale or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.entries.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();

        CacheStats {
            size: keys.len(),
            keys,
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries present
    pub size: usize,
    /// Keys present, sorted
    pub keys: Vec<String>,
}

/// Build the cache key for an operation and its parameters.
///
/// Parameters are serialized to JSON with object keys sorted and null fields
/// dropped, so the key depends only on the logical parameter values.
pub fn cache_key<P: Serialize>(operation: &str, params: &P) -> String {
    let value = serde_json::to_value(params).unwrap_or(Value::Null);
    format!("{}:{}", operation, canonicalize(value))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (key, field) in fields {
                sorted.insert(key, canonicalize(field));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests;
