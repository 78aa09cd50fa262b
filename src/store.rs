//! Session and cache store seams.
//!
//! The crate owns no persistence: the host hands it a per-session key/value
//! store (sticky detected region) and a shared TTL cache (IP -> region
//! memoization). In-memory implementations are provided for tests and for
//! hosts without their own stores.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-session key/value store.
///
/// One instance per user session; no cross-session contention.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn forget(&self, key: &str);
}

/// Shared TTL cache, possibly accessed by many requests concurrently.
///
/// Entries are idempotent, so a lost race only costs a redundant external
/// lookup, never an incorrect result.
pub trait DetectionCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str, ttl: Duration);
}

/// In-memory session store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("session lock poisoned").get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("session lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn forget(&self, key: &str) {
        self.entries.lock().expect("session lock poisoned").remove(key);
    }
}

/// In-memory TTL cache. Expired entries are dropped on read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DetectionCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Session Store Tests ====================

    #[test]
    fn test_session_put_get() {
        let store = MemorySessionStore::new();
        store.put("lusophone_region", "MZ");
        assert_eq!(store.get("lusophone_region"), Some("MZ".to_string()));
    }

    #[test]
    fn test_session_forget() {
        let store = MemorySessionStore::new();
        store.put("lusophone_region", "PT");
        store.forget("lusophone_region");
        assert_eq!(store.get("lusophone_region"), None);
    }

    #[test]
    fn test_session_missing_key() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn test_session_overwrite() {
        let store = MemorySessionStore::new();
        store.put("k", "PT");
        store.put("k", "BR");
        assert_eq!(store.get("k"), Some("BR".to_string()));
    }

    // ==================== Cache Tests ====================

    #[test]
    fn test_cache_put_get() {
        let cache = MemoryCache::new();
        cache.put("ip_detection_1.2.3.4", "MZ", Duration::from_secs(60));
        assert_eq!(
            cache.get("ip_detection_1.2.3.4"),
            Some("MZ".to_string())
        );
    }

    #[test]
    fn test_cache_expires() {
        let cache = MemoryCache::new();
        cache.put("k", "PT", Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_cache_missing_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("missing"), None);
    }
}
