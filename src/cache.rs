use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Raw page storage with a time-to-live. Expired entries read as misses.
pub trait Cache {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, content: &str) -> Result<(), AppError>;
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub content: String,
}

impl CacheEntry {
    pub fn new(key: &str, content: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        CacheEntry {
            key: key.to_string(),
            created_at: now,
            expires_at: now + ttl,
            content: content.to_string(),
        }
    }

    pub fn is_fresh(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// Stable key for one (source, champion, role) page.
pub fn cache_key(source: &str, champion: &str, role: &str) -> String {
    let mut hasher = DefaultHasher::new();
    champion.to_lowercase().hash(&mut hasher);
    role.to_lowercase().hash(&mut hasher);
    format!("{}_{:016x}", source, hasher.finish())
}

/// One JSON file per entry. No locking; the last writer wins.
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        FileCache { dir, ttl }
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let content = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("ignoring unreadable cache file {}: {}", path.display(), e);
                return None;
            }
        };

        if entry.is_fresh() {
            Some(entry.content)
        } else {
            debug!("cache entry {} expired at {}", key, entry.expires_at);
            None
        }
    }

    fn put(&mut self, key: &str, content: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::CacheError(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let entry = CacheEntry::new(key, content, self.ttl);
        let json = serde_json::to_string(&entry).map_err(|e| {
            AppError::CacheError(format!("Failed to serialize cache entry: {}", e))
        })?;

        fs::write(self.entry_path(key), json).map_err(|e| {
            AppError::CacheError(format!("Failed to write cache: {}", e))
        })?;

        Ok(())
    }
}

/// Same semantics as [`FileCache`], kept in memory.
#[cfg(test)]
#[derive(Debug)]
pub struct MemoryCache {
    ttl: Duration,
    entries: std::collections::HashMap<String, CacheEntry>,
}

#[cfg(test)]
impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        MemoryCache {
            ttl,
            entries: std::collections::HashMap::new(),
        }
    }
}

#[cfg(test)]
impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.content.clone())
    }

    fn put(&mut self, key: &str, content: &str) -> Result<(), AppError> {
        self.entries
            .insert(key.to_string(), CacheEntry::new(key, content, self.ttl));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "counter_pick_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_key_is_stable_and_case_insensitive() {
        assert_eq!(cache_key("ugg", "Darius", "top"), cache_key("ugg", "darius", "TOP"));
        assert_ne!(cache_key("ugg", "darius", "top"), cache_key("ugg", "darius", "mid"));
        assert_ne!(cache_key("ugg", "darius", "top"), cache_key("lolalytics", "darius", "top"));
        assert!(cache_key("ugg", "darius", "top").starts_with("ugg_"));
    }

    #[test]
    fn test_file_cache_round_trip() {
        let dir = temp_dir("round_trip");
        let mut cache = FileCache::new(dir.clone(), Duration::hours(72));
        let html = "<script>window.__SSR_DATA__ = {\"ü\": \"}\"}</script>";

        assert!(cache.get("k").is_none());
        cache.put("k", html).unwrap();
        assert_eq!(cache.get("k").as_deref(), Some(html));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_cache_expired_and_corrupt_entries_miss() {
        let dir = temp_dir("expired");
        let mut cache = FileCache::new(dir.clone(), Duration::seconds(-1));
        cache.put("old", "stale").unwrap();
        assert!(cache.get("old").is_none());

        fs::write(cache.entry_path("broken"), "{not json").unwrap();
        assert!(cache.get("broken").is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_memory_cache_ttl() {
        let mut fresh = MemoryCache::new(Duration::hours(1));
        fresh.put("a", "1").unwrap();
        assert_eq!(fresh.get("a").as_deref(), Some("1"));

        let mut stale = MemoryCache::new(Duration::seconds(-1));
        stale.put("a", "1").unwrap();
        assert!(stale.get("a").is_none());
    }
}
