use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Filesystem cache of successful JSON responses, one file per URL.
///
/// The filename is the hex SHA-256 of the URL, so keys are stable across
/// runs and never leak URL contents into directory listings. Corrupt or
/// expired entries behave as misses; a zero max age disables reads while
/// still recording responses.
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: serde_json::Value,
}

impl ResponseCache {
    pub fn new(dir: &Path, max_age_secs: u64) -> Self {
        Self {
            dir: dir.to_path_buf(),
            max_age: Duration::seconds(max_age_secs as i64),
        }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    pub fn lookup(&self, url: &str, now: DateTime<Utc>) -> Option<serde_json::Value> {
        let path = self.entry_path(url);
        let raw = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt cache entry");
                return None;
            }
        };
        if now - entry.fetched_at >= self.max_age {
            return None;
        }
        Some(entry.body)
    }

    pub fn store(&self, url: &str, body: &serde_json::Value, now: DateTime<Utc>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: now,
            body: body.clone(),
        };
        std::fs::write(self.entry_path(url), serde_json::to_vec(&entry)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_store_then_lookup_hits() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), 3600);
        let body = serde_json::json!({"status": "ok"});

        cache.store("https://example.test/a", &body, now()).unwrap();
        let hit = cache.lookup("https://example.test/a", now()).unwrap();
        assert_eq!(hit, body);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), 3600);
        let body = serde_json::json!({"status": "ok"});

        cache.store("https://example.test/a", &body, now()).unwrap();
        let later = now() + Duration::seconds(3600);
        assert!(cache.lookup("https://example.test/a", later).is_none());
    }

    #[test]
    fn test_zero_max_age_disables_reads() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), 0);
        let body = serde_json::json!({"status": "ok"});

        cache.store("https://example.test/a", &body, now()).unwrap();
        assert!(cache.lookup("https://example.test/a", now()).is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), 3600);

        let path = cache.entry_path("https://example.test/a");
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(&path, "not json at all").unwrap();
        assert!(cache.lookup("https://example.test/a", now()).is_none());
    }

    #[test]
    fn test_distinct_urls_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), 3600);

        cache
            .store("https://example.test/a", &serde_json::json!(1), now())
            .unwrap();
        cache
            .store("https://example.test/b", &serde_json::json!(2), now())
            .unwrap();
        assert_eq!(
            cache.lookup("https://example.test/a", now()).unwrap(),
            serde_json::json!(1)
        );
        assert_eq!(
            cache.lookup("https://example.test/b", now()).unwrap(),
            serde_json::json!(2)
        );
    }
}
