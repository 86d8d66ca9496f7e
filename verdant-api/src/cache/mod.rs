mod memory_store;
mod noop_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use verdant_core::EntityId;

use memory_store::MemoryCacheStore;
use noop_store::NoopCacheStore;

/// Replies stay cached for the rest of the session unless configured otherwise.
pub const DEFAULT_SESSION_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled(NoopCacheStore),
    Memory(MemoryCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
    ttl: Duration,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled(NoopCacheStore),
            ttl: DEFAULT_SESSION_CACHE_TTL,
        }
    }

    pub fn memory(prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Memory(MemoryCacheStore::new()),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Memory(_))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled(store) => store.get(key).await,
            CacheBackend::Memory(store) => store.get(key).await,
        }?;

        match value {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let ttl_seconds = ttl.as_secs().max(1);
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;

        match &self.backend {
            CacheBackend::Disabled(store) => store.set(key, payload, ttl_seconds).await,
            CacheBackend::Memory(store) => store.set(key, payload, ttl_seconds).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.del(key).await,
            CacheBackend::Memory(store) => store.del(key).await,
        }
    }

    /// Return the cached value for `key`, or run `loader` and cache its result.
    ///
    /// Cache failures are logged and never fail the call. Loader failures are
    /// returned unchanged and nothing is cached.
    pub async fn get_or_load_json<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(?e, cache_key = key, "cache get failed; falling back to backend"),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(?e, cache_key = key, "cache set failed; returning backend value");
        }

        Ok(loaded)
    }
}

pub fn replies_key(cache: &CacheService, comment_id: &EntityId) -> String {
    cache.key(format!("replies:{}", comment_id))
}

/// Maps a cached reply to the comment whose reply list holds it.
pub fn reply_parent_key(cache: &CacheService, reply_id: &EntityId) -> String {
    cache.key(format!("reply-parent:{}", reply_id))
}
