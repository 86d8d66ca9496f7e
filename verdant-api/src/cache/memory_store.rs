use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// Process-local store. Lives as long as the session that owns the client.
#[derive(Clone, Debug, Default)]
pub struct MemoryCacheStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let mut entries = self.lock()?;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
        }

        Ok(None)
    }

    pub async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> anyhow::Result<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.lock()?
            .insert(key.to_owned(), Entry { value, expires_at });
        Ok(())
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
