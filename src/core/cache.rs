use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Process-lifetime memo of provider responses. Nothing is written to disk.
#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cached value for `key`, or runs `fetch` and stores its
    /// successful result. Errors are not cached. The lock is held while
    /// fetching so concurrent callers for the same key issue one request.
    pub async fn get_or_try_insert_with<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let mut cache = self.inner.lock().await;
        if let Some(value) = cache.get(&key) {
            debug!(?key, "Cache HIT");
            return Ok(value.clone());
        }
        debug!(?key, "Cache MISS");
        let value = fetch().await?;
        debug!(?key, "Cache PUT");
        cache.insert(key, value.clone());
        Ok(value)
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
