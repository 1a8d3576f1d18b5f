use crate::ports::{ObjectCache, TransientStore, TransientValue};
use shared::{Result, TtlSecs};
use std::future::Future;
use std::sync::Arc;
use tracing::trace;

/// Memoizing facade over a grouped object cache.
///
/// `remember` is get-or-compute-and-store, `forget` is a pop. The facade
/// holds no state beyond the store reference and adds no locking: two
/// callers racing on the same missing key may each run their producer and
/// each write, with the final entry decided by the store's own write
/// ordering. Deliberately no single-flight; adding it would change the
/// latency profile for high-fan-in keys.
#[derive(Clone)]
pub struct RememberCache<K, V> {
    store: Arc<dyn ObjectCache<K, V>>,
}

impl<K, V> RememberCache<K, V>
where
    K: Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn ObjectCache<K, V>>) -> Self {
        Self { store }
    }

    /// Fetch `key` from the store, or run `producer` to build the value and
    /// store it under `(key, group)` with `ttl`.
    ///
    /// The producer runs at most once, and only on a miss; a cached empty or
    /// false-like payload is still a hit and short-circuits. A producer
    /// failure propagates before any write happens, so no partial entry is
    /// left behind. Store failures propagate unchanged; nothing is retried.
    pub async fn remember<F, Fut>(
        &self,
        key: K,
        group: &str,
        ttl: TtlSecs,
        producer: F,
    ) -> Result<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send,
    {
        if let Some(cached) = self.store.get(&key, group).await? {
            trace!(group, "cache hit");
            return Ok(cached);
        }

        trace!(group, "cache miss, running producer");
        let value = producer().await?;
        self.store.set(key, value.clone(), group, ttl).await?;

        Ok(value)
    }

    /// Pop `(key, group)`: return the cached value and delete the entry, or
    /// return `default` when nothing is cached (no delete is issued then).
    ///
    /// The value read is returned even if the delete itself fails; by that
    /// point it has already been captured.
    pub async fn forget(&self, key: &K, group: &str, default: V) -> Result<V> {
        match self.store.get(key, group).await? {
            Some(cached) => {
                let _ = self.store.delete(key, group).await;
                Ok(cached)
            }
            None => Ok(default),
        }
    }
}

/// Memoizing facade over the reduced transient store shape.
///
/// Same sequences as [`RememberCache`], with [`TransientValue::is_absent`]
/// as the miss probe. Inherits that shape's ambiguity: a cached sentinel
/// value reads as a miss.
#[derive(Clone)]
pub struct TransientCache<K, V>
where
    V: TransientValue,
{
    store: Arc<dyn TransientStore<K, V>>,
}

impl<K, V> TransientCache<K, V>
where
    K: Send + Sync + 'static,
    V: TransientValue + Clone + Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn TransientStore<K, V>>) -> Self {
        Self { store }
    }

    /// Fetch `key`, or run `producer` and store the result with `ttl`.
    pub async fn remember<F, Fut>(&self, key: K, ttl: TtlSecs, producer: F) -> Result<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send,
    {
        let cached = self.store.get(&key).await?;
        if !cached.is_absent() {
            trace!("transient hit");
            return Ok(cached);
        }

        trace!("transient miss, running producer");
        let value = producer().await?;
        self.store.set(key, value.clone(), ttl).await?;

        Ok(value)
    }

    /// Pop `key`: return the cached value and delete it, or `default` on a
    /// miss.
    pub async fn forget(&self, key: &K, default: V) -> Result<V> {
        let cached = self.store.get(key).await?;
        if cached.is_absent() {
            return Ok(default);
        }

        let _ = self.store.delete(key).await;
        Ok(cached)
    }
}
