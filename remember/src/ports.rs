#![deny(clippy::all)]

use async_trait::async_trait;
use shared::{Result, TtlSecs};

// Ports are the pluggable seams for the host platform's cache stores.

/// Port for a grouped object cache.
///
/// `get` keeps "found" separate from the payload: `Some` is always a hit,
/// even when the cached value is empty, zero or false-like. A store must
/// never signal a miss by returning a value from the payload's own domain.
#[async_trait]
pub trait ObjectCache<K, V>: Send + Sync + 'static {
    async fn get(&self, key: &K, group: &str) -> Result<Option<V>>;
    async fn set(&self, key: K, val: V, group: &str, ttl: TtlSecs) -> Result<()>;
    /// Returns whether the entry was present.
    async fn delete(&self, key: &K, group: &str) -> Result<bool>;
}

/// Port for the reduced transient store shape: no group dimension, and a
/// miss is signalled in band by returning [`TransientValue::absent`].
///
/// A stored value equal to the sentinel cannot be told apart from a miss;
/// that ambiguity is inherent to this shape and is kept for compatibility
/// with hosts whose transient API works this way. Use [`ObjectCache`] when
/// the distinction matters.
#[async_trait]
pub trait TransientStore<K, V>: Send + Sync + 'static
where
    V: TransientValue,
{
    async fn get(&self, key: &K) -> Result<V>;
    async fn set(&self, key: K, val: V, ttl: TtlSecs) -> Result<()>;
    async fn delete(&self, key: &K) -> Result<bool>;
}

/// Reserved-sentinel contract for transient payloads. Pick a sentinel that
/// sits outside the domain of values callers actually store.
pub trait TransientValue {
    fn absent() -> Self;
    fn is_absent(&self) -> bool;
}

impl<T> TransientValue for Option<T> {
    fn absent() -> Self {
        None
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}
