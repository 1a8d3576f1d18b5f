use async_trait::async_trait;
use dashmap::DashMap;
use remember::ports::{TransientStore, TransientValue};
use shared::{Result, TtlSecs};
use std::hash::Hash;
use std::time::Instant;

struct TransientEntry<V> {
    value: V,
    deadline: Option<Instant>,
}

impl<V> TransientEntry<V> {
    fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }
}

/// DashMap-based transient store: ungrouped keys with a per-entry deadline.
/// Expiry is lazy, expired entries are reaped when a read touches them.
pub struct DashTransientStore<K, V> {
    entries: DashMap<K, TransientEntry<V>>,
}

impl<K, V> DashTransientStore<K, V>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> Default for DashTransientStore<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> TransientStore<K, V> for DashTransientStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: TransientValue + Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<V> {
        let now = Instant::now();

        // Take the value out of the guard before touching the map again;
        // removing while a shard reference is live would deadlock.
        let live = match self.entries.get(key) {
            Some(entry) if !entry.expired(now) => Some(entry.value.clone()),
            Some(_) => None,
            None => return Ok(V::absent()),
        };

        match live {
            Some(value) => Ok(value),
            None => {
                self.entries.remove_if(key, |_, entry| entry.expired(now));
                Ok(V::absent())
            }
        }
    }

    async fn set(&self, key: K, val: V, ttl: TtlSecs) -> Result<()> {
        let deadline = ttl.as_duration().map(|ttl| Instant::now() + ttl);
        self.entries.insert(key, TransientEntry { value: val, deadline });
        Ok(())
    }

    async fn delete(&self, key: &K) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

impl<K, V> std::fmt::Debug for DashTransientStore<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashTransientStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn missing_key_yields_sentinel() {
        let store: DashTransientStore<&str, Option<i64>> = DashTransientStore::new();

        assert!(store.get(&"nope").await.unwrap().is_absent());
    }

    #[tokio::test]
    async fn set_get_delete() {
        let store = DashTransientStore::new();

        store.set("key", Some(7), TtlSecs::UNBOUNDED).await.unwrap();
        assert_eq!(store.get(&"key").await.unwrap(), Some(7));

        assert!(store.delete(&"key").await.unwrap());
        assert!(!store.delete(&"key").await.unwrap());
        assert!(store.get(&"key").await.unwrap().is_absent());
    }

    #[tokio::test]
    async fn entries_expire_lazily() {
        let store = DashTransientStore::new();

        store.set("short", Some(1), TtlSecs(1)).await.unwrap();
        store.set("long", Some(2), TtlSecs::UNBOUNDED).await.unwrap();

        assert_eq!(store.get(&"short").await.unwrap(), Some(1));

        sleep(Duration::from_millis(1100)).await;

        assert!(store.get(&"short").await.unwrap().is_absent());
        assert_eq!(store.get(&"long").await.unwrap(), Some(2));
        // the expired entry was reaped by the read
        assert_eq!(store.entries.len(), 1);
    }

    #[tokio::test]
    async fn stored_sentinel_is_indistinguishable_from_miss() {
        let store: DashTransientStore<&str, Option<i64>> = DashTransientStore::new();

        store.set("none", None, TtlSecs::UNBOUNDED).await.unwrap();

        assert!(store.get(&"none").await.unwrap().is_absent());
    }

    #[tokio::test]
    async fn overwrite_resets_deadline() {
        let store = DashTransientStore::new();

        store.set("key", Some(1), TtlSecs(1)).await.unwrap();
        store.set("key", Some(2), TtlSecs::UNBOUNDED).await.unwrap();

        sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.get(&"key").await.unwrap(), Some(2));
    }
}
