use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use remember::ports::ObjectCache;
use shared::{Result, TtlSecs};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::config::StoreConfig;

/// Cached payload together with the TTL requested at set time, so the
/// expiry policy can read it back. `TtlSecs(0)` means no expiry.
#[derive(Clone, Debug)]
struct Stored<V> {
    value: V,
    ttl: TtlSecs,
}

struct PerEntryTtl;

impl<K, V> Expiry<K, Stored<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &Stored<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl.as_duration()
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &Stored<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // an overwrite restarts the clock with its own ttl
        value.ttl.as_duration()
    }
}

/// Moka-based grouped object cache with per-entry TTL.
/// Groups are folded into a composite key, so entries in different groups
/// never collide.
pub struct MokaObjectCache<K, V>
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Clone + Send + Sync + 'static,
{
    cache: Cache<(String, K), Stored<V>>,
    default_ttl: TtlSecs,
}

impl<K, V> MokaObjectCache<K, V>
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Clone + Send + Sync + 'static,
{
    /// Create a cache with an optional entry bound and no default TTL.
    pub fn new(name: impl Into<String>, max_entries: Option<u64>) -> Self {
        Self::build(name.into(), max_entries, TtlSecs::UNBOUNDED)
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::build(
            config.name.clone(),
            config.max_entries,
            TtlSecs(config.default_ttl_secs.unwrap_or(0)),
        )
    }

    fn build(name: String, max_entries: Option<u64>, default_ttl: TtlSecs) -> Self {
        let mut builder = Cache::builder().name(&name).expire_after(PerEntryTtl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
            default_ttl,
        }
    }
}

#[async_trait]
impl<K, V> ObjectCache<K, V> for MokaObjectCache<K, V>
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K, group: &str) -> Result<Option<V>> {
        let entry = self.cache.get(&(group.to_string(), key.clone())).await;
        Ok(entry.map(|stored| stored.value))
    }

    async fn set(&self, key: K, val: V, group: &str, ttl: TtlSecs) -> Result<()> {
        let ttl = if ttl == TtlSecs::UNBOUNDED {
            self.default_ttl
        } else {
            ttl
        };

        self.cache
            .insert((group.to_string(), key), Stored { value: val, ttl })
            .await;
        Ok(())
    }

    async fn delete(&self, key: &K, group: &str) -> Result<bool> {
        let removed = self.cache.remove(&(group.to_string(), key.clone())).await;
        Ok(removed.is_some())
    }
}

impl<K, V> Debug for MokaObjectCache<K, V>
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaObjectCache")
            .field("entry_count", &self.cache.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
