// storage-engine/src/lib.rs

//! In-memory adapters implementing the `remember` ports: a moka-backed
//! grouped object cache and a dashmap-backed transient store.

pub mod config;
pub mod moka_cache;
pub mod transient;

pub use config::StoreConfig;
pub use moka_cache::MokaObjectCache;
pub use transient::DashTransientStore;

#[cfg(test)]
mod tests {
    use super::*;
    use remember::{RememberCache, TransientCache};
    use shared::TtlSecs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // End-to-end: facades wired to the real adapters.

    #[tokio::test]
    async fn remember_over_moka_round_trip() {
        let store = Arc::new(MokaObjectCache::<String, String>::new("e2e", None));
        let cache: RememberCache<String, String> = RememberCache::new(store);

        let calls = AtomicUsize::new(0);
        let value = cache
            .remember("user:1".to_string(), "users", TtlSecs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("alice".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "alice");

        // served from cache, producer untouched
        let value = cache
            .remember("user:1".to_string(), "users", TtlSecs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("bob".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "alice");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let popped = cache
            .forget(&"user:1".to_string(), "users", String::new())
            .await
            .unwrap();
        assert_eq!(popped, "alice");

        let after = cache
            .forget(&"user:1".to_string(), "users", "gone".to_string())
            .await
            .unwrap();
        assert_eq!(after, "gone");
    }

    #[tokio::test]
    async fn transient_over_dashmap_round_trip() {
        let store = Arc::new(DashTransientStore::<String, Option<u64>>::new());
        let cache: TransientCache<String, Option<u64>> = TransientCache::new(store);

        let value = cache
            .remember("count".to_string(), TtlSecs(30), || async { Ok(Some(3)) })
            .await
            .unwrap();
        assert_eq!(value, Some(3));

        assert_eq!(cache.forget(&"count".to_string(), None).await.unwrap(), Some(3));
        assert_eq!(cache.forget(&"count".to_string(), None).await.unwrap(), None);
    }
}
