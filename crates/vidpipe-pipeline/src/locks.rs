//! Per-asset mutual exclusion.
//!
//! At most one stage operation may be in flight for a given asset id.
//! The table hands out one `tokio::sync::Mutex` per id; tokio's mutex
//! wakes waiters in FIFO order, which is what the queueing policy relies
//! on. Idle entries are pruned opportunistically on the next lookup.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use vidpipe_models::AssetId;

/// Guard held for the duration of one stage operation.
pub type AssetGuard = OwnedMutexGuard<()>;

/// Lock table keyed by asset id.
#[derive(Debug, Default)]
pub struct AssetLocks {
    inner: Mutex<HashMap<AssetId, Arc<Mutex<()>>>>,
}

impl AssetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the asset's lock, FIFO behind any in-flight operation.
    pub async fn acquire(&self, id: &AssetId) -> AssetGuard {
        self.handle(id).await.lock_owned().await
    }

    /// Take the asset's lock only if no operation is in flight.
    pub async fn try_acquire(&self, id: &AssetId) -> Option<AssetGuard> {
        self.handle(id).await.try_lock_owned().ok()
    }

    async fn handle(&self, id: &AssetId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().await;
        // A strong count of 1 means only the table holds the entry:
        // no guard and no waiter.
        map.retain(|_, m| Arc::strong_count(m) > 1);
        map.entry(id.clone()).or_default().clone()
    }

    /// Number of live entries (test helper).
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_try_acquire_fails_while_held() {
        let locks = AssetLocks::new();
        let id = AssetId::from_string("a");

        let guard = locks.acquire(&id).await;
        assert!(locks.try_acquire(&id).await.is_none());

        drop(guard);
        assert!(locks.try_acquire(&id).await.is_some());
    }

    #[tokio::test]
    async fn test_independent_assets_do_not_block() {
        let locks = AssetLocks::new();
        let _a = locks.acquire(&AssetId::from_string("a")).await;
        // Must not deadlock
        let _b = locks.acquire(&AssetId::from_string("b")).await;
    }

    #[tokio::test]
    async fn test_second_acquire_waits_for_release() {
        let locks = Arc::new(AssetLocks::new());
        let id = AssetId::from_string("a");

        let guard = locks.acquire(&id).await;

        let locks2 = Arc::clone(&locks);
        let id2 = id.clone();
        let waiter = tokio::spawn(async move {
            locks2.acquire(&id2).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_idle_entries_pruned() {
        let locks = AssetLocks::new();
        let id = AssetId::from_string("a");

        let guard = locks.acquire(&id).await;
        drop(guard);

        // Next lookup for a different id prunes the idle entry.
        let _b = locks.acquire(&AssetId::from_string("b")).await;
        assert_eq!(locks.len().await, 1);
    }
}
