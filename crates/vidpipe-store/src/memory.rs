//! In-memory asset store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use vidpipe_models::{Asset, AssetId, AssetStatus};

use crate::error::{StoreError, StoreResult};
use crate::AssetStore;

/// Map-backed store, the default for the core and its tests.
///
/// `advance_stage` mutates status and location inside one write guard,
/// so no reader ever sees the new status with the old location.
#[derive(Debug, Default)]
pub struct MemoryStore {
    assets: RwLock<HashMap<AssetId, Asset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test helper).
    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn get(&self, id: &AssetId) -> StoreResult<Asset> {
        self.assets
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id.as_str()))
    }

    async fn create(&self, asset: Asset) -> StoreResult<Asset> {
        let mut assets = self.assets.write().await;
        if assets.contains_key(&asset.id) {
            return Err(StoreError::AlreadyExists(asset.id.to_string()));
        }
        info!("Created asset record: {}", asset.id);
        assets.insert(asset.id.clone(), asset.clone());
        Ok(asset)
    }

    async fn advance_stage(
        &self,
        id: &AssetId,
        status: AssetStatus,
        location: PathBuf,
    ) -> StoreResult<Asset> {
        let mut assets = self.assets.write().await;
        let asset = assets
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;

        asset.status = status;
        asset.location = location;
        asset.updated_at = Utc::now();
        Ok(asset.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let asset = Asset::new("clip.mp4", 42, "/media/clip.mp4");
        let id = asset.id.clone();

        store.create(asset).await.unwrap();
        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched.name, "clip.mp4");
        assert_eq!(fetched.status, AssetStatus::Uploaded);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get(&AssetId::from_string("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_create_rejected() {
        let store = MemoryStore::new();
        let asset = Asset::new("clip.mp4", 42, "/media/clip.mp4");

        store.create(asset.clone()).await.unwrap();
        let err = store.create(asset).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_advance_stage_updates_both_fields() {
        let store = MemoryStore::new();
        let asset = Asset::new("clip.mp4", 42, "/media/clip.mp4");
        let id = asset.id.clone();
        store.create(asset).await.unwrap();

        let updated = store
            .advance_stage(&id, AssetStatus::Trimmed, PathBuf::from("/media/trimmed.mp4"))
            .await
            .unwrap();

        assert_eq!(updated.status, AssetStatus::Trimmed);
        assert_eq!(updated.location, PathBuf::from("/media/trimmed.mp4"));

        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched.status, AssetStatus::Trimmed);
        assert_eq!(fetched.location, PathBuf::from("/media/trimmed.mp4"));
    }

    #[tokio::test]
    async fn test_advance_stage_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .advance_stage(
                &AssetId::from_string("nope"),
                AssetStatus::Rendered,
                PathBuf::from("/media/out.mp4"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
