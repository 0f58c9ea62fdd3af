//! Asset record store capability.
//!
//! The pipeline core consumes this as a key-value persistence seam;
//! concrete durable backends live behind the same trait.

use std::path::PathBuf;

use async_trait::async_trait;

use vidpipe_models::{Asset, AssetId, AssetStatus};

pub mod error;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Durable mapping from asset id to its current record.
///
/// `advance_stage` is the only mutation the pipeline performs after
/// creation; it must apply status and location together, atomically with
/// respect to concurrent readers.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Fetch an asset by id.
    async fn get(&self, id: &AssetId) -> StoreResult<Asset>;

    /// Persist a freshly created asset record.
    async fn create(&self, asset: Asset) -> StoreResult<Asset>;

    /// Record a completed stage: new status and authoritative location.
    async fn advance_stage(
        &self,
        id: &AssetId,
        status: AssetStatus,
        location: PathBuf,
    ) -> StoreResult<Asset>;
}
