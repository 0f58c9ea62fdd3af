//! Pipeline controller: the boundary the transport layer calls into.
//!
//! Maps each stage request to exactly one executor invocation, enforces
//! the legal-transition table, and serializes concurrent requests per
//! asset id.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use vidpipe_media::{FfmpegTranscoder, FileNamer, Transcoder};
use vidpipe_models::{Asset, AssetId, AssetStatus, StageRequest};
use vidpipe_store::AssetStore;

use crate::config::{BusyPolicy, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::executor::StageExecutor;
use crate::locks::AssetLocks;

/// Orchestrates the upload → trim → subtitle → render pipeline.
pub struct PipelineController {
    store: Arc<dyn AssetStore>,
    executor: StageExecutor,
    locks: AssetLocks,
    busy_policy: BusyPolicy,
}

impl PipelineController {
    pub fn new(
        store: Arc<dyn AssetStore>,
        transcoder: Arc<dyn Transcoder>,
        config: PipelineConfig,
    ) -> Self {
        let namer = FileNamer::new(config.media_root.clone());
        let executor = StageExecutor::new(Arc::clone(&store), transcoder, namer);
        Self {
            store,
            executor,
            locks: AssetLocks::new(),
            busy_policy: config.busy_policy,
        }
    }

    /// Controller wired to the ffmpeg-backed transcoder, bounded by the
    /// configured invocation timeout.
    pub fn with_ffmpeg(store: Arc<dyn AssetStore>, config: PipelineConfig) -> Self {
        let transcoder = Arc::new(
            FfmpegTranscoder::new().with_timeout(config.transcode_timeout.as_secs()),
        );
        Self::new(store, transcoder, config)
    }

    /// Register a freshly uploaded asset. The source file has already
    /// been staged at `location` by the upload collaborator.
    pub async fn create_asset(
        &self,
        name: impl Into<String>,
        size: u64,
        location: impl Into<PathBuf>,
    ) -> PipelineResult<Asset> {
        let name = name.into();
        if name.is_empty() {
            return Err(PipelineError::InvalidParameters(
                "asset name must not be empty".into(),
            ));
        }

        let asset = self.store.create(Asset::new(name, size, location)).await?;
        info!(asset_id = %asset.id, "Asset created");
        Ok(asset)
    }

    /// Current record for an asset.
    pub async fn get_asset(&self, id: &AssetId) -> PipelineResult<Asset> {
        Ok(self.store.get(id).await?)
    }

    /// Cut the asset down to `[start, end)` seconds.
    pub async fn trim(&self, id: &AssetId, start: f64, end: f64) -> PipelineResult<Asset> {
        self.run_stage(id, StageRequest::Trim { start, end }).await
    }

    /// Burn one subtitle cue spanning `[start, end)` seconds.
    pub async fn subtitle(
        &self,
        id: &AssetId,
        text: impl Into<String>,
        start: f64,
        end: f64,
    ) -> PipelineResult<Asset> {
        self.run_stage(
            id,
            StageRequest::Subtitle {
                text: text.into(),
                start,
                end,
            },
        )
        .await
    }

    /// Produce the final output.
    pub async fn render(&self, id: &AssetId) -> PipelineResult<Asset> {
        self.run_stage(id, StageRequest::Render).await
    }

    /// Location of the rendered output, for download by the boundary.
    pub async fn fetch_output(&self, id: &AssetId) -> PipelineResult<PathBuf> {
        let asset = self.store.get(id).await?;

        if asset.status != AssetStatus::Rendered {
            return Err(PipelineError::NotReady(format!(
                "asset {} has status {}, render it first",
                asset.id, asset.status
            )));
        }

        let exists = tokio::fs::try_exists(&asset.location)
            .await
            .unwrap_or(false);
        if !exists {
            return Err(PipelineError::Storage(format!(
                "rendered output missing at {}",
                asset.location.display()
            )));
        }

        Ok(asset.location)
    }

    /// Run one mutating stage under the asset's lock.
    ///
    /// The record is read after the lock is held, so a queued request
    /// observes the state its predecessor left behind.
    async fn run_stage(&self, id: &AssetId, request: StageRequest) -> PipelineResult<Asset> {
        let _guard = match self.busy_policy {
            BusyPolicy::Queue => self.locks.acquire(id).await,
            BusyPolicy::Reject => self.locks.try_acquire(id).await.ok_or_else(|| {
                PipelineError::Conflict(format!("a stage is already in flight for asset {id}"))
            })?,
        };

        let asset = self.store.get(id).await?;
        self.executor.execute(&asset, &request).await
    }
}
