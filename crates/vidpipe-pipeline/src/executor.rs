//! Stage execution.
//!
//! Runs one pipeline stage end to end: transition check, command
//! derivation, transcoder invocation, and the atomic record update on
//! confirmed completion. A failed invocation leaves the record exactly
//! as it was.

use std::sync::Arc;

use tracing::{error, info, warn};

use vidpipe_media::{
    FileNamer, StageTag, SubtitleCue, TranscodeOp, TranscodeSpec, Transcoder, TransientTrack,
};
use vidpipe_models::{Asset, AssetStatus, StageKind, StageRequest};
use vidpipe_store::AssetStore;

use crate::error::{PipelineError, PipelineResult};

/// Executes a single stage against the transcoder and the record store.
pub struct StageExecutor {
    store: Arc<dyn AssetStore>,
    transcoder: Arc<dyn Transcoder>,
    namer: FileNamer,
}

impl StageExecutor {
    pub fn new(
        store: Arc<dyn AssetStore>,
        transcoder: Arc<dyn Transcoder>,
        namer: FileNamer,
    ) -> Self {
        Self {
            store,
            transcoder,
            namer,
        }
    }

    /// Run `request` against `asset`.
    ///
    /// The caller must hold the asset's lock and pass the current record;
    /// on success the returned record reflects the advanced stage.
    pub async fn execute(&self, asset: &Asset, request: &StageRequest) -> PipelineResult<Asset> {
        let kind = request.kind();

        if !kind.allowed_from(asset.status) {
            return Err(PipelineError::IllegalTransition {
                from: asset.status,
                requested: kind,
            });
        }

        match request {
            StageRequest::Trim { start, end } => {
                let output = self
                    .namer
                    .stage_output(&asset.id, StageTag::Trimmed, &asset.name)?;
                let spec = TranscodeSpec::new(
                    &asset.location,
                    &output,
                    TranscodeOp::Trim {
                        start: *start,
                        end: *end,
                    },
                );
                spec.validate()?;
                self.run_and_advance(asset, kind, spec).await
            }
            StageRequest::Subtitle { text, start, end } => {
                let cue = SubtitleCue::new(text.clone(), *start, *end)?;
                self.burn_subtitles(asset, kind, cue).await
            }
            StageRequest::Render => {
                // A repeat render would hand the transcoder the current
                // final file as both input and output, truncating it on
                // open. The existing output is already authoritative.
                if asset.status == AssetStatus::Rendered {
                    info!(asset_id = %asset.id, "Already rendered, returning existing output");
                    return Ok(asset.clone());
                }

                let output = self
                    .namer
                    .stage_output(&asset.id, StageTag::Final, &asset.name)?;
                let spec = TranscodeSpec::new(&asset.location, &output, TranscodeOp::Render);
                self.run_and_advance(asset, kind, spec).await
            }
        }
    }

    /// Subtitle stage: the cue track is scoped to this one invocation and
    /// removed on success and failure alike.
    async fn burn_subtitles(
        &self,
        asset: &Asset,
        kind: StageKind,
        cue: SubtitleCue,
    ) -> PipelineResult<Asset> {
        let track_path =
            self.namer
                .stage_output(&asset.id, StageTag::SubtitleTrack, &asset.name)?;
        let track = TransientTrack::write(&track_path, &[cue]).await?;

        let output = self
            .namer
            .stage_output(&asset.id, StageTag::Subtitled, &asset.name)?;
        let spec = TranscodeSpec::new(
            &asset.location,
            &output,
            TranscodeOp::BurnSubtitles {
                track: track.path().to_path_buf(),
            },
        );

        let result = self.run_and_advance(asset, kind, spec).await;

        if let Err(e) = track.remove().await {
            warn!(asset_id = %asset.id, "Failed to remove transient subtitle track: {}", e);
        }

        result
    }

    async fn run_and_advance(
        &self,
        asset: &Asset,
        kind: StageKind,
        spec: TranscodeSpec,
    ) -> PipelineResult<Asset> {
        info!(
            asset_id = %asset.id,
            stage = %kind,
            input = %spec.input.display(),
            output = %spec.output.display(),
            "Stage started"
        );

        match self.transcoder.run(&spec).await {
            Ok(output) => {
                let updated = self
                    .store
                    .advance_stage(&asset.id, kind.resulting_status(), output)
                    .await?;
                info!(
                    asset_id = %asset.id,
                    stage = %kind,
                    status = %updated.status,
                    "Stage completed"
                );
                Ok(updated)
            }
            Err(e) => {
                error!(
                    asset_id = %asset.id,
                    stage = %kind,
                    "Stage failed: {}",
                    e.diagnostic()
                );
                Err(e.into())
            }
        }
    }
}
