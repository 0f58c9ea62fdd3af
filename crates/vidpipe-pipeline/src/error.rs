//! Pipeline error taxonomy.
//!
//! Every failure is request-scoped and recoverable: it surfaces a
//! machine-checkable kind plus a human-readable diagnostic, and never
//! leaves the asset record half-updated.

use thiserror::Error;

use vidpipe_media::MediaError;
use vidpipe_models::{AssetStatus, StageKind};
use vidpipe_store::StoreError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced to the boundary layer.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Illegal transition: {requested} is not allowed from status {from}")]
    IllegalTransition {
        from: AssetStatus,
        requested: StageKind,
    },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transcode failed: {0}")]
    TranscodeFailed(String),

    #[error("Not ready: {0}")]
    NotReady(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PipelineError {
    /// Stable machine-checkable kind tag for the boundary layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::IllegalTransition { .. } => "illegal_transition",
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::Conflict(_) => "conflict",
            Self::TranscodeFailed(_) => "transcode_failed",
            Self::NotReady(_) => "not_ready",
            Self::Storage(_) => "storage_error",
        }
    }
}

impl From<StoreError> for PipelineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<MediaError> for PipelineError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::InvalidInput(msg) => Self::InvalidParameters(msg),
            other => Self::TranscodeFailed(other.diagnostic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: PipelineError = StoreError::not_found("abc").into();
        assert!(matches!(err, PipelineError::NotFound(_)));
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_media_invalid_input_maps_to_invalid_parameters() {
        let err: PipelineError = MediaError::invalid_input("bad trim range").into();
        assert!(matches!(err, PipelineError::InvalidParameters(_)));
    }

    #[test]
    fn test_media_io_failure_is_not_a_storage_error() {
        // Storage is reserved for record read/write failures; a media
        // file I/O failure stays on the transcode side of the taxonomy.
        let io = MediaError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        let err: PipelineError = io.into();
        assert!(matches!(err, PipelineError::TranscodeFailed(_)));
    }

    #[test]
    fn test_ffmpeg_failure_carries_diagnostic() {
        let media = MediaError::ffmpeg_failed("boom", Some("stderr text".into()), Some(1));
        let err: PipelineError = media.into();
        match err {
            PipelineError::TranscodeFailed(diag) => assert!(diag.contains("stderr text")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
