//! Stage requests and the transition-table key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::AssetStatus;

/// Kind of pipeline stage, independent of its parameters.
///
/// Used as the key into the legal-transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Trim,
    Subtitle,
    Render,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Trim => "trim",
            StageKind::Subtitle => "subtitle",
            StageKind::Render => "render",
        }
    }

    /// Whether a stage may be requested from the given status.
    ///
    /// Trim only applies to a fresh upload; subtitles may be burned into
    /// the upload or the trimmed cut; render is the finalize operation and
    /// is accepted from any state, including re-rendering an already
    /// rendered asset.
    pub fn allowed_from(&self, status: AssetStatus) -> bool {
        match self {
            StageKind::Trim => matches!(status, AssetStatus::Uploaded),
            StageKind::Subtitle => {
                matches!(status, AssetStatus::Uploaded | AssetStatus::Trimmed)
            }
            StageKind::Render => true,
        }
    }

    /// The status an asset holds after this stage completes.
    pub fn resulting_status(&self) -> AssetStatus {
        match self {
            StageKind::Trim => AssetStatus::Trimmed,
            StageKind::Subtitle => AssetStatus::Subtitled,
            StageKind::Render => AssetStatus::Rendered,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stage request with its parameters, as received from the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageRequest {
    /// Cut the asset down to `[start, end)` seconds.
    Trim { start: f64, end: f64 },
    /// Burn a single subtitle cue spanning `[start, end)` seconds.
    Subtitle {
        text: String,
        start: f64,
        end: f64,
    },
    /// Produce the final output from the current authoritative file.
    Render,
}

impl StageRequest {
    pub fn kind(&self) -> StageKind {
        match self {
            StageRequest::Trim { .. } => StageKind::Trim,
            StageRequest::Subtitle { .. } => StageKind::Subtitle,
            StageRequest::Render => StageKind::Render,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_only_from_uploaded() {
        assert!(StageKind::Trim.allowed_from(AssetStatus::Uploaded));
        assert!(!StageKind::Trim.allowed_from(AssetStatus::Trimmed));
        assert!(!StageKind::Trim.allowed_from(AssetStatus::Subtitled));
        assert!(!StageKind::Trim.allowed_from(AssetStatus::Rendered));
    }

    #[test]
    fn test_subtitle_from_uploaded_or_trimmed() {
        assert!(StageKind::Subtitle.allowed_from(AssetStatus::Uploaded));
        assert!(StageKind::Subtitle.allowed_from(AssetStatus::Trimmed));
        assert!(!StageKind::Subtitle.allowed_from(AssetStatus::Subtitled));
        assert!(!StageKind::Subtitle.allowed_from(AssetStatus::Rendered));
    }

    #[test]
    fn test_render_from_any_state() {
        for status in [
            AssetStatus::Uploaded,
            AssetStatus::Trimmed,
            AssetStatus::Subtitled,
            AssetStatus::Rendered,
        ] {
            assert!(StageKind::Render.allowed_from(status));
        }
    }

    #[test]
    fn test_request_kind_mapping() {
        let req = StageRequest::Trim {
            start: 0.0,
            end: 5.0,
        };
        assert_eq!(req.kind(), StageKind::Trim);
        assert_eq!(req.kind().resulting_status(), AssetStatus::Trimmed);
    }
}
