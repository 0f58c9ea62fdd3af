//! Deterministic, collision-free naming for stage outputs.

use std::path::PathBuf;

use vidpipe_models::AssetId;

use crate::error::{MediaError, MediaResult};

/// Tag identifying which stage an output file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageTag {
    Trimmed,
    Subtitled,
    Final,
    SubtitleTrack,
}

impl StageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageTag::Trimmed => "trimmed",
            StageTag::Subtitled => "subtitled",
            StageTag::Final => "final",
            StageTag::SubtitleTrack => "subtitles",
        }
    }
}

/// Derives storage locations for stage outputs under a media root.
///
/// Paths are prefixed with the asset id, so two assets sharing a display
/// name can never land on the same location, and repeated derivations
/// for the same (id, tag) pair are identical. Wall-clock time plays no
/// part; concurrent use of the same path is prevented by the per-asset
/// lock upstream, not by naming.
#[derive(Debug, Clone)]
pub struct FileNamer {
    media_root: PathBuf,
}

impl FileNamer {
    /// Create a namer rooted at the given directory.
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    /// The media root this namer derives paths under.
    pub fn media_root(&self) -> &PathBuf {
        &self.media_root
    }

    /// Location for a stage output of the given asset.
    ///
    /// Stage outputs keep the original display name so the container
    /// format stays recognizable; the transient subtitle track is always
    /// an `.srt` file and needs no display name.
    pub fn stage_output(
        &self,
        id: &AssetId,
        tag: StageTag,
        name: &str,
    ) -> MediaResult<PathBuf> {
        if id.as_str().is_empty() {
            return Err(MediaError::invalid_input("empty asset id"));
        }

        let file_name = match tag {
            StageTag::SubtitleTrack => format!("{}_{}.srt", id, tag.as_str()),
            _ => {
                if name.is_empty() {
                    return Err(MediaError::invalid_input("empty asset name"));
                }
                format!("{}_{}_{}", id, tag.as_str(), name)
            }
        };

        Ok(self.media_root.join(file_name))
    }
}
