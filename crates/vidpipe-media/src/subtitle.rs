//! Subtitle track generation.
//!
//! Produces SRT tracks with one cue per stage request and owns the
//! transient track file for the duration of a single burn invocation.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use vidpipe_models::timestamp::format_srt_timecode;

use crate::error::{MediaError, MediaResult};

/// A single subtitle cue.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SubtitleCue {
    /// Create a cue, rejecting inverted or negative ranges.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> MediaResult<Self> {
        if start < 0.0 || start >= end {
            return Err(MediaError::invalid_input(format!(
                "invalid cue range: start {:.3} must be >= 0 and < end {:.3}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
        })
    }
}

/// Render cues into SRT: numbered sequentially from 1, each with a
/// timecode range line and the cue text.
pub fn format_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_srt_timecode(cue.start),
            format_srt_timecode(cue.end),
            cue.text
        ));
    }
    out
}

/// A subtitle track file scoped to one transcoder invocation.
///
/// The file is written on creation and removed when the track is dropped,
/// so the cleanup holds on success, failure, and cancellation alike.
/// Callers that can await should prefer [`TransientTrack::remove`].
#[derive(Debug)]
pub struct TransientTrack {
    path: Option<PathBuf>,
}

impl TransientTrack {
    /// Write the cues to `path` and take ownership of the file.
    pub async fn write(path: impl Into<PathBuf>, cues: &[SubtitleCue]) -> MediaResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&path, format_srt(cues)).await?;
        Ok(Self { path: Some(path) })
    }

    /// Path of the track file.
    pub fn path(&self) -> &Path {
        self.path.as_deref().expect("track already removed")
    }

    /// Remove the track file.
    pub async fn remove(mut self) -> MediaResult<()> {
        if let Some(path) = self.path.take() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}

impl Drop for TransientTrack {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove transient subtitle track {}: {}", path.display(), e);
            }
        }
    }
}
