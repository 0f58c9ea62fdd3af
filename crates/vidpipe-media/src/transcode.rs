//! Transcoder invocation.
//!
//! Each stage maps to one external ffmpeg run with a fixed command
//! template. The invoker reports exactly one terminal outcome per spec:
//! success with the output path, or a failure diagnostic, and the
//! subprocess has always exited by the time either is returned.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// The media operation a stage performs.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscodeOp {
    /// Cut `[start, end)` seconds out of the input.
    Trim { start: f64, end: f64 },
    /// Burn the given subtitle track into the video.
    BurnSubtitles { track: PathBuf },
    /// Re-encode the input into the final deliverable.
    Render,
}

/// One transcoder invocation: input, operation, output.
#[derive(Debug, Clone)]
pub struct TranscodeSpec {
    pub input: PathBuf,
    pub output: PathBuf,
    pub op: TranscodeOp,
}

impl TranscodeSpec {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        op: TranscodeOp,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            op,
        }
    }

    /// Validate parameters without touching the filesystem.
    ///
    /// Trim bounds are checked here so a malformed request never reaches
    /// the subprocess. Input and output must differ: ffmpeg opens the
    /// output with `-y` before reading, so a shared path truncates the
    /// source.
    pub fn validate(&self) -> MediaResult<()> {
        if self.input == self.output {
            return Err(MediaError::invalid_input(format!(
                "input and output are the same file: {}",
                self.input.display()
            )));
        }

        match &self.op {
            TranscodeOp::Trim { start, end } => {
                if *start < 0.0 || start >= end {
                    return Err(MediaError::invalid_input(format!(
                        "trim requires 0 <= start < end, got start={:.3} end={:.3}",
                        start, end
                    )));
                }
                Ok(())
            }
            TranscodeOp::BurnSubtitles { track } => {
                if track.as_os_str().is_empty() {
                    return Err(MediaError::invalid_input("empty subtitle track path"));
                }
                Ok(())
            }
            TranscodeOp::Render => Ok(()),
        }
    }

    /// Build the concrete ffmpeg command for this spec.
    pub fn to_command(&self) -> FfmpegCommand {
        match &self.op {
            TranscodeOp::Trim { start, end } => FfmpegCommand::new(&self.input, &self.output)
                .seek(*start)
                .duration(end - start),
            TranscodeOp::BurnSubtitles { track } => {
                FfmpegCommand::new(&self.input, &self.output)
                    .video_filter(format!("subtitles={}", track.display()))
            }
            TranscodeOp::Render => FfmpegCommand::new(&self.input, &self.output),
        }
    }
}

/// Capability seam over the external transcoding engine.
///
/// `run` resolves once with the terminal outcome. On `Err` the output
/// location must not be promoted; nothing was (completely) written there.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn run(&self, spec: &TranscodeSpec) -> MediaResult<PathBuf>;
}

/// Production transcoder backed by the ffmpeg CLI.
pub struct FfmpegTranscoder {
    runner_timeout_secs: Option<u64>,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self {
            runner_timeout_secs: None,
        }
    }

    /// Bound each invocation to a wall-clock timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.runner_timeout_secs = Some(secs);
        self
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn run(&self, spec: &TranscodeSpec) -> MediaResult<PathBuf> {
        spec.validate()?;

        if !spec.input.exists() {
            return Err(MediaError::FileNotFound(spec.input.clone()));
        }

        ensure_parent_dir(&spec.output).await?;

        debug!(
            "Transcoding {} -> {} ({:?})",
            spec.input.display(),
            spec.output.display(),
            spec.op
        );

        let mut runner = FfmpegRunner::new();
        if let Some(secs) = self.runner_timeout_secs {
            runner = runner.with_timeout(secs);
        }
        runner.run(&spec.to_command()).await?;

        info!("Transcode complete: {}", spec.output.display());
        Ok(spec.output.clone())
    }
}

async fn ensure_parent_dir(path: &Path) -> MediaResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_validation() {
        let spec = TranscodeSpec::new(
            "in.mp4",
            "out.mp4",
            TranscodeOp::Trim {
                start: 5.0,
                end: 2.0,
            },
        );
        assert!(matches!(
            spec.validate(),
            Err(MediaError::InvalidInput(_))
        ));

        let spec = TranscodeSpec::new(
            "in.mp4",
            "out.mp4",
            TranscodeOp::Trim {
                start: -1.0,
                end: 2.0,
            },
        );
        assert!(spec.validate().is_err());

        let spec = TranscodeSpec::new(
            "in.mp4",
            "out.mp4",
            TranscodeOp::Trim {
                start: 0.0,
                end: 2.0,
            },
        );
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let spec = TranscodeSpec::new("same.mp4", "same.mp4", TranscodeOp::Render);
        assert!(matches!(
            spec.validate(),
            Err(MediaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_trim_command_uses_seek_and_duration() {
        let spec = TranscodeSpec::new(
            "in.mp4",
            "out.mp4",
            TranscodeOp::Trim {
                start: 2.0,
                end: 7.5,
            },
        );
        let args = spec.to_command().build_args();

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "2.000");
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "5.500");
    }

    #[test]
    fn test_burn_subtitles_command_uses_filter() {
        let spec = TranscodeSpec::new(
            "in.mp4",
            "out.mp4",
            TranscodeOp::BurnSubtitles {
                track: PathBuf::from("/tmp/track.srt"),
            },
        );
        let args = spec.to_command().build_args();

        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[vf + 1], "subtitles=/tmp/track.srt");
    }

    #[test]
    fn test_render_command_is_plain_reencode() {
        let spec = TranscodeSpec::new("in.mp4", "out.mp4", TranscodeOp::Render);
        let args = spec.to_command().build_args();

        assert!(!args.contains(&"-ss".to_string()));
        assert!(!args.contains(&"-vf".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }
}
