//! FFmpeg CLI wrapper for the VidPipe transformation stages.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building and a wait-for-exit runner
//! - The `Transcoder` capability seam plus its ffmpeg-backed impl
//! - Deterministic stage-output naming
//! - SRT subtitle track generation with guaranteed cleanup

pub mod command;
pub mod error;
pub mod naming;
pub mod subtitle;
pub mod transcode;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use naming::{FileNamer, StageTag};
pub use subtitle::{format_srt, SubtitleCue, TransientTrack};
pub use transcode::{FfmpegTranscoder, TranscodeOp, TranscodeSpec, Transcoder};
