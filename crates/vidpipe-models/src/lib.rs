//! Shared data models for the VidPipe backend.
//!
//! This crate provides Serde-serializable types for:
//! - Assets and their lifecycle status
//! - Stage requests (trim, subtitle, render)
//! - Timestamp parsing and SRT timecode formatting

pub mod asset;
pub mod stage;
pub mod timestamp;

// Re-export common types
pub use asset::{Asset, AssetId, AssetStatus};
pub use stage::{StageKind, StageRequest};
pub use timestamp::{format_srt_timecode, parse_timestamp, TimestampError};
