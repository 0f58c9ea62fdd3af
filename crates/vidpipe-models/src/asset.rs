//! Asset record and lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a managed asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    /// Generate a new random asset ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Pipeline lifecycle status of an asset.
///
/// Advances monotonically; a stage never moves a record backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Source file received, no transformation applied yet
    #[default]
    Uploaded,
    /// Trimmed to a time range
    Trimmed,
    /// Subtitle track burned in
    Subtitled,
    /// Final output produced, ready for download
    Rendered,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Uploaded => "uploaded",
            AssetStatus::Trimmed => "trimmed",
            AssetStatus::Subtitled => "subtitled",
            AssetStatus::Rendered => "rendered",
        }
    }

    /// Ordinal position along the pipeline, used to assert monotonicity.
    pub fn rank(&self) -> u8 {
        match self {
            AssetStatus::Uploaded => 0,
            AssetStatus::Trimmed => 1,
            AssetStatus::Subtitled => 2,
            AssetStatus::Rendered => 3,
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The managed video asset record.
///
/// `location` always names the output of the most recently completed
/// stage; it is only ever updated together with `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset ID
    pub id: AssetId,

    /// Original display name, immutable after upload
    pub name: String,

    /// Byte length of the uploaded source
    pub size: u64,

    /// Duration in seconds (informational, filled by an external inspector)
    #[serde(default)]
    pub duration: f64,

    /// Current pipeline status
    #[serde(default)]
    pub status: AssetStatus,

    /// Authoritative media file for the current status
    pub location: PathBuf,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Create a freshly uploaded asset record.
    pub fn new(name: impl Into<String>, size: u64, location: impl Into<PathBuf>) -> Self {
        let now = Utc::now();
        Self {
            id: AssetId::new(),
            name: name.into(),
            size,
            duration: 0.0,
            status: AssetStatus::Uploaded,
            location: location.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_generation() {
        let id1 = AssetId::new();
        let id2 = AssetId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_asset_is_uploaded() {
        let asset = Asset::new("clip.mp4", 1024, "/media/clip.mp4");
        assert_eq!(asset.status, AssetStatus::Uploaded);
        assert_eq!(asset.name, "clip.mp4");
        assert_eq!(asset.size, 1024);
    }

    #[test]
    fn test_status_rank_is_monotonic() {
        assert!(AssetStatus::Uploaded.rank() < AssetStatus::Trimmed.rank());
        assert!(AssetStatus::Trimmed.rank() < AssetStatus::Subtitled.rank());
        assert!(AssetStatus::Subtitled.rank() < AssetStatus::Rendered.rank());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&AssetStatus::Subtitled).unwrap();
        assert_eq!(json, "\"subtitled\"");
    }
}
