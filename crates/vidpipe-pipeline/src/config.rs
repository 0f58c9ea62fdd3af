//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

/// What to do with a stage request while another is in flight for the
/// same asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyPolicy {
    /// Wait behind the in-flight stage, FIFO.
    #[default]
    Queue,
    /// Fail fast with a conflict error.
    Reject,
}

impl BusyPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "queue" => Some(Self::Queue),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory stage outputs and transient tracks are written under
    pub media_root: PathBuf,
    /// Wall-clock bound on one transcoder invocation
    pub transcode_timeout: Duration,
    /// Concurrent-request policy per asset
    pub busy_policy: BusyPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("/tmp/vidpipe"),
            transcode_timeout: Duration::from_secs(3600),
            busy_policy: BusyPolicy::Queue,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            media_root: std::env::var("VIDPIPE_MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/vidpipe")),
            transcode_timeout: Duration::from_secs(
                std::env::var("VIDPIPE_TRANSCODE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            busy_policy: std::env::var("VIDPIPE_BUSY_POLICY")
                .ok()
                .and_then(|s| BusyPolicy::parse(&s))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.busy_policy, BusyPolicy::Queue);
        assert_eq!(config.transcode_timeout, Duration::from_secs(3600));
    }

    #[test]
    fn test_busy_policy_parse() {
        assert_eq!(BusyPolicy::parse("queue"), Some(BusyPolicy::Queue));
        assert_eq!(BusyPolicy::parse("REJECT"), Some(BusyPolicy::Reject));
        assert_eq!(BusyPolicy::parse("other"), None);
    }
}
