//! Timestamp parsing and SRT timecode formatting.
//!
//! Stage parameters arrive as fractional seconds; the subtitle track
//! format wants `HH:MM:SS,mmm` timecodes.

use thiserror::Error;

/// Maximum reasonable video duration (24 hours in seconds).
pub const MAX_DURATION_SECS: f64 = 86400.0;

/// Errors from timestamp parsing.
#[derive(Debug, Error, PartialEq)]
pub enum TimestampError {
    #[error("empty timestamp")]
    Empty,

    #[error("negative timestamp")]
    Negative,

    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("invalid timestamp format: {0}")]
    InvalidFormat(String),

    #[error("timestamp exceeds maximum duration: {0} seconds")]
    TooLong(f64),
}

/// Parse a timestamp string to total seconds.
///
/// Supports `HH:MM:SS`, `MM:SS`, and bare `SS`, each with optional
/// fractional seconds.
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(TimestampError::InvalidFormat(ts.to_string()));
    }

    // Rightmost part is seconds, then minutes, then hours.
    let labels = ["seconds", "minutes", "hours"];
    let mut total = 0.0;
    for (i, part) in parts.iter().rev().enumerate() {
        let value: f64 = part
            .parse()
            .map_err(|_| TimestampError::InvalidValue(labels[i], part.to_string()))?;
        if value < 0.0 {
            return Err(TimestampError::Negative);
        }
        total += value * 60f64.powi(i as i32);
    }

    if total > MAX_DURATION_SECS {
        return Err(TimestampError::TooLong(total));
    }

    Ok(total)
}

/// Format seconds as an SRT cue timecode: `HH:MM:SS,mmm`.
pub fn format_srt_timecode(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let millis = (total_secs * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let mins = (millis % 3_600_000) / 60_000;
    let secs = (millis % 60_000) / 1000;
    let ms = millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}
