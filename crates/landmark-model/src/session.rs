//! Landmark session files.
//!
//! A session is JSONL: one [`LandmarkFrame`] per line, in capture order.
//! Blank lines and `#` comment lines are skipped. The first comment line may
//! carry a JSON [`SessionHeader`]:
//!
//! ```text
//! # {"schema_version":"1.0","source":"mediapipe","fps":30,"space":"camera"}
//! {"t":0,"pose":{"RIGHT_KNEE":{"x":0.6,"y":0.8}}}
//! ```
//!
//! The lossy parsers treat a frame line that does not parse as a frame in
//! which nothing was detected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame::{CoordinateSpace, LandmarkFrame};

/// Current schema version written into session headers.
pub const SCHEMA_VERSION: &str = "1.0";

/// Session-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Name of the detector that produced the landmarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Nominal capture rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,

    /// Coordinate space of frames that do not declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<CoordinateSpace>,

    /// Wall-clock time the session was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Default for SessionHeader {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            source: None,
            fps: None,
            space: None,
            recorded_at: None,
        }
    }
}

/// A parsed landmark session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkSession {
    pub header: Option<SessionHeader>,
    pub frames: Vec<LandmarkFrame>,
    /// One-based line numbers that were replaced by empty frames.
    pub malformed_lines: Vec<usize>,
}

/// A frame line that failed to parse.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct SessionParseError {
    /// One-based line number in the input.
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse a single line of a session stream.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_frame_line(line: &str) -> Result<Option<LandmarkFrame>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Parse a single line of a live stream, keeping malformed lines.
///
/// A line that fails to parse is logged and becomes an empty frame, so it
/// still occupies its slot in capture order. Returns `None` for blank and
/// comment lines.
pub fn parse_frame_line_lossy(line: &str, line_no: usize) -> Option<LandmarkFrame> {
    match parse_frame_line(line) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(line = line_no, error = %e, "Malformed frame, treating as empty");
            Some(LandmarkFrame::empty())
        }
    }
}

/// Parse frames from JSONL content (one JSON object per line).
///
/// Fails on the first malformed line.
pub fn parse_frames(jsonl: &str) -> Result<Vec<LandmarkFrame>, SessionParseError> {
    let mut frames = Vec::new();
    for (idx, line) in jsonl.lines().enumerate() {
        match parse_frame_line(line) {
            Ok(Some(frame)) => frames.push(frame),
            Ok(None) => {}
            Err(source) => {
                return Err(SessionParseError {
                    line: idx + 1,
                    source,
                })
            }
        }
    }
    Ok(frames)
}

fn parse_header(content: &str) -> Option<SessionHeader> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.strip_prefix('#'))
        .and_then(|rest| serde_json::from_str::<SessionHeader>(rest.trim()).ok())
}

/// Parse a full session, including the optional header comment.
///
/// Strict: any malformed frame line is an error.
pub fn parse_session(content: &str) -> Result<LandmarkSession, SessionParseError> {
    Ok(LandmarkSession {
        header: parse_header(content),
        frames: parse_frames(content)?,
        malformed_lines: Vec::new(),
    })
}

/// Parse a full session, replacing malformed frame lines with empty frames.
///
/// The replaced line numbers are recorded in
/// [`LandmarkSession::malformed_lines`].
pub fn parse_session_lossy(content: &str) -> LandmarkSession {
    let mut frames = Vec::new();
    let mut malformed_lines = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        match parse_frame_line(line) {
            Ok(Some(frame)) => frames.push(frame),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "Malformed frame, treating as empty");
                malformed_lines.push(idx + 1);
                frames.push(LandmarkFrame::empty());
            }
        }
    }

    LandmarkSession {
        header: parse_header(content),
        frames,
        malformed_lines,
    }
}

/// Serialize frames to JSONL, optionally preceded by a header comment.
pub fn serialize_session(
    header: Option<&SessionHeader>,
    frames: &[LandmarkFrame],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = header {
        output.push_str("# ");
        output.push_str(&serde_json::to_string(header)?);
        output.push('\n');
    }
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
