//! Loading recorded network frames from a file, an HTTP endpoint or the
//! built-in sample.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::network::{NetworkFrame, mock_frames};

const MOCK_SESSION_START_MS: f64 = 1_700_000_000_000.0;
const MOCK_FRAME_COUNT: usize = 500;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse recording: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the recording comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    Mock,
    File(PathBuf),
    Url(String),
}

/// A loaded session recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub replay_id: Option<String>,
    pub session_start_ms: f64,
    pub duration_ms: f64,
    pub frames: Vec<NetworkFrame>,
}

/// Accepted payloads: a bare array of frames, or a recording object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordingPayload {
    Frames(Vec<NetworkFrame>),
    Recording(RecordingObject),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordingObject {
    #[serde(default)]
    replay_id: Option<String>,
    #[serde(default)]
    started_at: Option<f64>,
    #[serde(default)]
    duration_ms: Option<f64>,
    #[serde(default)]
    frames: Vec<NetworkFrame>,
}

impl Recording {
    /// Build a recording, deriving the session start from the earliest frame
    /// and the duration from the latest end when they are not given.
    pub fn new(
        replay_id: Option<String>,
        frames: Vec<NetworkFrame>,
        started_at: Option<f64>,
        duration_ms: Option<f64>,
    ) -> Self {
        let session_start_ms = started_at.unwrap_or_else(|| {
            frames
                .iter()
                .map(|f| f.start_timestamp)
                .min_by(f64::total_cmp)
                .unwrap_or(0.0)
        });
        let duration_ms = duration_ms.unwrap_or_else(|| {
            frames
                .iter()
                .map(|f| f.end_timestamp - session_start_ms)
                .max_by(f64::total_cmp)
                .unwrap_or(0.0)
                .max(0.0)
        });
        Self {
            replay_id,
            session_start_ms,
            duration_ms,
            frames,
        }
    }

    pub fn parse(json: &str) -> Result<Self, SourceError> {
        let recording = match serde_json::from_str(json)? {
            RecordingPayload::Frames(frames) => Self::new(None, frames, None, None),
            RecordingPayload::Recording(obj) => {
                Self::new(obj.replay_id, obj.frames, obj.started_at, obj.duration_ms)
            }
        };
        Ok(recording)
    }

    pub fn mock() -> Self {
        Self::new(
            Some("mock".to_string()),
            mock_frames(MOCK_SESSION_START_MS, MOCK_FRAME_COUNT),
            Some(MOCK_SESSION_START_MS),
            None,
        )
    }
}

impl FrameSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Mock => "sample recording".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }

    pub async fn load(&self) -> Result<Recording, SourceError> {
        tracing::info!(source = %self.describe(), "loading recording");
        match self {
            Self::Mock => Ok(Recording::mock()),
            Self::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })?;
                Recording::parse(&text)
            }
            Self::Url(url) => {
                let response = reqwest::Client::new()
                    .get(url)
                    .header("accept", "application/json")
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(SourceError::Status {
                        status: status.as_u16(),
                        message: body,
                    });
                }

                let text = response.text().await?;
                Recording::parse(&text)
            }
        }
    }
}
