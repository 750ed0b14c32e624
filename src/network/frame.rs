use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One captured network request of a recorded session.
///
/// Timestamps are absolute milliseconds; [`NetworkFrame::offset_ms`] converts
/// them to the session-relative time used by the playback clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFrame {
    /// Operation name, e.g. `resource.fetch` or `resource.img`
    pub op: String,
    /// Request URL
    pub description: String,
    pub start_timestamp: f64,
    pub end_timestamp: f64,
    #[serde(default)]
    pub data: NetworkData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkData {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub request_body_size: Option<u64>,
    #[serde(default)]
    pub response_body_size: Option<u64>,
    #[serde(default)]
    pub request: Option<NetworkBody>,
    #[serde(default)]
    pub response: Option<NetworkBody>,
}

/// Captured request or response payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkBody {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl NetworkFrame {
    pub fn method(&self) -> &str {
        self.data.method.as_deref().unwrap_or("GET")
    }

    /// Status code as displayed, `-` when it was not captured.
    pub fn status(&self) -> String {
        self.data
            .status_code
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn is_error(&self) -> bool {
        self.data.status_code.is_some_and(|s| s >= 400)
    }

    /// Op without its `resource.` prefix.
    pub fn resource_type(&self) -> &str {
        self.op.strip_prefix("resource.").unwrap_or(&self.op)
    }

    pub fn duration_ms(&self) -> f64 {
        (self.end_timestamp - self.start_timestamp).max(0.0)
    }

    pub fn offset_ms(&self, session_start_ms: f64) -> f64 {
        (self.start_timestamp - session_start_ms).max(0.0)
    }

    pub fn response_size(&self) -> Option<u64> {
        self.data
            .response_body_size
            .or_else(|| self.data.response.as_ref().and_then(|r| r.size))
    }

    pub fn request_size(&self) -> Option<u64> {
        self.data
            .request_body_size
            .or_else(|| self.data.request.as_ref().and_then(|r| r.size))
    }

    /// Path portion of the URL, falling back to the full description.
    pub fn path(&self) -> &str {
        let without_scheme = self
            .description
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.description);
        match without_scheme.find('/') {
            Some(idx) if self.description.contains("://") => &without_scheme[idx..],
            _ => &self.description,
        }
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn format_duration(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        format!("{}ms", ms.round() as u64)
    }
}

/// `mm:ss.mmm` for a session-relative offset.
pub fn format_offset(ms: f64) -> String {
    let total = ms.max(0.0).round() as u64;
    let minutes = total / 60_000;
    let seconds = (total % 60_000) / 1000;
    let millis = total % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Deterministic sample recording used by `--mock`.
pub fn mock_frames(session_start_ms: f64, count: usize) -> Vec<NetworkFrame> {
    const METHODS: [&str; 4] = ["GET", "GET", "POST", "PUT"];
    const OPS: [&str; 5] = [
        "resource.fetch",
        "resource.xhr",
        "resource.script",
        "resource.img",
        "resource.css",
    ];
    const STATUSES: [u16; 6] = [200, 200, 200, 201, 404, 500];
    const PATHS: [&str; 6] = [
        "/api/0/projects/",
        "/api/0/organizations/acme/issues/",
        "/static/app.js",
        "/static/logo.png",
        "/api/0/replays/events/",
        "/static/theme.css",
    ];

    (0..count)
        .map(|i| {
            let start = session_start_ms + (i as f64) * 173.0 + ((i * 37) % 97) as f64;
            let duration = 20.0 + ((i * 53) % 900) as f64;
            let method = METHODS[i % METHODS.len()];
            let status = STATUSES[(i * 7) % STATUSES.len()];
            let has_body = method != "GET";
            NetworkFrame {
                op: OPS[i % OPS.len()].to_string(),
                description: format!("https://acme.example.com{}{}", PATHS[i % PATHS.len()], i),
                start_timestamp: start,
                end_timestamp: start + duration,
                data: NetworkData {
                    method: Some(method.to_string()),
                    status_code: Some(status),
                    request_body_size: has_body.then_some(64 + (i as u64 % 512)),
                    response_body_size: Some(256 + (i as u64 * 131) % 40_000),
                    request: has_body.then(|| NetworkBody {
                        size: Some(64 + (i as u64 % 512)),
                        headers: BTreeMap::from([(
                            "content-type".to_string(),
                            "application/json".to_string(),
                        )]),
                        body: Some(serde_json::json!({ "id": i, "name": format!("item-{i}") })),
                    }),
                    response: Some(NetworkBody {
                        size: Some(256 + (i as u64 * 131) % 40_000),
                        headers: BTreeMap::from([(
                            "content-type".to_string(),
                            "application/json".to_string(),
                        )]),
                        body: Some(serde_json::json!({ "ok": status < 400 })),
                    }),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_frame() {
        let frame: NetworkFrame = serde_json::from_str(
            r#"{
                "op": "resource.fetch",
                "description": "https://example.com/api/items?page=2",
                "startTimestamp": 1000.0,
                "endTimestamp": 1250.5
            }"#,
        )
        .unwrap();

        assert_eq!(frame.method(), "GET");
        assert_eq!(frame.status(), "-");
        assert_eq!(frame.resource_type(), "fetch");
        assert_eq!(frame.duration_ms(), 250.5);
        assert_eq!(frame.offset_ms(400.0), 600.0);
        assert_eq!(frame.path(), "/api/items?page=2");
    }

    #[test]
    fn test_deserialize_full_frame() {
        let frame: NetworkFrame = serde_json::from_str(
            r#"{
                "op": "resource.xhr",
                "description": "/relative/path",
                "startTimestamp": 10,
                "endTimestamp": 5,
                "data": {
                    "method": "POST",
                    "statusCode": 502,
                    "responseBodySize": 2048,
                    "request": {"size": 12, "headers": {"accept": "*/*"}, "body": {"a": 1}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(frame.method(), "POST");
        assert!(frame.is_error());
        assert_eq!(frame.duration_ms(), 0.0);
        assert_eq!(frame.response_size(), Some(2048));
        assert_eq!(frame.request_size(), Some(12));
        assert_eq!(frame.path(), "/relative/path");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_duration(12.4), "12ms");
        assert_eq!(format_duration(1500.0), "1.50s");
        assert_eq!(format_offset(61_234.0), "01:01.234");
    }

    #[test]
    fn test_mock_frames_are_ordered() {
        let frames = mock_frames(0.0, 50);
        assert_eq!(frames.len(), 50);
        assert!(frames.windows(2).all(|w| w[0].start_timestamp <= w[1].start_timestamp));
    }
}
