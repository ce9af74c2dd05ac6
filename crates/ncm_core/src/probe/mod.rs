//! Stream probing using ffprobe.
//!
//! The cover and subtitle extractors only need to know whether the
//! decoded file carries a stream of a given kind, so the probe surface
//! is deliberately small: a stream list with index, kind, and codec.

use std::ffi::OsString;
use std::path::Path;

use serde_json::Value;

use crate::models::StreamKind;
use crate::tools::{CommandRunner, ToolError, ToolResult};

/// One stream as reported by the prober.
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Stream index (prober ordering).
    pub index: usize,
    /// Stream kind, if recognized.
    pub kind: Option<StreamKind>,
    /// Codec name (e.g., "flac", "mjpeg").
    pub codec_name: String,
}

/// Probe a media file and return its stream list.
pub fn probe_streams(
    runner: &CommandRunner,
    ffprobe: &Path,
    path: &Path,
) -> ToolResult<Vec<StreamInfo>> {
    tracing::debug!("Probing streams: {}", path.display());

    let args: Vec<OsString> = vec![
        OsString::from("-v"),
        OsString::from("error"),
        OsString::from("-show_streams"),
        OsString::from("-of"),
        OsString::from("json"),
        path.as_os_str().to_os_string(),
    ];

    let output = runner.run("ffprobe", ffprobe, &args)?.require_success("ffprobe")?;

    let json: Value = serde_json::from_str(&output.stdout).map_err(|e| ToolError::ParseFailed {
        tool: "ffprobe".to_string(),
        message: e.to_string(),
    })?;

    Ok(parse_streams(&json))
}

/// Parse the JSON output from `ffprobe -show_streams -of json`.
fn parse_streams(json: &Value) -> Vec<StreamInfo> {
    let Some(streams) = json.get("streams").and_then(|s| s.as_array()) else {
        return Vec::new();
    };

    streams
        .iter()
        .map(|stream| StreamInfo {
            index: stream.get("index").and_then(|i| i.as_u64()).unwrap_or(0) as usize,
            kind: stream
                .get("codec_type")
                .and_then(|t| t.as_str())
                .and_then(StreamKind::from_codec_type),
            codec_name: stream
                .get("codec_name")
                .and_then(|c| c.as_str())
                .unwrap_or("")
                .to_string(),
        })
        .collect()
}

/// First stream of the given kind, if any.
pub fn first_stream_of(streams: &[StreamInfo], kind: StreamKind) -> Option<&StreamInfo> {
    streams.iter().find(|s| s.kind == Some(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(json: &str) -> Vec<StreamInfo> {
        parse_streams(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn parses_audio_and_cover_streams() {
        let streams = fixture(
            r#"{"streams": [
                {"index": 0, "codec_type": "audio", "codec_name": "flac"},
                {"index": 1, "codec_type": "video", "codec_name": "mjpeg"}
            ]}"#,
        );

        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].kind, Some(StreamKind::Audio));
        assert_eq!(streams[0].codec_name, "flac");
        assert_eq!(streams[1].kind, Some(StreamKind::Video));

        let cover = first_stream_of(&streams, StreamKind::Video).unwrap();
        assert_eq!(cover.index, 1);
    }

    #[test]
    fn no_video_stream_yields_none() {
        let streams = fixture(
            r#"{"streams": [
                {"index": 0, "codec_type": "audio", "codec_name": "flac"}
            ]}"#,
        );

        assert!(first_stream_of(&streams, StreamKind::Video).is_none());
        assert!(first_stream_of(&streams, StreamKind::Subtitle).is_none());
    }

    #[test]
    fn unknown_codec_type_is_kept_with_no_kind() {
        let streams = fixture(
            r#"{"streams": [
                {"index": 0, "codec_type": "attachment", "codec_name": "ttf"}
            ]}"#,
        );

        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].kind, None);
    }

    #[test]
    fn missing_streams_key_is_empty() {
        let streams = fixture(r#"{"format": {}}"#);
        assert!(streams.is_empty());
    }
}
