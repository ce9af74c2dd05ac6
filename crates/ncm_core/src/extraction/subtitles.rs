//! Embedded subtitle extraction.
//!
//! Mirrors cover extraction for subtitle-kind streams: the first
//! subtitle stream is copied verbatim, no caption-format transcoding.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::models::StreamKind;
use crate::probe;
use crate::tools::{CommandRunner, ToolPaths, ToolResult};

/// Subtitle sidecar path: `<decoded-stem>_subtitles.srt` under the
/// destination directory.
pub fn subtitle_path_for(decoded: &Path, dest_dir: &Path) -> PathBuf {
    let stem = decoded
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "subtitles".to_string());
    dest_dir.join(format!("{}_subtitles.srt", stem))
}

/// Extract the first embedded subtitle stream, if any.
///
/// `Ok(None)` when the decoded file has no subtitle-kind stream.
pub fn extract_subtitles(
    runner: &CommandRunner,
    tools: &ToolPaths,
    decoded: &Path,
    dest_dir: &Path,
) -> ToolResult<Option<PathBuf>> {
    let streams = probe::probe_streams(runner, &tools.ffprobe, decoded)?;
    if probe::first_stream_of(&streams, StreamKind::Subtitle).is_none() {
        tracing::debug!("No subtitle stream in {}", decoded.display());
        return Ok(None);
    }

    let subtitles = subtitle_path_for(decoded, dest_dir);

    let args: Vec<OsString> = vec![
        OsString::from("-loglevel"),
        OsString::from("quiet"),
        OsString::from("-i"),
        decoded.as_os_str().to_os_string(),
        OsString::from("-map"),
        OsString::from("0:s:0"),
        OsString::from("-c:s"),
        OsString::from("copy"),
        subtitles.as_os_str().to_os_string(),
    ];

    runner.run("ffmpeg", &tools.ffmpeg, &args)?.require_success("ffmpeg")?;

    tracing::info!("Extracted subtitles to {}", subtitles.display());
    Ok(Some(subtitles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtitle_path_uses_stem_and_suffix() {
        assert_eq!(
            subtitle_path_for(Path::new("/music/song.flac"), Path::new("/music")),
            PathBuf::from("/music/song_subtitles.srt")
        );
    }
}
