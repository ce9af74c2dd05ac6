//! Embedded cover art extraction.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::models::StreamKind;
use crate::probe;
use crate::tools::{CommandRunner, ToolPaths, ToolResult};

/// Cover image path: `<decoded-stem>_cover.jpg` under the destination
/// directory.
pub fn cover_path_for(decoded: &Path, dest_dir: &Path) -> PathBuf {
    let stem = decoded
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());
    dest_dir.join(format!("{}_cover.jpg", stem))
}

/// Extract the embedded cover art, if any.
///
/// Probes the decoded file first; the absence of a video-kind stream is
/// a normal outcome and yields `Ok(None)` without invoking the
/// transcoder. Any tool failure is returned as an error for the caller
/// to downgrade.
pub fn extract_cover(
    runner: &CommandRunner,
    tools: &ToolPaths,
    decoded: &Path,
    dest_dir: &Path,
) -> ToolResult<Option<PathBuf>> {
    let streams = probe::probe_streams(runner, &tools.ffprobe, decoded)?;
    if probe::first_stream_of(&streams, StreamKind::Video).is_none() {
        tracing::debug!("No video stream in {}", decoded.display());
        return Ok(None);
    }

    let cover = cover_path_for(decoded, dest_dir);

    let args: Vec<OsString> = vec![
        OsString::from("-loglevel"),
        OsString::from("quiet"),
        OsString::from("-i"),
        decoded.as_os_str().to_os_string(),
        OsString::from("-map"),
        OsString::from("0:v:0"),
        OsString::from("-c:v"),
        OsString::from("mjpeg"),
        OsString::from("-f"),
        OsString::from("image2"),
        cover.as_os_str().to_os_string(),
    ];

    runner.run("ffmpeg", &tools.ffmpeg, &args)?.require_success("ffmpeg")?;

    tracing::info!("Extracted cover to {}", cover.display());
    Ok(Some(cover))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_path_uses_stem_and_suffix() {
        assert_eq!(
            cover_path_for(Path::new("/music/song.flac"), Path::new("/music")),
            PathBuf::from("/music/song_cover.jpg")
        );
    }

    #[test]
    fn cover_path_targets_destination_dir() {
        assert_eq!(
            cover_path_for(Path::new("/music/album/song.flac"), Path::new("/tmp/out")),
            PathBuf::from("/tmp/out/song_cover.jpg")
        );
    }

    #[test]
    fn cover_path_keeps_inner_dots() {
        assert_eq!(
            cover_path_for(Path::new("/m/track.v2.flac"), Path::new("/m")),
            PathBuf::from("/m/track.v2_cover.jpg")
        );
    }
}
