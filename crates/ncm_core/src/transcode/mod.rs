//! Lossless transcode to the final container.
//!
//! Maps the first audio stream, encoded with the Apple Lossless codec,
//! plus any attached video (cover) stream copied verbatim, into an M4A
//! container next to the decoded file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::tools::{CommandRunner, ToolPaths, ToolResult};

/// Final output path: the decoded file with its extension replaced by
/// `m4a`.
pub fn output_path_for(decoded: &Path) -> PathBuf {
    decoded.with_extension("m4a")
}

/// Transcode the decoded FLAC into an ALAC-coded M4A.
///
/// A non-zero transcoder exit is an error; the caller treats it as
/// fatal and no output file is recorded.
pub fn transcode_to_alac(
    runner: &CommandRunner,
    tools: &ToolPaths,
    decoded: &Path,
) -> ToolResult<PathBuf> {
    let output = output_path_for(decoded);

    let args: Vec<OsString> = vec![
        OsString::from("-loglevel"),
        OsString::from("quiet"),
        OsString::from("-i"),
        decoded.as_os_str().to_os_string(),
        OsString::from("-map"),
        OsString::from("0:a"),
        OsString::from("-map"),
        OsString::from("0:v?"),
        OsString::from("-c:a"),
        OsString::from("alac"),
        OsString::from("-c:v"),
        OsString::from("copy"),
        output.as_os_str().to_os_string(),
    ];

    runner.run("ffmpeg", &tools.ffmpeg, &args)?.require_success("ffmpeg")?;

    tracing::info!("Transcoded {} -> {}", decoded.display(), output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_substitutes_extension() {
        assert_eq!(
            output_path_for(Path::new("/music/song.flac")),
            PathBuf::from("/music/song.m4a")
        );
    }

    #[test]
    fn output_path_handles_depth_and_special_characters() {
        assert_eq!(
            output_path_for(Path::new("/a/b/夜曲 (demo).flac")),
            PathBuf::from("/a/b/夜曲 (demo).m4a")
        );
    }
}
