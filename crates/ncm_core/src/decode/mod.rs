//! NCM decoder invocation.
//!
//! The external decoder writes its lossless output to a conventionally
//! named sibling file; the decoded path is computed here by extension
//! substitution, never parsed from decoder output. After a zero exit the
//! derived file is verified to exist and be non-empty, so a decoder that
//! wrote elsewhere is caught immediately.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::tools::{CommandRunner, ToolError, ToolResult};

/// The decoder's conventional output path: the source with its extension
/// replaced by `flac`.
pub fn decoded_path_for(source: &Path) -> PathBuf {
    source.with_extension("flac")
}

/// Decode an NCM file to its sibling FLAC.
///
/// Returns the decoded path on success. A non-zero decoder exit or a
/// missing/empty output file is an error; the caller treats it as fatal.
pub fn decode_to_flac(
    runner: &CommandRunner,
    ncmdump: &Path,
    source: &Path,
) -> ToolResult<PathBuf> {
    let decoded = decoded_path_for(source);

    let args: Vec<OsString> = vec![source.as_os_str().to_os_string()];
    runner.run("ncmdump", ncmdump, &args)?.require_success("ncmdump")?;

    verify_decoded(&decoded)?;

    tracing::info!("Decoded {} -> {}", source.display(), decoded.display());
    Ok(decoded)
}

/// Verify the decoder produced the conventional sibling file.
fn verify_decoded(path: &Path) -> ToolResult<()> {
    let metadata =
        std::fs::metadata(path).map_err(|_| ToolError::OutputMissing(path.to_path_buf()))?;
    if metadata.len() == 0 {
        return Err(ToolError::OutputMissing(path.to_path_buf()));
    }
    Ok(())
}
