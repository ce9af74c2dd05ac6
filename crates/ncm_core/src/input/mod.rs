//! Source-file resolution and validation.
//!
//! The desktop collaborators that actually talk to the file manager or
//! the clipboard live in the application crate; they implement
//! `InputProvider` and hand raw text to `resolve_source`, which applies
//! the strategy-specific normalization and the common validation:
//! required extension, existing regular file.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::InputSettings;
use crate::models::InputStrategy;

/// Extension a source file must carry.
pub const SOURCE_EXTENSION: &str = "ncm";

/// Errors from input resolution. All of them are fatal: the pipeline
/// never starts on a resolution failure.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file manager reported an empty selection.
    #[error("Nothing is selected in the file manager")]
    NoSelection,

    /// The clipboard held no usable text.
    #[error("The clipboard does not contain usable text")]
    EmptyClipboard,

    /// The provider itself failed (query error, clipboard unavailable).
    #[error("Failed to query {provider}: {message}")]
    ProviderFailed { provider: String, message: String },

    /// Clipboard strategy selected but no base directory configured.
    #[error("Clipboard base directory is not configured; set [input] clipboard_base_dir")]
    BaseDirNotConfigured,

    /// The resolved path does not end in the required extension.
    #[error("Not an .{SOURCE_EXTENSION} file: {}", .0.display())]
    WrongExtension(PathBuf),

    /// The resolved path does not exist on disk.
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The resolved path exists but is not a regular file.
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// A desktop collaborator that can produce the raw input text.
pub trait InputProvider {
    /// Human-readable provider name (for diagnostics).
    fn name(&self) -> &str;

    /// Fetch the raw input text, or `None` when nothing is available
    /// (empty selection, empty clipboard).
    fn fetch(&self) -> Result<Option<String>, InputError>;
}

/// Resolve and validate the source file for this run.
pub fn resolve_source(
    provider: &dyn InputProvider,
    settings: &InputSettings,
) -> Result<PathBuf, InputError> {
    let raw = provider.fetch()?.ok_or(match settings.strategy {
        InputStrategy::FinderSelection => InputError::NoSelection,
        InputStrategy::Clipboard => InputError::EmptyClipboard,
    })?;

    let candidate = match settings.strategy {
        InputStrategy::FinderSelection => PathBuf::from(raw.trim()),
        InputStrategy::Clipboard => clipboard_candidate(&raw, settings)?,
    };

    validate_source(&candidate)?;
    Ok(candidate)
}

/// Normalize clipboard text into a candidate path: trim, append the
/// required extension when missing, join to the configured base dir.
fn clipboard_candidate(raw: &str, settings: &InputSettings) -> Result<PathBuf, InputError> {
    if settings.clipboard_base_dir.trim().is_empty() {
        return Err(InputError::BaseDirNotConfigured);
    }

    let mut name = raw.trim().to_string();
    if name.is_empty() {
        return Err(InputError::EmptyClipboard);
    }

    let suffix = format!(".{SOURCE_EXTENSION}");
    if !name.to_ascii_lowercase().ends_with(&suffix) {
        name.push_str(&suffix);
    }

    Ok(Path::new(settings.clipboard_base_dir.trim()).join(name))
}

/// Validate a candidate source path: extension first, then existence,
/// then regular-file-ness.
pub fn validate_source(path: &Path) -> Result<(), InputError> {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
        .unwrap_or(false);

    if !has_extension {
        return Err(InputError::WrongExtension(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(InputError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}
