//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field carries a serde default so a partial config file loads
//! cleanly.

use serde::{Deserialize, Serialize};

use crate::models::InputStrategy;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Source-file resolution settings.
    #[serde(default)]
    pub input: InputSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Optional artifact extraction toggles.
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How the source file is obtained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    /// Resolution strategy, fixed per deployment.
    #[serde(default)]
    pub strategy: InputStrategy,

    /// Base directory a clipboard-held filename is joined to.
    /// Required when `strategy = "clipboard"`.
    #[serde(default)]
    pub clipboard_base_dir: String,
}

/// Locations of the external programs the pipeline shells out to.
///
/// An empty value means "discover on PATH".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    /// NCM decoder executable.
    #[serde(default)]
    pub ncmdump: String,

    /// Media transcoder executable.
    #[serde(default)]
    pub ffmpeg: String,

    /// Media prober executable.
    #[serde(default)]
    pub ffprobe: String,
}

/// Which optional sidecar artifacts to extract from the decoded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Extract embedded cover art to a JPEG sidecar.
    #[serde(default = "default_true")]
    pub cover: bool,

    /// Extract the first embedded subtitle stream to an SRT sidecar.
    #[serde(default)]
    pub subtitles: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            cover: true,
            subtitles: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Folder for per-run log files. Empty means "platform default".
    #[serde(default)]
    pub logs_folder: String,

    /// Use compact log format (external tool output only kept in the
    /// error tail, not echoed line by line).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of external-tool output lines replayed after a failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Show timestamps in log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            logs_folder: String::new(),
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}
