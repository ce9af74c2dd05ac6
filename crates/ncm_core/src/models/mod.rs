//! Core enums used throughout the pipeline.

use serde::{Deserialize, Serialize};

/// Kind of media stream reported by the prober.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
}

impl StreamKind {
    /// Parse the `codec_type` value ffprobe reports for a stream.
    pub fn from_codec_type(value: &str) -> Option<Self> {
        match value {
            "video" => Some(StreamKind::Video),
            "audio" => Some(StreamKind::Audio),
            "subtitle" => Some(StreamKind::Subtitle),
            _ => None,
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
            StreamKind::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// How a run obtains its source file.
///
/// Fixed per deployment through the configuration file, not switchable
/// at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputStrategy {
    /// Query the file manager for its current single-item selection.
    #[default]
    #[serde(rename = "finder-selection")]
    FinderSelection,
    /// Read a filename from the system clipboard and join it to the
    /// configured base directory.
    #[serde(rename = "clipboard")]
    Clipboard,
}

impl std::fmt::Display for InputStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputStrategy::FinderSelection => write!(f, "finder-selection"),
            InputStrategy::Clipboard => write!(f, "clipboard"),
        }
    }
}
