//! Core types for the conversion pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::tools::{CommandRunner, ToolPaths};

/// Read-only context passed to pipeline steps.
///
/// Contains the validated source file and shared resources that steps
/// can read but not modify. Mutable state goes in `JobState`.
pub struct Context {
    /// Application settings.
    pub settings: Settings,
    /// Validated source file (the `.ncm` input).
    pub source: PathBuf,
    /// Run name/identifier.
    pub run_name: String,
    /// Resolved external tool locations.
    pub tools: ToolPaths,
    /// Per-run logger.
    pub logger: Arc<RunLogger>,
    /// Shared command runner wired to the run logger.
    pub runner: CommandRunner,
}

impl Context {
    /// Create a new context for a run.
    pub fn new(
        settings: Settings,
        source: PathBuf,
        run_name: impl Into<String>,
        tools: ToolPaths,
        logger: Arc<RunLogger>,
    ) -> Self {
        let runner = CommandRunner::new().with_logger(Arc::clone(&logger));
        Self {
            settings,
            source,
            run_name: run_name.into(),
            tools,
            logger,
            runner,
        }
    }

    /// Directory sidecar artifacts are written to (the source's parent).
    pub fn dest_dir(&self) -> PathBuf {
        self.source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Mutable run state that accumulates results from pipeline steps.
///
/// This is the "write-once manifest" - steps add new data but do not
/// overwrite existing values. Each step's output is stored in its own
/// section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobState {
    /// Unique run identifier.
    pub run_id: String,
    /// When the run started.
    pub started_at: Option<String>,
    /// Decode results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode: Option<DecodeOutput>,
    /// Cover extraction results (absent when no cover was produced).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverOutput>,
    /// Subtitle extraction results (absent when no subtitle was produced).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<SubtitleOutput>,
    /// Transcode results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcode: Option<TranscodeOutput>,
}

impl JobState {
    /// Create a new run state with the given ID.
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if decoding has been completed.
    pub fn has_decode(&self) -> bool {
        self.decode.is_some()
    }

    /// Get the decoded file path (if decoding completed).
    pub fn decoded_path(&self) -> Option<&PathBuf> {
        self.decode.as_ref().map(|d| &d.decoded_path)
    }

    /// Get the final output path (if transcoding completed).
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.transcode.as_ref().map(|t| &t.output_path)
    }
}

/// Output from the Decode step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeOutput {
    /// Path to the intermediate lossless file.
    pub decoded_path: PathBuf,
}

/// Output from the Cover step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverOutput {
    /// Path to the extracted cover image.
    pub cover_path: PathBuf,
}

/// Output from the Subtitles step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleOutput {
    /// Path to the extracted subtitle sidecar.
    pub subtitle_path: PathBuf,
}

/// Output from the Transcode step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeOutput {
    /// Path to the final encoded container.
    pub output_path: PathBuf,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step had nothing to do (e.g., no embedded cover); not an error.
    Skipped(String),
}
