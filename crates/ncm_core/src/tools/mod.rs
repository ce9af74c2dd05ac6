//! External tool discovery and synchronous command execution.
//!
//! Every format operation is delegated to an external program. This
//! module resolves those programs once, before the pipeline starts, and
//! provides the blocking `CommandRunner` the pipeline steps share.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use thiserror::Error;

use crate::config::ToolSettings;
use crate::logging::RunLogger;

/// Errors from external tool resolution and invocation.
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required tool could not be resolved.
    #[error("Required tool '{tool}' is unavailable: {hint}")]
    NotFound { tool: String, hint: String },

    /// The tool process could not be spawned.
    #[error("Failed to launch {tool}: {source}")]
    LaunchFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool exited with a non-zero status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool's output could not be parsed.
    #[error("Failed to parse {tool} output: {message}")]
    ParseFailed { tool: String, message: String },

    /// An expected output file is missing or empty.
    #[error("Expected output file missing or empty: {}", .0.display())]
    OutputMissing(PathBuf),
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Resolved locations of the three external programs the pipeline uses.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    /// NCM decoder.
    pub ncmdump: PathBuf,
    /// Media transcoder.
    pub ffmpeg: PathBuf,
    /// Media prober.
    pub ffprobe: PathBuf,
}

impl ToolPaths {
    /// Resolve every required tool before the pipeline starts.
    ///
    /// A configured override wins; otherwise the tool is looked up on
    /// PATH. A missing required tool aborts the run here with a clear
    /// message instead of a spawn error mid-pipeline.
    pub fn resolve(settings: &ToolSettings) -> ToolResult<Self> {
        Ok(Self {
            ncmdump: resolve_tool("ncmdump", &settings.ncmdump)?,
            ffmpeg: resolve_tool("ffmpeg", &settings.ffmpeg)?,
            ffprobe: resolve_tool("ffprobe", &settings.ffprobe)?,
        })
    }
}

fn resolve_tool(name: &str, override_path: &str) -> ToolResult<PathBuf> {
    let override_path = override_path.trim();
    if !override_path.is_empty() {
        let path = PathBuf::from(override_path);
        if path.is_file() {
            return Ok(path);
        }
        return Err(ToolError::NotFound {
            tool: name.to_string(),
            hint: format!("configured path {} does not exist", path.display()),
        });
    }

    which::which(name).map_err(|_| ToolError::NotFound {
        tool: name.to_string(),
        hint: "not found in PATH".to_string(),
    })
}

/// Captured output of a finished external process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

impl CommandOutput {
    /// Convert a non-zero exit into a `ToolError::CommandFailed` carrying
    /// the captured diagnostic stream.
    pub fn require_success(self, tool: &str) -> ToolResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ToolError::CommandFailed {
                tool: tool.to_string(),
                exit_code: self.exit_code,
                message: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Synchronous command runner.
///
/// Blocks until the child exits, captures stdout/stderr, and feeds
/// output lines to the run logger's tail buffer so they can be replayed
/// after a failure.
#[derive(Clone, Default)]
pub struct CommandRunner {
    logger: Option<Arc<RunLogger>>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { logger: None }
    }

    /// Attach a run logger for command echo and tail capture.
    pub fn with_logger(mut self, logger: Arc<RunLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Run a program to completion and return its captured output.
    ///
    /// A non-zero exit is not an error at this layer; callers decide via
    /// `CommandOutput::require_success`.
    pub fn run(&self, tool: &str, program: &Path, args: &[OsString]) -> ToolResult<CommandOutput> {
        if let Some(ref logger) = self.logger {
            let rendered: Vec<String> = args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            logger.command(&format!("{} {}", program.display(), rendered.join(" ")));
        }

        let output = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ToolError::LaunchFailed {
                tool: tool.to_string(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if let Some(ref logger) = self.logger {
            for line in stdout.lines() {
                logger.output_line(line, false);
            }
            for line in stderr.lines() {
                logger.output_line(line, true);
            }
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn override_path_must_exist() {
        let result = resolve_tool("ncmdump", "/nonexistent/bin/ncmdump");
        assert!(matches!(result, Err(ToolError::NotFound { .. })));
    }

    #[test]
    fn override_path_wins_when_present() {
        let dir = tempdir().unwrap();
        let fake = dir.path().join("ncmdump");
        std::fs::write(&fake, b"").unwrap();

        let resolved = resolve_tool("ncmdump", fake.to_str().unwrap()).unwrap();
        assert_eq!(resolved, fake);
    }

    #[test]
    fn require_success_passes_through_zero_exit() {
        let output = CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            success: true,
        };
        assert!(output.require_success("ffmpeg").is_ok());
    }

    #[test]
    fn require_success_carries_stderr() {
        let output = CommandOutput {
            stdout: String::new(),
            stderr: "No such file or directory\n".to_string(),
            exit_code: 1,
            success: false,
        };
        let err = output.require_success("ncmdump").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ncmdump"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn launch_failure_is_reported() {
        let runner = CommandRunner::new();
        let result = runner.run("ncmdump", Path::new("/nonexistent/bin/ncmdump"), &[]);
        assert!(matches!(result, Err(ToolError::LaunchFailed { .. })));
    }
}
