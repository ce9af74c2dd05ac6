//! Error types for the conversion pipeline.
//!
//! Errors carry context that chains through layers:
//! Run → Step → Tool → Detail

use std::io;

use thiserror::Error;

use crate::tools::ToolError;

/// Top-level pipeline error with run context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Run '{run_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        run_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Failed to set up the run (create directories, resolve tools).
    #[error("Run '{run_name}' setup failed: {message}")]
    SetupFailed { run_name: String, message: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        run_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            run_name: run_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(run_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            run_name: run_name.into(),
            message: message.into(),
        }
    }
}

/// Error from a pipeline step.
#[derive(Error, Debug)]
pub enum StepError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// An external tool invocation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_wraps_tool_failure() {
        let tool_err = ToolError::CommandFailed {
            tool: "ncmdump".to_string(),
            exit_code: 1,
            message: "bad magic".to_string(),
        };
        let err: StepError = tool_err.into();
        let msg = err.to_string();
        assert!(msg.contains("ncmdump"));
        assert!(msg.contains("bad magic"));
    }

    #[test]
    fn pipeline_error_chains_context() {
        let step_err = StepError::invalid_input("source missing");
        let pipeline_err = PipelineError::step_failed("song_xyz", "Decode", step_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("song_xyz"));
        assert!(msg.contains("Decode"));
        assert!(msg.contains("source missing"));
    }
}
