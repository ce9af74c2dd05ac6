//! Pipeline orchestrator for the conversion run.
//!
//! This module provides the infrastructure for running the fixed-order
//! conversion pipeline. Each run consists of a sequence of steps that
//! validate, execute, and record their results.
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Decode     (required)
//!     ├── Step: Cover      (optional)
//!     ├── Step: Subtitles  (optional, config-gated)
//!     └── Step: Transcode  (required)
//! ```
//!
//! A required step's failure aborts the run; an optional step's failure
//! or skip only reduces the output's completeness.

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{CoverStep, DecodeStep, SubtitlesStep, TranscodeStep};
pub use types::{
    Context, CoverOutput, DecodeOutput, JobState, StepOutcome, SubtitleOutput, TranscodeOutput,
};

use crate::config::Settings;

/// Assemble the conversion pipeline for the given settings.
///
/// Decode and Transcode always run; the extraction steps are included
/// according to the `[extraction]` config section.
pub fn create_conversion_pipeline(settings: &Settings) -> Pipeline {
    let mut pipeline = Pipeline::new().with_step(DecodeStep::new());

    if settings.extraction.cover {
        pipeline = pipeline.with_step(CoverStep::new());
    }
    if settings.extraction.subtitles {
        pipeline = pipeline.with_step(SubtitlesStep::new());
    }

    pipeline.with_step(TranscodeStep::new())
}
