//! Pipeline runner that executes steps in sequence.

use super::errors::{PipelineError, PipelineResult, StepResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Pipeline that runs a sequence of steps.
///
/// Steps execute in order with validation before and after each one.
/// A required step's failure aborts the run; an optional step's failure
/// is downgraded to a degraded outcome and the run continues.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Run the pipeline with the given context and state.
    ///
    /// For each step:
    /// 1. Run `validate_input`
    /// 2. Run `execute`
    /// 3. Run `validate_output` (if execute returned Success)
    ///
    /// Returns the run result on success, or a `PipelineError` when a
    /// required step fails. After a fatal failure the captured tool
    /// output tail is replayed for diagnosis.
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult::default();

        for step in &self.steps {
            let step_name = step.name().to_string();
            ctx.logger.phase(&step_name);
            ctx.logger.clear_tail();

            match Self::run_step(step.as_ref(), ctx, state) {
                Ok(StepOutcome::Success) => {
                    ctx.logger.success(&format!("{} completed", step_name));
                    result.steps_completed.push(step_name);
                }
                Ok(StepOutcome::Skipped(reason)) => {
                    ctx.logger.info(&format!("{} skipped: {}", step_name, reason));
                    result.steps_skipped.push(step_name);
                }
                Err(e) if step.is_optional() => {
                    ctx.logger
                        .warn(&format!("{} failed (continuing): {}", step_name, e));
                    result.steps_degraded.push((step_name, e.to_string()));
                }
                Err(e) => {
                    ctx.logger.error(&format!("{} failed: {}", step_name, e));
                    ctx.logger.show_tail(&step_name);
                    return Err(PipelineError::step_failed(&ctx.run_name, &step_name, e));
                }
            }
        }

        ctx.logger.success("Pipeline completed");
        Ok(result)
    }

    fn run_step(
        step: &dyn PipelineStep,
        ctx: &Context,
        state: &mut JobState,
    ) -> StepResult<StepOutcome> {
        step.validate_input(ctx)?;
        let outcome = step.execute(ctx, state)?;
        if outcome == StepOutcome::Success {
            step.validate_output(ctx, state)?;
        }
        Ok(outcome)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Steps that had nothing to do.
    pub steps_skipped: Vec<String>,
    /// Optional steps that failed, with their diagnostics.
    pub steps_degraded: Vec<(String, String)>,
}

impl PipelineRunResult {
    /// Check if every step completed (none skipped or degraded).
    pub fn all_completed(&self) -> bool {
        self.steps_skipped.is_empty() && self.steps_degraded.is_empty()
    }

    /// Total number of steps that ran.
    pub fn total_steps(&self) -> usize {
        self.steps_completed.len() + self.steps_skipped.len() + self.steps_degraded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::logging::{LogConfig, RunLogger};
    use crate::orchestrator::errors::StepError;
    use crate::tools::ToolPaths;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn test_context(dir: &std::path::Path) -> Context {
        let logger = Arc::new(RunLogger::new("test", dir, LogConfig::default(), None).unwrap());
        let tools = ToolPaths {
            ncmdump: PathBuf::from("ncmdump"),
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        };
        Context::new(
            Settings::default(),
            dir.join("song.ncm"),
            "test",
            tools,
            logger,
        )
    }

    struct CountingStep {
        name: &'static str,
        execute_count: Arc<AtomicUsize>,
    }

    impl PipelineStep for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            self.execute_count.fetch_add(1, Ordering::SeqCst);
            Ok(StepOutcome::Success)
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    struct FailingStep {
        name: &'static str,
        optional: bool,
    }

    impl PipelineStep for FailingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            Err(StepError::invalid_input("deliberate failure"))
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn is_optional(&self) -> bool {
            self.optional
        }
    }

    struct SkippingStep;

    impl PipelineStep for SkippingStep {
        fn name(&self) -> &str {
            "Skipper"
        }

        fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            Ok(StepOutcome::Skipped("nothing to do".to_string()))
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    #[test]
    fn pipeline_builds_correctly() {
        let pipeline = Pipeline::new()
            .with_step(CountingStep {
                name: "Step1",
                execute_count: Arc::new(AtomicUsize::new(0)),
            })
            .with_step(CountingStep {
                name: "Step2",
                execute_count: Arc::new(AtomicUsize::new(0)),
            });

        assert_eq!(pipeline.step_count(), 2);
        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn optional_failure_degrades_and_continues() {
        let dir = tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = JobState::new("test");

        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(FailingStep {
                name: "Cover",
                optional: true,
            })
            .with_step(CountingStep {
                name: "Transcode",
                execute_count: Arc::clone(&count),
            });

        let result = pipeline.run(&ctx, &mut state).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(result.steps_degraded.len(), 1);
        assert_eq!(result.steps_degraded[0].0, "Cover");
        assert_eq!(result.steps_completed, vec!["Transcode".to_string()]);
    }

    #[test]
    fn required_failure_aborts_before_later_steps() {
        let dir = tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = JobState::new("test");

        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(FailingStep {
                name: "Decode",
                optional: false,
            })
            .with_step(CountingStep {
                name: "Transcode",
                execute_count: Arc::clone(&count),
            });

        let result = pipeline.run(&ctx, &mut state);
        assert!(matches!(
            result,
            Err(PipelineError::StepFailed { ref step_name, .. }) if step_name == "Decode"
        ));
        // The transcoder is never invoked after a fatal decode failure
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn skipped_step_is_recorded_and_run_continues() {
        let dir = tempdir().unwrap();
        let ctx = test_context(dir.path());
        let mut state = JobState::new("test");

        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().with_step(SkippingStep).with_step(CountingStep {
            name: "After",
            execute_count: Arc::clone(&count),
        });

        let result = pipeline.run(&ctx, &mut state).unwrap();
        assert_eq!(result.steps_skipped, vec!["Skipper".to_string()]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!result.all_completed());
    }
}
