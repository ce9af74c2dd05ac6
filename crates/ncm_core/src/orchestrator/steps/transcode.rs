//! Transcode step - re-encodes the decoded file into the final
//! ALAC/M4A container.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome, TranscodeOutput};
use crate::transcode;

/// Invokes the external transcoder. Required: a transcoder failure
/// halts the run with no final artifact.
pub struct TranscodeStep;

impl TranscodeStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TranscodeStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for TranscodeStep {
    fn name(&self) -> &str {
        "Transcode"
    }

    fn description(&self) -> &str {
        "Encode the decoded file to ALAC/M4A"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let decoded = state
            .decoded_path()
            .ok_or_else(|| StepError::invalid_input("decode output not recorded"))?;

        if !decoded.is_file() {
            return Err(StepError::invalid_input(format!(
                "decoded file missing: {}",
                decoded.display()
            )));
        }

        let output = transcode::transcode_to_alac(&ctx.runner, &ctx.tools, decoded)?;

        ctx.logger
            .info(&format!("Encoded to {}", output.display()));
        state.transcode = Some(TranscodeOutput {
            output_path: output,
        });

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match state.output_path() {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "output file missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("transcode output not recorded")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcode_step_is_required() {
        let step = TranscodeStep::new();
        assert_eq!(step.name(), "Transcode");
        assert!(!step.is_optional());
    }
}
