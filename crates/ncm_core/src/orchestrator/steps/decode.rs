//! Decode step - turns the NCM source into its sibling FLAC.

use crate::decode;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, DecodeOutput, JobState, StepOutcome};

/// Invokes the external NCM decoder. Required: a decoder failure halts
/// the run before any extraction or transcoding happens.
pub struct DecodeStep;

impl DecodeStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DecodeStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for DecodeStep {
    fn name(&self) -> &str {
        "Decode"
    }

    fn description(&self) -> &str {
        "Decode the NCM source to FLAC"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if !ctx.source.is_file() {
            return Err(StepError::invalid_input(format!(
                "source file missing: {}",
                ctx.source.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let decoded = decode::decode_to_flac(&ctx.runner, &ctx.tools.ncmdump, &ctx.source)?;

        ctx.logger
            .info(&format!("Decoded to {}", decoded.display()));
        state.decode = Some(DecodeOutput {
            decoded_path: decoded,
        });

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match state.decoded_path() {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "decoded file missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("decode output not recorded")),
        }
    }
}
