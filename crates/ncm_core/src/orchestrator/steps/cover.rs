//! Cover step - pulls embedded cover art out of the decoded file.

use crate::extraction;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, CoverOutput, JobState, StepOutcome};

/// Extracts embedded cover art to a JPEG sidecar. Optional: a probe or
/// extraction failure degrades the run instead of aborting it, and a
/// file with no embedded cover is simply skipped.
pub struct CoverStep;

impl CoverStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoverStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for CoverStep {
    fn name(&self) -> &str {
        "Cover"
    }

    fn description(&self) -> &str {
        "Extract embedded cover art"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let decoded = state
            .decoded_path()
            .ok_or_else(|| StepError::invalid_input("decode output not recorded"))?
            .clone();

        match extraction::extract_cover(&ctx.runner, &ctx.tools, &decoded, &ctx.dest_dir())? {
            Some(cover_path) => {
                ctx.logger
                    .info(&format!("Cover art extracted to {}", cover_path.display()));
                state.cover = Some(CoverOutput { cover_path });
                Ok(StepOutcome::Success)
            }
            None => Ok(StepOutcome::Skipped("no embedded cover art".to_string())),
        }
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.cover {
            Some(output) if output.cover_path.is_file() => Ok(()),
            Some(output) => Err(StepError::invalid_output(format!(
                "cover file missing: {}",
                output.cover_path.display()
            ))),
            None => Err(StepError::invalid_output("cover output not recorded")),
        }
    }

    fn is_optional(&self) -> bool {
        true
    }
}
