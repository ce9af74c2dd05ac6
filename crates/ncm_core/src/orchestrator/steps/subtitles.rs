//! Subtitles step - pulls an embedded subtitle stream out of the
//! decoded file.

use crate::extraction;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome, SubtitleOutput};

/// Extracts the first embedded subtitle stream to an SRT sidecar.
/// Optional, same policy as cover extraction.
pub struct SubtitlesStep;

impl SubtitlesStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubtitlesStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for SubtitlesStep {
    fn name(&self) -> &str {
        "Subtitles"
    }

    fn description(&self) -> &str {
        "Extract embedded subtitles"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let decoded = state
            .decoded_path()
            .ok_or_else(|| StepError::invalid_input("decode output not recorded"))?
            .clone();

        match extraction::extract_subtitles(&ctx.runner, &ctx.tools, &decoded, &ctx.dest_dir())? {
            Some(subtitle_path) => {
                ctx.logger.info(&format!(
                    "Subtitles extracted to {}",
                    subtitle_path.display()
                ));
                state.subtitles = Some(SubtitleOutput { subtitle_path });
                Ok(StepOutcome::Success)
            }
            None => Ok(StepOutcome::Skipped("no embedded subtitles".to_string())),
        }
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.subtitles {
            Some(output) if output.subtitle_path.is_file() => Ok(()),
            Some(output) => Err(StepError::invalid_output(format!(
                "subtitle file missing: {}",
                output.subtitle_path.display()
            ))),
            None => Err(StepError::invalid_output("subtitle output not recorded")),
        }
    }

    fn is_optional(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtitles_step_is_optional() {
        let step = SubtitlesStep::new();
        assert_eq!(step.name(), "Subtitles");
        assert!(step.is_optional());
    }
}
