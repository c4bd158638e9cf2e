//! Study plan generation from a scored submission.
//!
//! The prompt is built deterministically from the incorrect answers and
//! handed to a [`StructuredModel`] together with a fixed response schema;
//! the raw text that comes back must parse as `{"topics": [{"name",
//! "desc"}]}`. A perfect score short-circuits before any model call.

use crate::error::PlanError;
use crate::model::{ResultQuestion, StudyPlan, SubjectDetail, SubmissionResult};

pub mod prompt;

mod gemini;
pub use gemini::GeminiClient;

/// Seam to the structured-generation service. `generate` returns the raw
/// completion text; interpreting it is this module's job.
pub trait StructuredModel {
    fn generate(&self, prompt: &str, schema: &serde_json::Value) -> Result<String, PlanError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Every answer was correct; there is nothing to study.
    NotNeeded,
    Plan(StudyPlan),
}

/// Builds a study plan for one submission. Stateless and idempotent:
/// each call is independent and a failed one may simply be repeated.
pub fn generate(
    subject: &SubjectDetail,
    submission: &SubmissionResult,
    model: &dyn StructuredModel,
) -> Result<PlanOutcome, PlanError> {
    let incorrect: Vec<&ResultQuestion> = submission.incorrect_questions().collect();
    if incorrect.is_empty() {
        log::info!("perfect score on test result {}, no plan needed", submission.score.id);
        return Ok(PlanOutcome::NotNeeded);
    }

    let prompt = prompt::build_prompt(subject, &submission.score, &incorrect);
    let raw = model.generate(&prompt, &prompt::response_schema())?;
    let plan = parse_plan(&raw)?;
    log::info!("generated a study plan with {} topics", plan.topics.len());
    Ok(PlanOutcome::Plan(plan))
}

/// Validates the raw model output against the declared shape. Anything
/// short of a full `{name, desc}` per topic is rejected whole; no
/// partial plan ever escapes.
fn parse_plan(raw: &str) -> Result<StudyPlan, PlanError> {
    serde_json::from_str::<StudyPlan>(raw).map_err(|err| {
        log::error!("study plan response failed validation: {err}");
        PlanError::InvalidPlan(err.to_string())
    })
}
