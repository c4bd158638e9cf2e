use serde::Serialize;

use super::*;

/// What leaves the session on submit. The participant id is attached by
/// the caller, which owns the identity.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmitPayload {
    pub test_id: i64,
    pub student_name: String,
    pub answers: HashMap<i64, String>,
}

impl TestSession {
    /// Local submission gate. Rejections happen before any network side
    /// effect; on success the session is `Submitting` and the returned
    /// payload is handed to the scoring client. A failed submission may
    /// be retried through this same call.
    pub fn begin_submit(&mut self, student_name: &str) -> Result<SubmitPayload, SessionError> {
        match self.status {
            SubmitStatus::InFlight => return Err(SessionError::SubmissionInFlight),
            SubmitStatus::Done => return Err(SessionError::AlreadySubmitted),
            _ => {}
        }

        if !self.can_submit() {
            return Err(SessionError::IncompleteAnswers {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }
        let name = student_name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName);
        }

        self.status = SubmitStatus::InFlight;
        log::info!(
            "test {}: submitting {} answers",
            self.test_id,
            self.answers.len()
        );
        Ok(SubmitPayload {
            test_id: self.test_id,
            student_name: name.to_string(),
            answers: self.answers.clone(),
        })
    }

    /// Applies the outcome of the in-flight submission. Returns the
    /// scored result for the caller to own. Completions arriving when
    /// nothing is in flight (a stale worker) are dropped.
    pub fn complete_submit(
        &mut self,
        outcome: Result<SubmissionResult, ApiError>,
    ) -> Option<SubmissionResult> {
        if self.status != SubmitStatus::InFlight {
            log::warn!("test {}: dropping stale submit completion", self.test_id);
            return None;
        }

        match outcome {
            Ok(result) => {
                self.status = SubmitStatus::Done;
                Some(result)
            }
            Err(err) => {
                log::warn!("test {}: submission failed: {err}", self.test_id);
                self.status = SubmitStatus::Failed(err.to_string());
                None
            }
        }
    }
}
