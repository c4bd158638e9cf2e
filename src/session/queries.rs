use super::*;

impl TestSession {
    pub fn test_id(&self) -> i64 {
        self.test_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    pub fn answer_for(&self, question_id: i64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Fraction of the sequence the cursor has reached, for progress bars.
    pub fn progress_percent(&self) -> f32 {
        (self.cursor + 1) as f32 / self.questions.len() as f32 * 100.0
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.status {
            SubmitStatus::Idle if self.can_submit() => SessionPhase::ReadyToSubmit,
            SubmitStatus::Idle => SessionPhase::Answering,
            SubmitStatus::InFlight => SessionPhase::Submitting,
            SubmitStatus::Done => SessionPhase::Submitted,
            SubmitStatus::Failed(_) => SessionPhase::SubmitFailed,
        }
    }

    /// The message of the last failed submission, if that is where we are.
    pub fn submit_error(&self) -> Option<&str> {
        match &self.status {
            SubmitStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
