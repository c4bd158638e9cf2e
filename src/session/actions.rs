use super::*;

impl TestSession {
    /// Records (or overwrites) the answer for one question.
    ///
    /// Unknown question ids and labels are integration errors, not user
    /// input. After a pick the cursor moves to the following question,
    /// unless the answered one was last in the sequence; any display
    /// delay before the move is the rendering layer's business.
    pub fn select_answer(&mut self, question_id: i64, label: &str) -> Result<(), SessionError> {
        match self.status {
            SubmitStatus::InFlight => return Err(SessionError::SubmissionInFlight),
            SubmitStatus::Done => return Err(SessionError::AlreadySubmitted),
            _ => {}
        }

        let index = self
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or(SessionError::UnknownQuestion(question_id))?;
        if !self.questions[index].options.contains(label) {
            return Err(SessionError::UnknownOption {
                question_id,
                label: label.to_string(),
            });
        }

        self.answers.insert(question_id, label.to_string());
        if index + 1 < self.questions.len() {
            self.cursor = index + 1;
        }
        Ok(())
    }

    /// True iff every question has an answer. Recomputed on every call,
    /// so it is always in step with the answer map.
    pub fn can_submit(&self) -> bool {
        self.answers.len() == self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_question_session;
    use super::*;

    #[test]
    fn can_submit_only_once_every_question_is_answered() {
        let mut session = two_question_session();
        assert!(!session.can_submit());

        session.select_answer(1, "B").unwrap();
        assert!(!session.can_submit());

        session.select_answer(2, "A").unwrap();
        assert!(session.can_submit());
    }

    #[test]
    fn reselecting_overwrites_without_growing_the_map() {
        let mut session = two_question_session();
        session.select_answer(1, "A").unwrap();
        session.select_answer(1, "B").unwrap();

        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.answer_for(1), Some("B"));
    }

    #[test]
    fn answering_advances_the_cursor_except_on_the_last_question() {
        let mut session = two_question_session();
        assert_eq!(session.cursor(), 0);

        session.select_answer(1, "A").unwrap();
        assert_eq!(session.cursor(), 1);

        session.select_answer(2, "B").unwrap();
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn answering_an_earlier_question_moves_forward_from_it() {
        let mut session = two_question_session();
        session.select_answer(1, "A").unwrap();
        session.select_answer(2, "A").unwrap();

        session.go_to(0);
        session.select_answer(1, "B").unwrap();
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn unknown_question_and_label_are_rejected() {
        let mut session = two_question_session();

        assert_eq!(
            session.select_answer(99, "A").unwrap_err(),
            SessionError::UnknownQuestion(99)
        );
        assert_eq!(
            session.select_answer(1, "Z").unwrap_err(),
            SessionError::UnknownOption {
                question_id: 1,
                label: "Z".to_string()
            }
        );
        assert_eq!(session.answered_count(), 0);
    }
}
