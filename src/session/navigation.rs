use super::*;

impl TestSession {
    /// Moves the cursor; out-of-range targets are clamped, never errors.
    pub fn go_to(&mut self, index: usize) {
        self.cursor = index.min(self.questions.len() - 1);
    }

    pub fn next_question(&mut self) {
        self.go_to(self.cursor.saturating_add(1));
    }

    pub fn previous_question(&mut self) {
        self.go_to(self.cursor.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_question_session;

    #[test]
    fn navigation_clamps_to_the_question_range() {
        let mut session = two_question_session();

        session.previous_question();
        assert_eq!(session.cursor(), 0);

        session.go_to(999);
        assert_eq!(session.cursor(), 1);

        session.next_question();
        assert_eq!(session.cursor(), 1);

        session.previous_question();
        assert_eq!(session.cursor(), 0);
    }
}
