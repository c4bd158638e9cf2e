use super::*;

impl ExamApp {
    /// Back to the catalog. Drops the active session and anything in
    /// flight for it; a completion landing after this point is ignored.
    pub fn open_subject_select(&mut self) {
        self.state = AppState::SubjectSelect;
        self.selected_grade = None;
        self.session = None;
        self.submission = None;
        self.study_plan = None;
        self.plan_pending = false;
        self.creating_test = false;
        self.create_rx = None;
        self.submit_rx = None;
        self.plan_rx = None;
        self.message.clear();
    }

    /// Opens the historical results listing and refreshes it.
    pub fn open_history(&mut self) {
        self.state = AppState::History;
        self.message.clear();
        self.fetch_results();
    }

    /// Question navigation on the active session; clamped, never fails.
    pub fn next_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.next_question();
        }
    }

    pub fn previous_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.previous_question();
        }
    }

    pub fn go_to_question(&mut self, index: usize) {
        if let Some(session) = self.session.as_mut() {
            session.go_to(index);
        }
    }
}
