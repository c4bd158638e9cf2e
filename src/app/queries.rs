use super::*;

impl ExamApp {
    pub fn subjects(&self) -> &[SubjectGroup] {
        &self.subjects
    }

    pub fn is_loading_subjects(&self) -> bool {
        self.subjects_loading
    }

    pub fn selected_grade(&self) -> Option<GradeSlot> {
        self.selected_grade
    }

    pub fn is_creating_test(&self) -> bool {
        self.creating_test
    }

    pub fn session(&self) -> Option<&TestSession> {
        self.session.as_ref()
    }

    pub fn submission(&self) -> Option<&SubmissionResult> {
        self.submission.as_ref()
    }

    pub fn study_plan(&self) -> Option<&StudyPlan> {
        self.study_plan.as_ref()
    }

    pub fn is_plan_pending(&self) -> bool {
        self.plan_pending
    }

    /// The generate action is offered while a submission with at least
    /// one incorrect answer exists, nothing is pending, and no plan has
    /// been produced yet.
    pub fn can_generate_plan(&self) -> bool {
        !self.plan_pending
            && self.study_plan.is_none()
            && self
                .submission
                .as_ref()
                .is_some_and(|s| s.incorrect_questions().next().is_some())
    }

    pub fn participant_id(&self) -> &str {
        &self.identity.participant_id
    }

    /// Name to prefill into the submit form.
    pub fn display_name(&self) -> Option<&str> {
        self.identity.display_name.as_deref()
    }

    pub fn results(&self) -> &ResultsBrowser {
        &self.results
    }

    /// Mutable access for page/filter changes; pair with
    /// [`ExamApp::fetch_results`] to refresh the listing.
    pub fn results_mut(&mut self) -> &mut ResultsBrowser {
        &mut self.results
    }
}
