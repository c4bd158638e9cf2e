use std::sync::mpsc;
use std::sync::mpsc::TryRecvError;
use std::thread;

use super::*;
use crate::plan;

impl ExamApp {
    /// Kicks off the catalog fetch. A no-op while one is already out.
    pub fn load_subjects(&mut self) {
        if self.subjects_loading {
            return;
        }
        self.subjects_loading = true;
        self.message.clear();

        let site = self.site.clone();
        let (tx, rx) = mpsc::channel();
        self.subjects_rx = Some(rx);
        thread::spawn(move || {
            let _ = tx.send(site.subjects());
        });
    }

    /// Remembers the picked subject/grade. Ineligible grades cannot be
    /// selected, mirroring their disabled rendering.
    pub fn select_grade(&mut self, slot: GradeSlot) {
        if !slot.has_enough_questions {
            self.message = "This grade does not have enough questions yet.".to_string();
            return;
        }
        self.selected_grade = Some(slot);
        self.message.clear();
    }

    /// Creates a test for the remembered grade.
    pub fn start_selected_test(&mut self) {
        if let Some(slot) = self.selected_grade {
            self.start_test(slot);
        }
    }

    /// Creates a test for the picked grade and, once the response lands,
    /// enters the test page with a fresh session.
    pub fn start_test(&mut self, slot: GradeSlot) {
        if !slot.has_enough_questions {
            self.message = "This grade does not have enough questions yet.".to_string();
            return;
        }
        if self.creating_test {
            return;
        }
        self.creating_test = true;
        self.message.clear();

        let site = self.site.clone();
        let (tx, rx) = mpsc::channel();
        self.create_rx = Some(rx);
        thread::spawn(move || {
            let _ = tx.send(site.create_test(slot.id));
        });
    }

    /// Records an answer on the active session. Contract violations are
    /// wiring bugs; they are logged and surfaced inline rather than
    /// crashing the flow.
    pub fn select_answer(&mut self, question_id: i64, label: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(err) = session.select_answer(question_id, label) {
            log::error!("answer rejected: {err}");
            self.message = err.to_string();
        }
    }

    /// Validates locally, remembers the display name, then hands the
    /// payload to a worker. The name is persisted before the request is
    /// sent so a retry after failure keeps it.
    pub fn submit(&mut self, student_name: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.begin_submit(student_name) {
            Ok(payload) => {
                self.message.clear();
                if let Err(err) = self.identity_store.remember_name(&payload.student_name) {
                    log::warn!("could not persist display name: {err}");
                }
                self.identity.display_name = Some(payload.student_name.clone());

                let site = self.site.clone();
                let student_id = self.identity.participant_id.clone();
                let (tx, rx) = mpsc::channel();
                self.submit_rx = Some(rx);
                thread::spawn(move || {
                    let _ = tx.send(site.submit_test(&student_id, &payload));
                });
            }
            Err(err) => {
                self.message = err.to_string();
            }
        }
    }

    /// Starts plan generation for the current submission. Available once
    /// per result: the action disappears as soon as a plan exists.
    pub fn generate_plan(&mut self) {
        if !self.can_generate_plan() {
            return;
        }
        let Some(submission) = self.submission.clone() else {
            return;
        };
        let Some(model) = self.model.clone() else {
            self.message = "Study plan generation is not configured.".to_string();
            return;
        };

        self.plan_pending = true;
        self.message.clear();

        let (tx, rx) = mpsc::channel();
        self.plan_rx = Some(rx);
        thread::spawn(move || {
            let _ = tx.send(plan::generate(&submission.subject, &submission, &model));
        });
    }

    /// Writes the generated plan as a PDF and reports where it went.
    pub fn export_plan(&mut self) -> Option<std::path::PathBuf> {
        let (Some(submission), Some(plan)) = (&self.submission, &self.study_plan) else {
            return None;
        };
        match self.exporter.export(&submission.subject, plan) {
            Ok(path) => {
                self.message = format!("Saved {}", path.display());
                Some(path)
            }
            Err(err) => {
                log::error!("export failed: {err}");
                self.message = err.to_string();
                None
            }
        }
    }

    /// Fetches the history page matching the browser's current query.
    pub fn fetch_results(&mut self) {
        if self.results_rx.is_some() {
            return;
        }
        self.results.begin_fetch();
        self.message.clear();

        let site = self.site.clone();
        let query = self.results.query();
        let (tx, rx) = mpsc::channel();
        self.results_rx = Some(rx);
        thread::spawn(move || {
            let _ = tx.send(site.test_results(&query));
        });
    }

    /// Applies every finished network operation. Call once per frame (or
    /// per event-loop turn); completions whose channel was dropped on a
    /// page change never reach here.
    pub fn poll(&mut self) {
        self.poll_subjects();
        self.poll_create();
        self.poll_submit();
        self.poll_plan();
        self.poll_results();
    }

    fn poll_subjects(&mut self) {
        let Some(rx) = self.subjects_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(subjects)) => {
                self.subjects_loading = false;
                self.subjects = SubjectGroup::group_by_name(subjects);
            }
            Ok(Err(err)) => {
                self.subjects_loading = false;
                self.message = "Could not load subjects. Please try again later.".to_string();
                log::warn!("subject fetch failed: {err}");
            }
            Err(TryRecvError::Empty) => self.subjects_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.subjects_loading = false;
                self.message = "Could not load subjects. Please try again later.".to_string();
            }
        }
    }

    fn poll_create(&mut self) {
        let Some(rx) = self.create_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(created)) => {
                self.creating_test = false;
                match TestSession::new(created.test_id, created.questions) {
                    Ok(session) => {
                        self.session = Some(session);
                        self.submission = None;
                        self.study_plan = None;
                        self.state = AppState::Test;
                        self.message.clear();
                    }
                    Err(err) => {
                        // An empty test is unusable; stay on the catalog.
                        log::error!("created test is unusable: {err}");
                        self.message = "Failed to create the test. Please try again.".to_string();
                    }
                }
            }
            Ok(Err(err)) => {
                self.creating_test = false;
                self.message = "Failed to create the test. Please try again.".to_string();
                log::warn!("test creation failed: {err}");
            }
            Err(TryRecvError::Empty) => self.create_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.creating_test = false;
                self.message = "Failed to create the test. Please try again.".to_string();
            }
        }
    }

    fn poll_submit(&mut self) {
        let Some(rx) = self.submit_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                if let Some(result) = session.complete_submit(outcome) {
                    self.submission = Some(result);
                    self.study_plan = None;
                    self.plan_pending = false;
                    self.state = AppState::Result;
                    self.message.clear();
                } else if let Some(err) = session.submit_error() {
                    self.message = format!("An error occurred while submitting: {err}");
                }
            }
            Err(TryRecvError::Empty) => self.submit_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                if let Some(session) = self.session.as_mut() {
                    session.complete_submit(Err(ApiError::Network {
                        url: "submit worker".to_string(),
                        message: "worker exited before reporting".to_string(),
                    }));
                }
                self.message = "An error occurred while submitting. Please try again.".to_string();
            }
        }
    }

    fn poll_plan(&mut self) {
        let Some(rx) = self.plan_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.plan_pending = false;
                match outcome {
                    Ok(PlanOutcome::Plan(plan)) => {
                        self.study_plan = Some(plan);
                        self.message.clear();
                    }
                    Ok(PlanOutcome::NotNeeded) => {
                        self.message = "Great score! No study plan needed.".to_string();
                    }
                    Err(err) => {
                        log::warn!("plan generation failed: {err}");
                        self.message =
                            "Failed to generate the study plan. Please try again.".to_string();
                    }
                }
            }
            Err(TryRecvError::Empty) => self.plan_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.plan_pending = false;
                self.message = "Failed to generate the study plan. Please try again.".to_string();
            }
        }
    }

    fn poll_results(&mut self) {
        let Some(rx) = self.results_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => self.results.apply(outcome),
            Err(TryRecvError::Empty) => self.results_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.results.apply(Err(ApiError::Network {
                    url: "results worker".to_string(),
                    message: "worker exited before reporting".to_string(),
                }));
            }
        }
    }
}
