//! Headless application flow: which page is showing, what it owns, and
//! which network operations are in flight.
//!
//! Network calls run on worker threads and report back through `mpsc`
//! channels; [`ExamApp::poll`] applies whatever has finished. Leaving a
//! page drops its channel, so a completion that arrives afterwards is
//! discarded instead of applied.

use std::sync::mpsc::Receiver;

use crate::api::{CreatedTest, SiteClient};
use crate::config::AppConfig;
use crate::error::{ApiError, PlanError};
use crate::export::PlanExporter;
use crate::identity::{Identity, IdentityStore};
use crate::model::{
    AppState, GradeSlot, ResultsPage, StudyPlan, Subject, SubjectGroup, SubmissionResult,
};
use crate::plan::{GeminiClient, PlanOutcome};
use crate::results::ResultsBrowser;
use crate::session::TestSession;

pub mod actions;
pub mod navigation;
pub mod queries;

pub struct ExamApp {
    pub state: AppState,
    /// Inline message for the current page; one failure at a time, no
    /// global error state survives navigation.
    pub message: String,

    identity: Identity,
    identity_store: IdentityStore,
    site: SiteClient,
    model: Option<GeminiClient>,
    exporter: PlanExporter,

    subjects: Vec<SubjectGroup>,
    subjects_loading: bool,
    selected_grade: Option<GradeSlot>,
    creating_test: bool,
    session: Option<TestSession>,
    submission: Option<SubmissionResult>,
    study_plan: Option<StudyPlan>,
    plan_pending: bool,
    results: ResultsBrowser,

    subjects_rx: Option<Receiver<Result<Vec<Subject>, ApiError>>>,
    create_rx: Option<Receiver<Result<CreatedTest, ApiError>>>,
    submit_rx: Option<Receiver<Result<SubmissionResult, ApiError>>>,
    plan_rx: Option<Receiver<Result<PlanOutcome, PlanError>>>,
    results_rx: Option<Receiver<Result<ResultsPage, ApiError>>>,
}

impl ExamApp {
    pub fn new(config: AppConfig) -> std::io::Result<Self> {
        Self::with_store(config, IdentityStore::open_default())
    }

    /// Same as [`ExamApp::new`] with an explicit identity location.
    pub fn with_store(config: AppConfig, identity_store: IdentityStore) -> std::io::Result<Self> {
        let identity = identity_store.load_or_create()?;
        let site = SiteClient::new(config.api_base_url.clone());
        let model = match GeminiClient::from_env(&config.model) {
            Ok(client) => Some(client),
            Err(err) => {
                log::warn!("study plan generation unavailable: {err}");
                None
            }
        };
        let exporter = PlanExporter::new(config.font_path, config.export_dir);

        Ok(Self {
            state: AppState::default(),
            message: String::new(),
            identity,
            identity_store,
            site,
            model,
            exporter,
            subjects: Vec::new(),
            subjects_loading: false,
            selected_grade: None,
            creating_test: false,
            session: None,
            submission: None,
            study_plan: None,
            plan_pending: false,
            results: ResultsBrowser::new(),
            subjects_rx: None,
            create_rx: None,
            submit_rx: None,
            plan_rx: None,
            results_rx: None,
        })
    }
}
