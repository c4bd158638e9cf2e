use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::{Question, ResultsPage, Subject, SubmissionResult};
use crate::results::ResultsQuery;
use crate::session::SubmitPayload;

/// Every generated test carries this many questions.
pub const QUESTIONS_PER_TEST: u32 = 30;

#[derive(Deserialize)]
struct SubjectsResponse {
    subjects: Vec<Subject>,
}

#[derive(Serialize)]
struct CreateTestBody {
    subject_id: i64,
    questions_count: u32,
}

/// A freshly created test: its id plus the questions to present.
#[derive(Deserialize, Debug, Clone)]
pub struct CreatedTest {
    pub test_id: i64,
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
struct SubmitTestBody<'a> {
    test_id: i64,
    student_id: &'a str,
    student_name: &'a str,
    answers: &'a HashMap<i64, String>,
}

/// Blocking client for the site API. Cheap to clone; worker threads get
/// their own copy.
#[derive(Debug, Clone)]
pub struct SiteClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl SiteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        let response: SubjectsResponse = self.get("/api/site/subjects/", &[])?;
        Ok(response.subjects)
    }

    pub fn create_test(&self, subject_id: i64) -> Result<CreatedTest, ApiError> {
        let body = CreateTestBody {
            subject_id,
            questions_count: QUESTIONS_PER_TEST,
        };
        self.post("/api/site/create-test/", &body)
    }

    /// Atomic from the client's perspective: either the whole answer map
    /// is scored or the call failed and may be re-issued as-is.
    pub fn submit_test(
        &self,
        student_id: &str,
        payload: &SubmitPayload,
    ) -> Result<SubmissionResult, ApiError> {
        let body = SubmitTestBody {
            test_id: payload.test_id,
            student_id,
            student_name: &payload.student_name,
            answers: &payload.answers,
        };
        self.post("/api/site/submit-test/", &body)
    }

    pub fn test_results(&self, query: &ResultsQuery) -> Result<ResultsPage, ApiError> {
        let params = [
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
            ("subject_id", query.subject_id.clone()),
            ("search", query.search.clone()),
        ];
        self.get("/api/site/test-results/", &params)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .map_err(|err| ApiError::Network {
                url: url.clone(),
                message: err.to_string(),
            })?;
        Self::decode(url, response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|err| ApiError::Network {
                url: url.clone(),
                message: err.to_string(),
            })?;
        Self::decode(url, response)
    }

    fn decode<T: DeserializeOwned>(
        url: String,
        response: reqwest::blocking::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            log::warn!("{url} returned HTTP {status}");
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }
        response.json::<T>().map_err(|err| ApiError::Decode {
            url,
            message: err.to_string(),
        })
    }
}
