//! Failure types, one enum per domain.
//!
//! Session errors are local and never reach the network. API and plan
//! transport errors are retryable: the triggering action may simply be
//! re-issued. Plan validation errors get the same user-visible treatment
//! but are logged separately. Export errors abort cleanly without leaving
//! a partial file. Nothing here is fatal to the process.

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the site HTTP API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Violations of the test-session contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a test session needs at least one question")]
    InvalidSession,

    #[error("question {0} is not part of this test")]
    UnknownQuestion(i64),

    #[error("question {question_id} has no option labeled `{label}`")]
    UnknownOption { question_id: i64, label: String },

    #[error("only {answered} of {total} questions are answered")]
    IncompleteAnswers { answered: usize, total: usize },

    #[error("student name must not be empty")]
    MissingName,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("this test has already been submitted")]
    AlreadySubmitted,
}

/// Failures while generating a study plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("study plan request failed: {0}")]
    Transport(String),

    #[error("model returned an invalid study plan: {0}")]
    InvalidPlan(String),

    #[error("no model API key configured ({0} is unset)")]
    MissingApiKey(String),
}

/// Failures while exporting a study plan to PDF.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot export an empty study plan")]
    EmptyPlan,

    #[error("font file {0} is missing or unreadable")]
    FontUnavailable(PathBuf),

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("could not write the exported file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
