//! The in-memory state machine for one test attempt.
//!
//! A session owns the question order, the answer map and the display
//! cursor; nothing else mutates them. Submission goes through
//! [`TestSession::begin_submit`] (local gate, flips the in-flight flag)
//! and [`TestSession::complete_submit`] (applies the network outcome).

use std::collections::HashMap;

use crate::error::{ApiError, SessionError};
use crate::model::{Question, SubmissionResult};

pub mod actions;
pub mod navigation;
pub mod queries;
pub mod submit;

pub use submit::SubmitPayload;

/// Where the submission stands. `InFlight` doubles as the re-entrancy
/// guard: no second submission can start while one is out.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SubmitStatus {
    Idle,
    InFlight,
    Done,
    Failed(String),
}

/// Display-level phase of the session, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Answering,
    ReadyToSubmit,
    Submitting,
    Submitted,
    SubmitFailed,
}

#[derive(Debug)]
pub struct TestSession {
    test_id: i64,
    questions: Vec<Question>,
    answers: HashMap<i64, String>,
    cursor: usize,
    status: SubmitStatus,
}

impl TestSession {
    /// A session refuses to exist without questions; the caller is
    /// expected to send the user back to subject selection instead.
    pub fn new(test_id: i64, mut questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::InvalidSession);
        }
        // The backend assigns the display sequence.
        questions.sort_by_key(|q| q.order_number);
        Ok(Self {
            test_id,
            questions,
            answers: HashMap::new(),
            cursor: 0,
            status: SubmitStatus::Idle,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{OptionSet, Question};

    pub fn question(id: i64, order: u32, options: &[(&str, &str)]) -> Question {
        Question {
            id,
            order_number: order,
            question_text: format!("question {id}"),
            options: OptionSet::from_pairs(options.iter().copied()).unwrap(),
        }
    }

    pub fn two_question_session() -> super::TestSession {
        super::TestSession::new(
            7,
            vec![
                question(1, 1, &[("A", "x"), ("B", "y")]),
                question(2, 2, &[("A", "p"), ("B", "q")]),
            ],
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::question;
    use super::*;

    #[test]
    fn empty_question_list_is_rejected() {
        assert_eq!(
            TestSession::new(1, vec![]).unwrap_err(),
            SessionError::InvalidSession
        );
    }

    #[test]
    fn questions_follow_the_backend_order_number() {
        let session = TestSession::new(
            1,
            vec![
                question(10, 2, &[("A", "x")]),
                question(11, 1, &[("A", "x")]),
            ],
        )
        .unwrap();

        let ids: Vec<i64> = session.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, [11, 10]);
        assert_eq!(session.cursor(), 0);
    }
}
