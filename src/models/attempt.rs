// src/models/attempt.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::AnswerValue;

/// One user's graded submission for an assessment.
///
/// Created atomically at submission time; never mutated afterwards. At most
/// one attempt per (assessment, user) is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub assessment_id: i64,
    pub user_id: i64,
    pub submitted_at: DateTime<Utc>,

    /// The answers exactly as submitted, kept for result-review UIs.
    pub raw_answers: HashMap<i64, AnswerValue>,

    /// Per-question verdicts from the evaluator.
    pub per_question: HashMap<i64, bool>,

    pub score_percent: i64,
    pub letter_grade: String,
}

/// DTO for submitting an attempt.
/// Key: question id. Value: the raw answer in whatever shape the client sent.
#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    pub answers: HashMap<i64, AnswerValue>,
}

/// Row of the author's results dashboard, joined with the submitter name.
#[derive(Debug, Serialize)]
pub struct AttemptSummary {
    pub user_id: i64,
    pub username: String,
    pub score_percent: i64,
    pub letter_grade: String,
    pub submitted_at: DateTime<Utc>,
}
