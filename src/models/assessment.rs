// src/models/assessment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{CreateQuestionRequest, PublicQuestion, Question};
use crate::scheduling::GateState;

/// A gradable collection of questions with an optional close time
/// (unifies "quiz" and "exam").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub description: String,

    /// Course chapter this assessment can mark complete on a passing score.
    pub chapter_id: Option<i64>,

    pub questions: Vec<Question>,

    /// Submissions are rejected once this time has passed. `None` keeps the
    /// assessment open indefinitely.
    pub close_at: Option<DateTime<Utc>>,

    pub created_by: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Author-facing view: full definition plus the current gate state.
#[derive(Debug, Serialize)]
pub struct AuthorAssessmentResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub gate: GateState,
}

/// Student-facing view: answer keys stripped.
#[derive(Debug, Serialize)]
pub struct PublicAssessmentResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub chapter_id: Option<i64>,
    pub questions: Vec<PublicQuestion>,
    pub close_at: Option<DateTime<Utc>>,
    pub gate: GateState,
}

impl PublicAssessmentResponse {
    pub fn from_assessment(a: &Assessment, gate: GateState) -> Self {
        PublicAssessmentResponse {
            id: a.id,
            title: a.title.clone(),
            description: a.description.clone(),
            chapter_id: a.chapter_id,
            questions: a.questions.iter().map(PublicQuestion::from).collect(),
            close_at: a.close_at,
            gate,
        }
    }
}

/// Catalog row for the assessment list (no questions).
#[derive(Debug, Serialize)]
pub struct AssessmentSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub close_at: Option<DateTime<Utc>>,
    pub gate: GateState,
}

/// DTO for creating a new assessment with its questions.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssessmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub chapter_id: Option<i64>,
    #[serde(default)]
    pub close_at: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub questions: Vec<CreateQuestionRequest>,
}

/// DTO for rescheduling the close time. `close_at: null` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateCloseAtRequest {
    pub close_at: Option<DateTime<Utc>>,
}
