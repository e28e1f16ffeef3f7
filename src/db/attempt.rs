// src/db/attempt.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::AppError;
use crate::grading;
use crate::models::{
    assessment::Assessment,
    attempt::{Attempt, AttemptSummary},
    question::AnswerValue,
};
use crate::scheduling;

#[derive(FromRow)]
struct AttemptRow {
    id: i64,
    assessment_id: i64,
    user_id: i64,
    submitted_at: DateTime<Utc>,
    raw_answers: String,
    per_question: String,
    score_percent: i64,
    letter_grade: String,
}

impl AttemptRow {
    fn into_attempt(self) -> Result<Attempt, AppError> {
        let raw_answers: HashMap<i64, AnswerValue> = serde_json::from_str(&self.raw_answers)
            .map_err(|e| {
                tracing::error!("Corrupt raw_answers for attempt {}: {}", self.id, e);
                AppError::InternalServerError(e.to_string())
            })?;
        let per_question: HashMap<i64, bool> = serde_json::from_str(&self.per_question)
            .map_err(|e| {
                tracing::error!("Corrupt per_question for attempt {}: {}", self.id, e);
                AppError::InternalServerError(e.to_string())
            })?;

        Ok(Attempt {
            id: self.id,
            assessment_id: self.assessment_id,
            user_id: self.user_id,
            submitted_at: self.submitted_at,
            raw_answers,
            per_question,
            score_percent: self.score_percent,
            letter_grade: self.letter_grade,
        })
    }
}

/// Grades and persists one submission.
///
/// The `(assessment_id, user_id)` unique index makes the reject-duplicate
/// policy atomic: under a concurrent double-submit exactly one insert wins,
/// the other maps to `DuplicateAttempt`. A failed write persists nothing.
pub async fn record_attempt(
    pool: &SqlitePool,
    assessment: &Assessment,
    user_id: i64,
    raw_answers: HashMap<i64, AnswerValue>,
    now: DateTime<Utc>,
) -> Result<Attempt, AppError> {
    if !scheduling::can_submit(assessment.close_at, now) {
        return Err(AppError::AssessmentClosed);
    }
    if assessment.questions.is_empty() {
        return Err(AppError::EmptyAssessment);
    }

    let outcome = grading::score(&assessment.questions, &raw_answers);

    let raw_answers_json = serde_json::to_string(&raw_answers)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let per_question_json = serde_json::to_string(&outcome.per_question)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO attempts
        (assessment_id, user_id, submitted_at, raw_answers, per_question, score_percent, letter_grade)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(assessment.id)
    .bind(user_id)
    .bind(now)
    .bind(&raw_answers_json)
    .bind(&per_question_json)
    .bind(outcome.percent)
    .bind(&outcome.letter_grade)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        let msg = e.to_string();
        if msg.contains("UNIQUE constraint failed") {
            AppError::DuplicateAttempt
        } else if msg.contains("database is locked") {
            AppError::PersistenceConflict
        } else {
            tracing::error!("Failed to insert attempt: {:?}", e);
            AppError::InternalServerError(msg)
        }
    })?;

    Ok(Attempt {
        id,
        assessment_id: assessment.id,
        user_id,
        submitted_at: now,
        raw_answers,
        per_question: outcome.per_question,
        score_percent: outcome.percent,
        letter_grade: outcome.letter_grade,
    })
}

pub async fn get_attempt(
    pool: &SqlitePool,
    assessment_id: i64,
    user_id: i64,
) -> Result<Option<Attempt>, AppError> {
    let row: Option<AttemptRow> = sqlx::query_as(
        r#"
        SELECT id, assessment_id, user_id, submitted_at, raw_answers, per_question,
               score_percent, letter_grade
        FROM attempts
        WHERE assessment_id = $1 AND user_id = $2
        "#,
    )
    .bind(assessment_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(AttemptRow::into_attempt).transpose()
}

/// Author-facing listing for the results dashboard.
///
/// Ranked listings order by score descending, otherwise by submission time.
pub async fn list_attempts(
    pool: &SqlitePool,
    assessment_id: i64,
    ranked: bool,
) -> Result<Vec<AttemptSummary>, AppError> {
    let order_by = if ranked {
        "a.score_percent DESC, a.submitted_at ASC"
    } else {
        "a.submitted_at ASC"
    };

    let query = format!(
        r#"
        SELECT a.user_id, u.username, a.score_percent, a.letter_grade, a.submitted_at
        FROM attempts a
        JOIN users u ON a.user_id = u.id
        WHERE a.assessment_id = $1
        ORDER BY {}
        "#,
        order_by
    );

    let rows = sqlx::query_as::<_, (i64, String, i64, String, DateTime<Utc>)>(&query)
        .bind(assessment_id)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(user_id, username, score_percent, letter_grade, submitted_at)| AttemptSummary {
                user_id,
                username,
                score_percent,
                letter_grade,
                submitted_at,
            },
        )
        .collect())
}
