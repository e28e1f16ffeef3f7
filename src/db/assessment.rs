// src/db/assessment.rs

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::AppError;
use crate::models::{assessment::Assessment, question::Question};

#[derive(FromRow)]
struct AssessmentRow {
    id: i64,
    title: String,
    description: String,
    chapter_id: Option<i64>,
    questions: String,
    close_at: Option<DateTime<Utc>>,
    created_by: i64,
    created_at: Option<DateTime<Utc>>,
}

impl AssessmentRow {
    fn into_assessment(self) -> Result<Assessment, AppError> {
        let questions: Vec<Question> = serde_json::from_str(&self.questions).map_err(|e| {
            tracing::error!("Corrupt questions column for assessment {}: {}", self.id, e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(Assessment {
            id: self.id,
            title: self.title,
            description: self.description,
            chapter_id: self.chapter_id,
            questions,
            close_at: self.close_at,
            created_by: self.created_by,
            created_at: self.created_at,
        })
    }
}

pub async fn insert_assessment(
    pool: &SqlitePool,
    title: &str,
    description: &str,
    chapter_id: Option<i64>,
    close_at: Option<DateTime<Utc>>,
    questions: &[Question],
    created_by: i64,
    now: DateTime<Utc>,
) -> Result<i64, AppError> {
    let questions_json = serde_json::to_string(questions)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO assessments (title, description, chapter_id, questions, close_at, created_by, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(chapter_id)
    .bind(questions_json)
    .bind(close_at)
    .bind(created_by)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert assessment: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(id)
}

pub async fn fetch_assessment(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Assessment>, AppError> {
    let row: Option<AssessmentRow> = sqlx::query_as(
        r#"
        SELECT id, title, description, chapter_id, questions, close_at, created_by, created_at
        FROM assessments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(AssessmentRow::into_assessment).transpose()
}

/// Lightweight catalog row, without the questions document.
#[derive(FromRow)]
pub struct AssessmentListRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub close_at: Option<DateTime<Utc>>,
}

pub async fn list_assessments(pool: &SqlitePool) -> Result<Vec<AssessmentListRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT id, title, description, close_at
        FROM assessments
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Reschedules the close time. Returns `false` when the assessment does not
/// exist.
pub async fn update_close_at(
    pool: &SqlitePool,
    id: i64,
    close_at: Option<DateTime<Utc>>,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE assessments SET close_at = $1 WHERE id = $2")
        .bind(close_at)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update close_at: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(result.rows_affected() > 0)
}
