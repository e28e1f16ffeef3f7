// src/handlers/assessment.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    db,
    error::AppError,
    models::{
        assessment::{
            AssessmentSummary, AuthorAssessmentResponse, CreateAssessmentRequest,
            PublicAssessmentResponse, UpdateCloseAtRequest,
        },
        question::Question,
    },
    scheduling,
    utils::jwt::Claims,
};

/// Creates a new assessment with its questions. The caller becomes the author.
///
/// Rejects zero-question assessments at publish time so `EmptyAssessment`
/// never reaches students, and rejects a `close_at` that is already in the
/// past.
pub async fn create_assessment(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if payload.questions.is_empty() {
        return Err(AppError::EmptyAssessment);
    }

    let now = Utc::now();
    if let Some(close_at) = payload.close_at {
        if close_at <= now {
            return Err(AppError::BadRequest(
                "close_at must be in the future".to_string(),
            ));
        }
    }

    for (idx, question) in payload.questions.iter().enumerate() {
        question
            .check_consistency()
            .map_err(|msg| AppError::BadRequest(format!("question {}: {}", idx + 1, msg)))?;
    }

    // Question ids are assigned server-side, sequential within the assessment.
    let questions: Vec<Question> = payload
        .questions
        .into_iter()
        .enumerate()
        .map(|(idx, q)| Question {
            id: idx as i64 + 1,
            prompt: q.prompt,
            kind: q.kind,
            options: q.options,
            answer_key: q.answer_key,
            points: q.points,
        })
        .collect();

    let id = db::assessment::insert_assessment(
        &pool,
        &payload.title,
        &payload.description,
        payload.chapter_id,
        payload.close_at,
        &questions,
        claims.user_id(),
        now,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Lists all assessments (catalog rows, no questions).
pub async fn list_assessments(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let rows = db::assessment::list_assessments(&pool).await?;

    let summaries: Vec<AssessmentSummary> = rows
        .into_iter()
        .map(|row| AssessmentSummary {
            id: row.id,
            title: row.title,
            description: row.description,
            close_at: row.close_at,
            gate: scheduling::gate_state(row.close_at, now),
        })
        .collect();

    Ok(Json(summaries))
}

/// Fetches one assessment definition.
///
/// The author receives the full definition; everyone else receives the
/// public view with answer keys stripped.
pub async fn get_assessment(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = db::assessment::fetch_assessment(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))?;

    let gate = scheduling::gate_state(assessment.close_at, Utc::now());

    if assessment.created_by == claims.user_id() {
        return Ok(Json(AuthorAssessmentResponse { assessment, gate }).into_response());
    }

    let public = PublicAssessmentResponse::from_assessment(&assessment, gate);
    Ok(Json(public).into_response())
}

/// Reschedules (or clears) the close time. Author only.
///
/// A new close time must be in the future; `null` clears it and reopens the
/// assessment indefinitely.
pub async fn update_close_at(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCloseAtRequest>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = db::assessment::fetch_assessment(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))?;

    if assessment.created_by != claims.user_id() {
        return Err(AppError::Forbidden(
            "Only the author can reschedule an assessment".to_string(),
        ));
    }

    if let Some(close_at) = payload.close_at {
        if close_at <= Utc::now() {
            return Err(AppError::BadRequest(
                "close_at must be in the future".to_string(),
            ));
        }
    }

    db::assessment::update_close_at(&pool, id, payload.close_at).await?;

    Ok(StatusCode::OK)
}
