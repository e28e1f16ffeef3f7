// src/handlers/attempt.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    db,
    error::AppError,
    models::attempt::SubmitAttemptRequest,
    services::completion::should_complete_chapter,
    state::AppState,
    utils::jwt::Claims,
};

/// Submits raw answers for grading.
///
/// The engine is authoritative: the client never sends a score, only the raw
/// answers. Gate and duplicate checks happen in the attempt repository; on a
/// passing score the completion trigger fires for the linked chapter.
pub async fn submit_attempt(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(assessment_id): Path<i64>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    let assessment = db::assessment::fetch_assessment(&state.pool, assessment_id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))?;

    let now = Utc::now();
    let attempt =
        db::attempt::record_attempt(&state.pool, &assessment, user_id, payload.answers, now)
            .await?;

    tracing::info!(
        "attempt recorded: assessment={} user={} score={} grade={}",
        assessment_id,
        user_id,
        attempt.score_percent,
        attempt.letter_grade
    );

    // Completion and notification are fire-and-forget: their failures are
    // logged, never surfaced as a submission failure.
    if let Some(chapter_id) = assessment.chapter_id {
        let already = state
            .completion
            .is_complete(user_id, chapter_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("completion lookup failed: {}", e);
                false
            });

        if should_complete_chapter(attempt.score_percent, state.config.pass_threshold, already) {
            if let Err(e) = state.completion.mark_complete(user_id, chapter_id).await {
                tracing::warn!("failed to mark chapter {} complete: {}", chapter_id, e);
            }
        }
    }

    state
        .notifier
        .notify(
            user_id,
            &format!(
                "You scored {}% ({}) on '{}'",
                attempt.score_percent, attempt.letter_grade, assessment.title
            ),
        )
        .await;

    Ok((StatusCode::CREATED, Json(attempt)))
}

/// Returns the caller's recorded attempt for this assessment, 404 if none.
pub async fn get_my_attempt(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(assessment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let attempt = db::attempt::get_attempt(&state.pool, assessment_id, claims.user_id())
        .await?
        .ok_or(AppError::NotFound("No attempt recorded".to_string()))?;

    Ok(Json(attempt))
}

#[derive(Debug, Deserialize)]
pub struct ListAttemptsQuery {
    #[serde(default)]
    pub ranked: bool,
}

/// Lists every attempt on an assessment for the results dashboard.
/// Author only.
pub async fn list_attempts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(assessment_id): Path<i64>,
    Query(query): Query<ListAttemptsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let assessment = db::assessment::fetch_assessment(&state.pool, assessment_id)
        .await?
        .ok_or(AppError::NotFound("Assessment not found".to_string()))?;

    if assessment.created_by != claims.user_id() {
        return Err(AppError::Forbidden(
            "Only the author can view the results dashboard".to_string(),
        ));
    }

    let attempts = db::attempt::list_attempts(&state.pool, assessment_id, query.ranked).await?;

    Ok(Json(attempts))
}
