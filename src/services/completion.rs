// src/services/completion.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::AppError;

/// Decides whether a passing score should mark a course chapter complete.
///
/// Pure decision function; the actual completion call goes through
/// [`CompletionService`], keeping grading decoupled from progress
/// persistence.
pub fn should_complete_chapter(
    score_percent: i64,
    passing_threshold: i64,
    already_completed: bool,
) -> bool {
    score_percent >= passing_threshold && !already_completed
}

/// External progress-tracking collaborator.
///
/// `mark_complete` must be idempotent on the receiving side: the engine
/// fires it without exactly-once guarantees across process boundaries.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn is_complete(&self, user_id: i64, chapter_id: i64) -> Result<bool, AppError>;
    async fn mark_complete(&self, user_id: i64, chapter_id: i64) -> Result<(), AppError>;
}

/// Default implementation backed by the application database.
pub struct SqlCompletionService {
    pool: SqlitePool,
}

impl SqlCompletionService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompletionService for SqlCompletionService {
    async fn is_complete(&self, user_id: i64, chapter_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM chapter_completions WHERE user_id = $1 AND chapter_id = $2)",
        )
        .bind(user_id)
        .bind(chapter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn mark_complete(&self, user_id: i64, chapter_id: i64) -> Result<(), AppError> {
        // INSERT OR IGNORE keeps repeated calls a no-op.
        sqlx::query(
            "INSERT OR IGNORE INTO chapter_completions (user_id, chapter_id) VALUES ($1, $2)",
        )
        .bind(user_id)
        .bind(chapter_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("chapter {} marked complete for user {}", chapter_id, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_score_completes_once() {
        assert!(should_complete_chapter(75, 70, false));
        // Second pass over an already-completed chapter is a no-op.
        assert!(!should_complete_chapter(75, 70, true));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(should_complete_chapter(70, 70, false));
        assert!(!should_complete_chapter(69, 70, false));
    }
}
