// src/services/notify.rs

use async_trait::async_trait;

/// External notification collaborator. Submission results are returned to the
/// caller as plain data; how (and whether) the user is notified beyond that
/// is this service's concern, not the engine's.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify(&self, user_id: i64, message: &str);
}

/// Default implementation that only writes to the log.
pub struct LogNotifier;

#[async_trait]
impl NotificationService for LogNotifier {
    async fn notify(&self, user_id: i64, message: &str) {
        tracing::info!("notify user {}: {}", user_id, message);
    }
}
