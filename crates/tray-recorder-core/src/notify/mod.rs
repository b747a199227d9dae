use crate::CoreResult;

use async_trait::async_trait;

/// Sink for transient, user-facing notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show `message`. `silent` suppresses the notification sound.
    async fn notify(&self, message: &str, silent: bool) -> CoreResult<()>;
}
