use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API returned status: {0}")]
    Api(u16),
}

/// Delivers a text message to a chat channel. Best-effort; the run loop
/// logs failures and carries on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel_id: u64, text: &str) -> Result<(), NotifyError>;
}
