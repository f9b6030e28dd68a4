use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notifier is disabled")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API rejected message: {0}")]
    Rejected(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("Notification queue is full")]
    QueueFull,

    #[error("Notification queue is closed")]
    Closed,
}
