//! Outbound chat notifications (new orders, contact messages, new accounts).
//!
//! Delivery is best-effort: failures are logged and never reach the request
//! that triggered them.

pub mod dispatch;
pub mod error;
pub mod message;
pub mod telegram;

use async_trait::async_trait;

pub use dispatch::{NotificationWorker, Notifier};
pub use error::NotifyError;
pub use message::{Notification, OrderSummary, RegistrationSummary};
pub use telegram::TelegramChannel;

/// Transport that delivers one rendered message to the operations chat.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError>;
}
