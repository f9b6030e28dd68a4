//! Fire-and-forget dispatch
//!
//! Request handlers hand notifications to [`Notifier`], which only enqueues
//! them on a bounded channel. A single [`NotificationWorker`] task drains the
//! queue and talks to the chat API, one message at a time, each bounded by a
//! timeout. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::MessageChannel;
use super::error::NotifyError;
use super::message::{Notification, OrderSummary, RegistrationSummary};
use super::telegram::TelegramChannel;
use crate::config::NotifierConfig;
use crate::orders::{ContactMessage, Order};
use crate::users::User;

// ============================================================================
// Notifier handle
// ============================================================================

/// Cloneable producer side. A disabled notifier accepts every call and
/// drops it.
#[derive(Clone)]
pub struct Notifier {
    tx: Option<mpsc::Sender<Notification>>,
}

impl Notifier {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Start a worker for `channel` and return the handle feeding it.
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        channel: Arc<dyn MessageChannel>,
        queue_size: usize,
        timeout: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_size);
        let worker = NotificationWorker::new(channel, rx, timeout);
        let handle = tokio::spawn(worker.run());
        (Self { tx: Some(tx) }, handle)
    }

    /// Telegram-backed notifier, or a disabled one when credentials are
    /// missing or the HTTP client cannot be built.
    pub fn from_config(config: &NotifierConfig) -> Self {
        if !config.is_enabled() {
            info!("Chat notifier disabled (no bot token / chat id)");
            return Self::disabled();
        }

        match TelegramChannel::new(config) {
            Ok(channel) => {
                let (notifier, _handle) = Self::spawn(
                    Arc::new(channel),
                    config.queue_size,
                    Duration::from_millis(config.timeout_ms),
                );
                info!(
                    queue_size = config.queue_size,
                    timeout_ms = config.timeout_ms,
                    "Chat notifier started"
                );
                notifier
            }
            Err(e) => {
                warn!(error = %e, "Chat notifier could not start, notifications disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Queue a new-order alert. Never blocks, never fails the caller.
    pub fn notify_order(&self, order: &Order) {
        self.submit(Notification::OrderPlaced(OrderSummary::from(order)));
    }

    /// Queue a contact-form relay. Never blocks, never fails the caller.
    pub fn notify_contact(&self, message: ContactMessage) {
        self.submit(Notification::Contact {
            message,
            received_at: Utc::now(),
        });
    }

    /// Queue a new-account alert. Never blocks, never fails the caller.
    pub fn notify_registration(&self, user: &User) {
        self.submit(Notification::UserRegistered(RegistrationSummary::from(user)));
    }

    fn submit(&self, notification: Notification) {
        let kind = notification.kind();
        match self.enqueue(notification) {
            Ok(()) => debug!(kind, "Notification queued"),
            Err(NotifyError::Disabled) => debug!(kind, "Notifier disabled, skipping"),
            Err(e) => warn!(kind, error = %e, "Notification dropped"),
        }
    }

    fn enqueue(&self, notification: Notification) -> Result<(), NotifyError> {
        let tx = self.tx.as_ref().ok_or(NotifyError::Disabled)?;
        tx.try_send(notification).map_err(|e| match e {
            TrySendError::Full(_) => NotifyError::QueueFull,
            TrySendError::Closed(_) => NotifyError::Closed,
        })
    }
}

// ============================================================================
// Worker
// ============================================================================

/// Consumer side: renders and delivers queued notifications.
pub struct NotificationWorker {
    channel: Arc<dyn MessageChannel>,
    rx: mpsc::Receiver<Notification>,
    timeout: Duration,
}

impl NotificationWorker {
    pub fn new(
        channel: Arc<dyn MessageChannel>,
        rx: mpsc::Receiver<Notification>,
        timeout: Duration,
    ) -> Self {
        Self {
            channel,
            rx,
            timeout,
        }
    }

    /// Run until every [`Notifier`] clone has been dropped.
    pub async fn run(mut self) {
        while let Some(notification) = self.rx.recv().await {
            let kind = notification.kind();
            match self.deliver(&notification).await {
                Ok(()) => info!(kind, "Notification sent"),
                Err(e) => warn!(kind, error = %e, "Notification failed"),
            }
        }
        debug!("Notification worker stopped");
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let text = notification.render();
        tokio::time::timeout(self.timeout, self.channel.send_message(&text))
            .await
            .map_err(|_| NotifyError::Timeout(self.timeout.as_millis() as u64))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::orders::OrderDraft;

    /// Records sent texts; fails the first `fail_first` calls.
    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<String>>,
        calls: AtomicUsize,
        fail_first: usize,
    }

    #[async_trait]
    impl MessageChannel for RecordingChannel {
        async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(NotifyError::Rejected("chat not found".to_string()));
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct SlowChannel;

    #[async_trait]
    impl MessageChannel for SlowChannel {
        async fn send_message(&self, _text: &str) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        }
    }

    fn sample_order() -> Order {
        Order::new(
            5,
            OrderDraft {
                customer_name: "Sara".to_string(),
                customer_email: "sara@example.com".to_string(),
                customer_phone: "0500000000".to_string(),
                customer_address: String::new(),
                items: vec![serde_json::json!({"name": "X", "quantity": 2, "price": 50})],
                total_amount: Decimal::from(100),
                payment_method: "cash_on_delivery".to_string(),
                notes: None,
                user_id: None,
            },
            Utc::now(),
        )
    }

    fn contact() -> ContactMessage {
        ContactMessage {
            name: "Ali".to_string(),
            email: "ali@example.com".to_string(),
            phone: None,
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_notifications_delivered_in_order() {
        let channel = Arc::new(RecordingChannel::default());
        let (notifier, handle) = Notifier::spawn(channel.clone(), 8, Duration::from_secs(5));

        notifier.notify_order(&sample_order());
        notifier.notify_contact(contact());
        drop(notifier);
        handle.await.unwrap();

        let sent = channel.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("GO-000005"));
        assert!(sent[1].contains("Hello"));
    }

    #[tokio::test]
    async fn test_failure_is_swallowed_and_worker_continues() {
        let channel = Arc::new(RecordingChannel {
            fail_first: 1,
            ..Default::default()
        });
        let (notifier, handle) = Notifier::spawn(channel.clone(), 8, Duration::from_secs(5));

        notifier.notify_contact(contact());
        notifier.notify_order(&sample_order());
        drop(notifier);
        handle.await.unwrap();

        assert_eq!(channel.calls.load(Ordering::SeqCst), 2);
        let sent = channel.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("GO-000005"));
    }

    #[tokio::test]
    async fn test_slow_channel_times_out() {
        let (_tx, rx) = mpsc::channel(1);
        let worker = NotificationWorker::new(Arc::new(SlowChannel), rx, Duration::from_millis(20));
        let res = worker
            .deliver(&Notification::Contact {
                message: contact(),
                received_at: Utc::now(),
            })
            .await;
        assert!(matches!(res, Err(NotifyError::Timeout(20))));
    }

    #[test]
    fn test_disabled_notifier_is_noop() {
        let notifier = Notifier::disabled();
        assert!(!notifier.is_enabled());
        notifier.notify_contact(contact());
        assert!(matches!(
            notifier.enqueue(Notification::Contact {
                message: contact(),
                received_at: Utc::now(),
            }),
            Err(NotifyError::Disabled)
        ));
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (tx, _rx) = mpsc::channel(1);
        let notifier = Notifier { tx: Some(tx) };
        let make = || Notification::Contact {
            message: contact(),
            received_at: Utc::now(),
        };
        assert!(notifier.enqueue(make()).is_ok());
        assert!(matches!(notifier.enqueue(make()), Err(NotifyError::QueueFull)));
    }

    #[test]
    fn test_closed_queue_reported() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let notifier = Notifier { tx: Some(tx) };
        let res = notifier.enqueue(Notification::Contact {
            message: contact(),
            received_at: Utc::now(),
        });
        assert!(matches!(res, Err(NotifyError::Closed)));
    }
}
