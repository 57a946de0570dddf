use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

/// Toast text shown for every alert.
pub const NEW_ORDER_MESSAGE: &str = "🔔 Novo pedido recebido!";

/// A batch of pending orders that arrived together.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderAlert {
    pub count: usize,
    pub order_ids: Vec<String>,
    /// How long the toast stays on screen.
    pub toast_duration: Duration,
}

impl NewOrderAlert {
    pub fn new(order_ids: Vec<String>, toast_duration: Duration) -> Self {
        Self {
            count: order_ids.len(),
            order_ids,
            toast_duration,
        }
    }

    pub fn message(&self) -> &'static str {
        NEW_ORDER_MESSAGE
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("Notification consumer is gone")]
    Closed,
    #[error("Notification consumer is busy")]
    Busy,
}

/// Receives new-order alerts. Implementations must not block: the feed calls
/// this inline and never waits on the toast or the sound.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, alert: &NewOrderAlert) -> Result<(), NotifyError>;
}

/// Writes alerts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, alert: &NewOrderAlert) -> Result<(), NotifyError> {
        info!(
            count = alert.count,
            order_ids = ?alert.order_ids,
            toast_secs = alert.toast_duration.as_secs(),
            "{}",
            alert.message()
        );
        Ok(())
    }
}

/// Hands alerts to a UI task (toast + sound) over a bounded channel.
/// A full channel drops the alert instead of waiting.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<NewOrderAlert>,
}

impl ChannelNotifier {
    pub fn new(sender: mpsc::Sender<NewOrderAlert>) -> Self {
        Self { sender }
    }

    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NewOrderAlert>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, alert: &NewOrderAlert) -> Result<(), NotifyError> {
        self.sender.try_send(alert.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::Busy,
            mpsc::error::TrySendError::Closed(_) => NotifyError::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_notifier_never_blocks() {
        let (notifier, mut receiver) = ChannelNotifier::channel(1);
        let alert = NewOrderAlert::new(vec!["a".into()], Duration::from_secs(5));

        assert_eq!(notifier.notify(&alert), Ok(()));
        assert_eq!(notifier.notify(&alert), Err(NotifyError::Busy));
        assert_eq!(receiver.try_recv().unwrap().count, 1);

        drop(receiver);
        assert_eq!(notifier.notify(&alert), Err(NotifyError::Closed));
    }
}
