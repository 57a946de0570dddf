use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::Subscription;
use crate::domain::Order;

use super::{FeedCounters, FeedReconciler, NewOrderAlert, Notifier, StatusFilter};

/// Health of the feed as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedState {
    /// No snapshot received yet.
    #[default]
    Loading,
    Live,
    /// The source reported an error; the list is the last good one.
    Degraded(String),
}

/// What the orders screen renders: the full list, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedView {
    pub orders: Vec<Order>,
    pub state: FeedState,
}

impl FeedView {
    pub fn counters(&self) -> FeedCounters {
        FeedCounters::from_orders(&self.orders)
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Order> {
        super::filter_orders(&self.orders, filter)
    }
}

/// Task that consumes one order subscription, raises new-order alerts and
/// republishes the list.
pub struct FeedService {
    subscription: Subscription<Order>,
    reconciler: FeedReconciler,
    notifier: Arc<dyn Notifier>,
    toast_duration: Duration,
    view: watch::Sender<FeedView>,
    cancel: oneshot::Receiver<()>,
}

/// Owner side of a running feed. Dropping it also ends the feed.
pub struct FeedHandle {
    view: watch::Receiver<FeedView>,
    cancel: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl FeedService {
    /// Spawns the feed task over `subscription`.
    pub fn start(
        subscription: Subscription<Order>,
        notifier: Arc<dyn Notifier>,
        toast_duration: Duration,
    ) -> FeedHandle {
        let (view_tx, view_rx) = watch::channel(FeedView::default());
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let service = Self {
            subscription,
            reconciler: FeedReconciler::new(),
            notifier,
            toast_duration,
            view: view_tx,
            cancel: cancel_rx,
        };
        let task = tokio::spawn(service.run());
        FeedHandle {
            view: view_rx,
            cancel: cancel_tx,
            task,
        }
    }

    #[instrument(name = "order_feed", skip(self))]
    async fn run(mut self) {
        info!("Order feed starting");
        loop {
            tokio::select! {
                // Any outcome, including the handle being dropped, ends the feed.
                _ = &mut self.cancel => {
                    debug!("Unsubscribed");
                    break;
                }
                next = self.subscription.next() => match next {
                    Some(Ok(orders)) => self.handle_snapshot(orders),
                    Some(Err(e)) => {
                        error!(error = %e, "Order feed error");
                        self.view.send_modify(|view| view.state = FeedState::Degraded(e.to_string()));
                    }
                    None => {
                        info!("Order source closed");
                        break;
                    }
                },
            }
        }
        info!("Order feed stopped");
    }

    fn handle_snapshot(&mut self, orders: Vec<Order>) {
        let outcome = self.reconciler.reconcile(&orders);
        debug!(
            orders = orders.len(),
            new_pending = outcome.new_pending.len(),
            "Snapshot received"
        );
        if outcome.notify {
            let alert = NewOrderAlert::new(outcome.new_pending, self.toast_duration);
            if let Err(e) = self.notifier.notify(&alert) {
                warn!(error = %e, "New order alert not delivered");
            }
        }
        self.view.send_replace(FeedView {
            orders,
            state: FeedState::Live,
        });
    }
}

impl FeedHandle {
    /// A receiver that observes every republished view.
    pub fn view(&self) -> watch::Receiver<FeedView> {
        self.view.clone()
    }

    pub fn current(&self) -> FeedView {
        self.view.borrow().clone()
    }

    /// Stops the feed and waits for its task to finish.
    pub async fn unsubscribe(self) {
        let _ = self.cancel.send(());
        if let Err(e) = self.task.await {
            error!(error = %e, "Order feed task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FeedError;
    use crate::domain::OrderStatus::*;
    use crate::feed::ChannelNotifier;

    async fn next_view(view: &mut watch::Receiver<FeedView>) -> FeedView {
        view.changed().await.unwrap();
        view.borrow_and_update().clone()
    }

    #[tokio::test]
    async fn alerts_only_after_first_snapshot() {
        let (source, subscription) = Subscription::channel();
        let (notifier, mut alerts) = ChannelNotifier::channel(8);
        let handle = FeedService::start(subscription, Arc::new(notifier), Duration::from_secs(5));
        let mut view = handle.view();

        source.send(Ok(vec![Order::fixture("1", Pendente, 1)])).unwrap();
        let first = next_view(&mut view).await;
        assert_eq!(first.state, FeedState::Live);
        assert!(alerts.try_recv().is_err());

        source
            .send(Ok(vec![Order::fixture("2", Pendente, 2), Order::fixture("1", Pendente, 1)]))
            .unwrap();
        let second = next_view(&mut view).await;
        assert_eq!(second.counters().pending, 2);
        let alert = alerts.try_recv().unwrap();
        assert_eq!(alert.order_ids, vec!["2"]);
        assert_eq!(alert.toast_duration, Duration::from_secs(5));

        source
            .send(Ok(vec![Order::fixture("2", Aceito, 2), Order::fixture("1", Pendente, 1)]))
            .unwrap();
        next_view(&mut view).await;
        assert!(alerts.try_recv().is_err());

        handle.unsubscribe().await;
    }

    #[tokio::test]
    async fn errors_keep_the_last_good_list() {
        let (source, subscription) = Subscription::channel();
        let (notifier, _alerts) = ChannelNotifier::channel(8);
        let handle = FeedService::start(subscription, Arc::new(notifier), Duration::from_secs(5));
        let mut view = handle.view();

        source.send(Ok(vec![Order::fixture("1", EmPreparo, 1)])).unwrap();
        next_view(&mut view).await;

        source
            .send(Err(FeedError::PermissionDenied("missing read rule".into())))
            .unwrap();
        let degraded = next_view(&mut view).await;
        assert_eq!(degraded.orders.len(), 1);
        assert!(matches!(degraded.state, FeedState::Degraded(ref msg) if msg.contains("missing read rule")));

        source.send(Ok(vec![])).unwrap();
        let recovered = next_view(&mut view).await;
        assert_eq!(recovered.state, FeedState::Live);
        assert!(recovered.orders.is_empty());

        handle.unsubscribe().await;
    }

    #[tokio::test]
    async fn unsubscribe_stops_publishing() {
        let (source, subscription) = Subscription::channel();
        let handle = FeedService::start(subscription, Arc::new(crate::feed::LogNotifier), Duration::from_secs(5));
        let mut view = handle.view();

        handle.unsubscribe().await;
        // The task dropped the subscription and the view sender.
        assert!(source.send(Ok(vec![])).is_err());
        assert!(view.changed().await.is_err());
    }
}
