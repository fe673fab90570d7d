//! Periodic refresh of orders and waiter calls
//!
//! Two independent loops poll the backend on fixed intervals and push
//! snapshots plus "N new items" notification events over a channel. The
//! order loop skips a tick entirely while a mutating action is in
//! flight, so a stale snapshot cannot overwrite an optimistic update.
//! Cancellation stops the loops; an already-issued request is not
//! aborted, its result is simply never applied.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared::models::{Order, WaiterCall};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::sync::MutationTracker;
use crate::tasks::BackgroundTasks;
use crate::{ClientConfig, ClientResult, HttpClient};

/// The two polled reads, abstracted for tests
#[async_trait]
pub trait OrderFeed: Send + Sync {
    async fn orders(&self) -> ClientResult<Vec<Order>>;
    async fn waiter_calls(&self) -> ClientResult<Vec<WaiterCall>>;
}

#[async_trait]
impl OrderFeed for HttpClient {
    async fn orders(&self) -> ClientResult<Vec<Order>> {
        HttpClient::orders(self).await
    }

    async fn waiter_calls(&self) -> ClientResult<Vec<WaiterCall>> {
        HttpClient::waiter_calls(self).await
    }
}

/// Local notification describing what a poll tick discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// New orders arrived since the previous tick
    NewOrders(u32),
    /// New waiter calls arrived since the previous tick
    NewWaiterCalls(u32),
}

/// Event stream consumed by the UI host
#[derive(Debug)]
pub enum PollEvent {
    Orders(Vec<Order>),
    WaiterCalls(Vec<WaiterCall>),
    Notify(Notification),
}

/// Count differ behind the "N new items" notifications.
///
/// Fires only when a previous non-zero count exists and the count rose;
/// the first observation and any 0→N transition stay silent.
#[derive(Debug, Default)]
pub struct NewItemTracker {
    last: Option<usize>,
}

impl NewItemTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh count, returning how many items are new
    pub fn observe(&mut self, count: usize) -> Option<u32> {
        let previous = self.last.replace(count);
        match previous {
            Some(prev) if prev > 0 && count > prev => Some((count - prev) as u32),
            _ => None,
        }
    }
}

/// The two periodic refresh tasks
pub struct RefreshLoop<F: OrderFeed + 'static> {
    feed: Arc<F>,
    tracker: MutationTracker,
    order_interval: Duration,
    call_interval: Duration,
}

impl<F: OrderFeed + 'static> RefreshLoop<F> {
    pub fn new(feed: Arc<F>, tracker: MutationTracker, config: &ClientConfig) -> Self {
        Self {
            feed,
            tracker,
            order_interval: config.order_poll_interval,
            call_interval: config.call_poll_interval,
        }
    }

    /// Register both loops on the task registry and hand back the event
    /// stream. The loops stop when the registry shuts down.
    pub fn spawn(self, tasks: &mut BackgroundTasks) -> mpsc::Receiver<PollEvent> {
        let (tx, rx) = mpsc::channel(16);

        tasks.spawn("order_refresh", {
            let feed = Arc::clone(&self.feed);
            let tracker = self.tracker.clone();
            let tx = tx.clone();
            let cancel = tasks.shutdown_token();
            let interval = self.order_interval;
            async move {
                order_loop(feed, tracker, interval, tx, cancel).await;
            }
        });

        tasks.spawn("call_refresh", {
            let feed = self.feed;
            let cancel = tasks.shutdown_token();
            let interval = self.call_interval;
            async move {
                call_loop(feed, interval, tx, cancel).await;
            }
        });

        rx
    }
}

async fn order_loop<F: OrderFeed>(
    feed: Arc<F>,
    tracker: MutationTracker,
    interval: Duration,
    tx: mpsc::Sender<PollEvent>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    let mut counts = NewItemTracker::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if tracker.in_flight() {
            tracing::trace!("Mutation in flight, skipping order refresh tick");
            continue;
        }

        match feed.orders().await {
            Ok(orders) => {
                if let Some(new) = counts.observe(orders.len()) {
                    tracing::debug!(new, "New orders detected");
                    if tx
                        .send(PollEvent::Notify(Notification::NewOrders(new)))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                if tx.send(PollEvent::Orders(orders)).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!(error = %e, "Order refresh failed"),
        }
    }
}

async fn call_loop<F: OrderFeed>(
    feed: Arc<F>,
    interval: Duration,
    tx: mpsc::Sender<PollEvent>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    let mut counts = NewItemTracker::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match feed.waiter_calls().await {
            Ok(calls) => {
                if let Some(new) = counts.observe(calls.len()) {
                    tracing::debug!(new, "New waiter calls detected");
                    if tx
                        .send(PollEvent::Notify(Notification::NewWaiterCalls(new)))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                if tx.send(PollEvent::WaiterCalls(calls)).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!(error = %e, "Waiter call refresh failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_fires_only_on_a_rise_from_nonzero() {
        let mut tracker = NewItemTracker::new();
        assert_eq!(tracker.observe(3), None); // first observation
        assert_eq!(tracker.observe(5), Some(2)); // 3 -> 5
        assert_eq!(tracker.observe(5), None); // unchanged
        assert_eq!(tracker.observe(2), None); // decrease
        assert_eq!(tracker.observe(4), Some(2)); // 2 -> 4
    }

    #[test]
    fn tracker_stays_silent_rising_from_zero() {
        let mut tracker = NewItemTracker::new();
        assert_eq!(tracker.observe(0), None);
        assert_eq!(tracker.observe(5), None);
        assert_eq!(tracker.observe(6), Some(1));
    }
}
