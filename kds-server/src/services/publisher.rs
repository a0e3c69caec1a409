//! ReadyEventPublisher — best-effort publish of READY events downstream
//!
//! The write path hands events to a bounded queue and moves on; a background
//! worker drains the queue and sends each event through the configured sink,
//! observing the outcome only for logging. Nothing here ever raises back into
//! the caller of the write path: a full queue or a failed send costs one
//! downstream notification, never the status update itself.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use shared::ReadyEvent;

/// Queue depth between the write path and the publish worker
const PUBLISH_QUEUE_CAPACITY: usize = 64;

/// Transport-level publish failure — always non-fatal
#[derive(Error, Debug)]
#[error("event publish failed: {0}")]
pub struct PublishError(pub String);

/// Downstream messaging channel
///
/// `key` is the order identity, so downstream consumers get intra-order
/// ordering from the channel.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, key: &str, event: &ReadyEvent) -> Result<(), PublishError>;
}

/// HTTP client for the messaging gateway
///
/// Posts each event as `{ "key": ..., "value": ... }` to
/// `{base}/topics/{channel}/messages`.
pub struct HttpEventGateway {
    client: Client,
    base_url: String,
    channel: String,
}

impl HttpEventGateway {
    pub fn new(
        base_url: String,
        channel: String,
        timeout: Duration,
    ) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PublishError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            channel,
        })
    }
}

#[async_trait]
impl EventSink for HttpEventGateway {
    async fn send(&self, key: &str, event: &ReadyEvent) -> Result<(), PublishError> {
        let url = format!("{}/topics/{}/messages", self.base_url, self.channel);
        let record = serde_json::json!({ "key": key, "value": event });

        let response = self
            .client
            .post(&url)
            .json(&record)
            .send()
            .await
            .map_err(|e| PublishError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PublishError(format!("status {}", response.status())));
        }

        Ok(())
    }
}

/// Write-path handle: non-blocking handoff into the publish queue
#[derive(Clone)]
pub struct ReadyEventPublisher {
    tx: mpsc::Sender<ReadyEvent>,
}

impl ReadyEventPublisher {
    /// Create the publisher handle and its draining worker
    pub fn new(sink: Arc<dyn EventSink>) -> (Self, PublisherWorker) {
        Self::with_capacity(sink, PUBLISH_QUEUE_CAPACITY)
    }

    pub fn with_capacity(sink: Arc<dyn EventSink>, capacity: usize) -> (Self, PublisherWorker) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, PublisherWorker { rx, sink })
    }

    /// Enqueue an event, at-most-once
    ///
    /// Never blocks and never fails the caller. A full queue or a stopped
    /// worker drops the event with a warning.
    pub fn publish(&self, event: ReadyEvent) {
        let order_id = event.order_id;
        match self.tx.try_send(event) {
            Ok(()) => {
                tracing::debug!(order_id, "Ready event queued for publish");
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(order_id, "Publish queue full, ready event dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!(order_id, "Publish worker stopped, ready event dropped");
            }
        }
    }
}

/// Background worker draining the publish queue into the sink
pub struct PublisherWorker {
    rx: mpsc::Receiver<ReadyEvent>,
    sink: Arc<dyn EventSink>,
}

impl PublisherWorker {
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!("Event publish worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Event publish worker shutting down");
                    break;
                }

                event = self.rx.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Publish queue closed, event publish worker stopping");
                        break;
                    };
                    self.send_one(event).await;
                }
            }
        }
    }

    async fn send_one(&self, event: ReadyEvent) {
        let key = event.order_id.to_string();
        match self.sink.send(&key, &event).await {
            Ok(()) => {
                tracing::info!(
                    order_id = event.order_id,
                    table_id = event.table_id,
                    "Ready event published"
                );
            }
            Err(e) => {
                // The READY transition already happened at the backend;
                // the only consequence here is a missed notification.
                tracing::error!(
                    order_id = event.order_id,
                    error = %e,
                    "Failed to publish ready event"
                );
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording sink used by publisher and relay tests

    use super::*;
    use parking_lot::Mutex;

    pub struct RecordingSink {
        pub sent: Mutex<Vec<(String, ReadyEvent)>>,
        pub fail: std::sync::atomic::AtomicBool,
        observer: mpsc::UnboundedSender<ReadyEvent>,
    }

    impl RecordingSink {
        /// Returns the sink and a receiver that yields every delivery attempt
        pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<ReadyEvent>) {
            let (observer, rx) = mpsc::unbounded_channel();
            (
                Arc::new(Self {
                    sent: Mutex::new(Vec::new()),
                    fail: std::sync::atomic::AtomicBool::new(false),
                    observer,
                }),
                rx,
            )
        }

        pub fn fail_sends(&self, fail: bool) {
            self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
        }

        pub fn recorded(&self) -> Vec<(String, ReadyEvent)> {
            self.sent.lock().clone()
        }
    }

    #[async_trait]
    impl EventSink for RecordingSink {
        async fn send(&self, key: &str, event: &ReadyEvent) -> Result<(), PublishError> {
            let failing = self.fail.load(std::sync::atomic::Ordering::SeqCst);
            let _ = self.observer.send(event.clone());
            if failing {
                return Err(PublishError("injected send failure".into()));
            }
            self.sent.lock().push((key.to_string(), event.clone()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;
    use chrono::Utc;
    use shared::ReadyEventItem;
    use std::time::Duration;

    fn event(order_id: i64) -> ReadyEvent {
        ReadyEvent {
            order_id,
            table_id: 7,
            items: vec![ReadyEventItem {
                item_name: "Ramen".to_string(),
                quantity: 2,
            }],
            ready_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_delivers_with_order_id_key() {
        let (sink, mut attempts) = RecordingSink::new();
        let (publisher, worker) = ReadyEventPublisher::new(sink.clone());

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(worker.run(shutdown.clone()));

        publisher.publish(event(42));

        tokio::time::timeout(Duration::from_secs(1), attempts.recv())
            .await
            .expect("publish worker never delivered")
            .unwrap();

        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "42");
        assert_eq!(recorded[0].1.order_id, 42);

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let (sink, _attempts) = RecordingSink::new();
        // No worker running: the queue fills and stays full
        let (publisher, _worker) = ReadyEventPublisher::with_capacity(sink, 2);

        publisher.publish(event(1));
        publisher.publish(event(2));
        // Third event is dropped, publish still returns immediately
        publisher.publish(event(3));
    }

    #[tokio::test]
    async fn test_sink_failure_is_contained() {
        let (sink, mut attempts) = RecordingSink::new();
        sink.fail_sends(true);

        let (publisher, worker) = ReadyEventPublisher::new(sink.clone());
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(worker.run(shutdown.clone()));

        publisher.publish(event(42));

        // Delivery was attempted and failed; nothing recorded, nothing raised
        tokio::time::timeout(Duration::from_secs(1), attempts.recv())
            .await
            .expect("publish worker never attempted delivery")
            .unwrap();
        assert!(sink.recorded().is_empty());

        shutdown.cancel();
        handle.await.unwrap();
    }
}
