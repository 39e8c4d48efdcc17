//! SinkHandle - bounded datagram queue drained by a detached worker task

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, trace};

use crate::metrics::SinkMetrics;

/// Connectionless datagram transport
///
/// Implemented for `tokio::net::UdpSocket`; the worker only needs `send`.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Send one datagram to the connected peer
    async fn send(&self, payload: &[u8]) -> std::io::Result<usize>;
}

/// Handle to a running datagram worker
pub struct SinkHandle {
    /// Sink name
    name: String,
    /// Channel to send payloads to worker
    tx: mpsc::Sender<Bytes>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
    /// Worker task handle
    worker_handle: JoinHandle<()>,
}

impl SinkHandle {
    /// Create a new SinkHandle and spawn the worker task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T>(name: impl Into<String>, transport: T, queue_capacity: usize) -> Self
    where
        T: Transport + Sync + 'static,
    {
        let name = name.into();
        let (tx, rx) = mpsc::channel(queue_capacity);
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            datagram_worker(transport, rx, worker_metrics, worker_name).await;
        });

        Self {
            name,
            tx,
            metrics,
            worker_handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Queue a payload for sending (non-blocking, callable from any thread)
    ///
    /// Returns true if queued, false if the queue is full or the worker is
    /// gone (payload dropped).
    pub fn try_send(&self, payload: Bytes) -> bool {
        match self.tx.try_send(payload) {
            Ok(()) => {
                self.metrics
                    .set_queue_len(self.tx.max_capacity() - self.tx.capacity());
                true
            }
            Err(mpsc::error::TrySendError::Full(p)) => {
                self.metrics.inc_dropped_count();
                debug!(sink = %self.name, bytes = p.len(), "Queue full, datagram dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.metrics.inc_dropped_count();
                error!(sink = %self.name, "Datagram worker closed unexpectedly");
                false
            }
        }
    }

    /// Stop accepting payloads and wait until the queue is drained
    #[instrument(name = "sink_handle_shutdown", skip(self), fields(sink = %self.name))]
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker_handle.await {
            error!(sink = %self.name, error = ?e, "Worker task panicked");
        }
        debug!(sink = %self.name, "SinkHandle shutdown complete");
    }
}

/// Worker task that sends queued payloads, one datagram each
///
/// Send failures are counted and dropped; there is no retry.
async fn datagram_worker<T: Transport>(
    transport: T,
    mut rx: mpsc::Receiver<Bytes>,
    metrics: Arc<SinkMetrics>,
    name: String,
) {
    debug!(sink = %name, "Datagram worker started");

    while let Some(payload) = rx.recv().await {
        metrics.set_queue_len(rx.len());

        match transport.send(&payload).await {
            Ok(sent) => {
                metrics.inc_write_count();
                trace!(sink = %name, bytes = sent, "Sent");
            }
            Err(e) => {
                metrics.inc_failure_count();
                debug!(sink = %name, error = %e, "Datagram send failed");
            }
        }
    }

    debug!(sink = %name, "Datagram worker stopped");
}
