// Queue consumer worker
// Polls one queue for a single message per iteration, prints it and deletes it

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::QueueClient;
use crate::config::DeleteFailurePolicy;
use crate::core::{CancellableLoop, LoopAction, MessageSink, WorkerReport};
use crate::error::Result;
use crate::monitoring::WorkerStats;

pub struct ConsumerWorker {
    client: Arc<dyn QueueClient>,
    queue_url: String,
    visibility_timeout_secs: i32,
    delete_failure_policy: DeleteFailurePolicy,
    sink: Arc<dyn MessageSink>,
    stats: Arc<WorkerStats>,
}

impl ConsumerWorker {
    pub fn new(
        client: Arc<dyn QueueClient>,
        queue_url: impl Into<String>,
        visibility_timeout_secs: i32,
        delete_failure_policy: DeleteFailurePolicy,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
            visibility_timeout_secs,
            delete_failure_policy,
            sink,
            stats: Arc::new(WorkerStats::new()),
        }
    }

    pub async fn run(mut self, token: CancellationToken, interval: Duration) -> Result<WorkerReport> {
        let looper = CancellableLoop::new(self.queue_url.clone(), interval, token);
        let iterations = looper.run(&mut self).await?;

        if let Err(e) = self.sink.emit("Stopping dequeue.") {
            warn!("Failed to write stop notice for {}: {e}", self.queue_url);
        }
        let stats = self.stats.snapshot();
        info!(
            "Consumer for {} stopped: {} polls, {} received, {} deleted, {} delete failures",
            self.queue_url, stats.polls, stats.received, stats.deleted, stats.delete_failures
        );

        Ok(WorkerReport {
            name: self.queue_url,
            iterations,
            stats,
        })
    }
}

#[async_trait]
impl LoopAction for ConsumerWorker {
    async fn run_once(&mut self) -> Result<()> {
        let polled = self
            .client
            .receive_one(&self.queue_url, self.visibility_timeout_secs)
            .await?;
        self.stats.record_poll(polled.is_none());

        let Some(message) = polled else {
            return Ok(());
        };

        let body = message.body.as_deref().unwrap_or_default();
        self.sink.emit(&format!("{}: {}", self.queue_url, body))?;

        let Some(receipt_handle) = message.receipt_handle.as_deref() else {
            warn!(
                "Message from {} carried no receipt handle, leaving it for redelivery",
                self.queue_url
            );
            return Ok(());
        };

        match self.client.delete(&self.queue_url, receipt_handle).await {
            Ok(()) => {
                self.stats.record_deleted();
                debug!("Deleted message from {}", self.queue_url);
            }
            Err(e) => {
                self.stats.record_delete_failure();
                if self.delete_failure_policy == DeleteFailurePolicy::LogAndContinue {
                    warn!("{e}; message will be redelivered after its visibility timeout");
                } else {
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}
