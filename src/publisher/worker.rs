use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::TopicPublisher;
use crate::core::{
    types::VERSIONS, CancellableLoop, LoopAction, MessageEnvelope, MessageSink, WorkerReport,
};
use crate::error::Result;
use crate::monitoring::WorkerStats;

pub const PUBLISHER_WORKER_NAME: &str = "publisher";

/// Publishes one randomly versioned message per iteration.
pub struct PublisherWorker {
    publisher: Arc<dyn TopicPublisher>,
    topic: String,
    rng: StdRng,
    sink: Arc<dyn MessageSink>,
    stats: Arc<WorkerStats>,
}

impl PublisherWorker {
    /// The random source is seeded from the wall clock so successive runs
    /// draw different sequences.
    pub fn new(
        publisher: Arc<dyn TopicPublisher>,
        topic: impl Into<String>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        let seed = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default() as u64;
        Self::with_seed(publisher, topic, sink, seed)
    }

    pub fn with_seed(
        publisher: Arc<dyn TopicPublisher>,
        topic: impl Into<String>,
        sink: Arc<dyn MessageSink>,
        seed: u64,
    ) -> Self {
        Self {
            publisher,
            topic: topic.into(),
            rng: StdRng::seed_from_u64(seed),
            sink,
            stats: Arc::new(WorkerStats::new()),
        }
    }

    pub fn stats(&self) -> Arc<WorkerStats> {
        self.stats.clone()
    }

    fn next_version(&mut self) -> u32 {
        VERSIONS[self.rng.gen_range(0..VERSIONS.len())]
    }

    pub async fn run(mut self, token: CancellationToken, interval: Duration) -> Result<WorkerReport> {
        self.sink.emit("Starting loop. Press ^C to stop.")?;
        info!("Publishing to topic '{}'", self.topic);

        let looper = CancellableLoop::new(PUBLISHER_WORKER_NAME, interval, token);
        let iterations = looper.run(&mut self).await?;

        Ok(WorkerReport {
            name: PUBLISHER_WORKER_NAME.to_string(),
            iterations,
            stats: self.stats.snapshot(),
        })
    }
}

#[async_trait]
impl LoopAction for PublisherWorker {
    async fn run_once(&mut self) -> Result<()> {
        let version = self.next_version();
        let envelope = MessageEnvelope::for_version(version);

        let message_id = self.publisher.publish(&self.topic, &envelope).await?;
        self.stats.record_published();
        debug!("Published version {} as {:?}", version, message_id);

        self.sink
            .emit(&format!("Enqueued message for version {version}."))?;
        Ok(())
    }
}
