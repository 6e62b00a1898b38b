use std::future::Future;
use std::sync::Arc;
use tracing::info;

use crate::config::{ConsumerConfig, PublisherConfig};
use crate::consumer::{resolve_queue_urls, ConsumerWorker, QueueClient};
use crate::core::{MessageSink, ShutdownCoordinator, WorkerReport};
use crate::error::Result;
use crate::publisher::{PublisherWorker, TopicPublisher};

/// Runs the single publisher worker until `shutdown` resolves or a publish
/// fails.
pub async fn run_publisher<S>(
    config: &PublisherConfig,
    publisher: Arc<dyn TopicPublisher>,
    sink: Arc<dyn MessageSink>,
    shutdown: S,
) -> Result<Vec<WorkerReport>>
where
    S: Future<Output = std::io::Result<()>>,
{
    config.validate()?;

    let mut coordinator = ShutdownCoordinator::with_sink(sink.clone());
    let worker = PublisherWorker::new(publisher, config.topic_arn.clone(), sink);
    coordinator.spawn(
        "publisher",
        worker.run(coordinator.token(), config.send_interval()),
    );

    coordinator.run_until(shutdown).await
}

/// Resolves every configured queue, then runs one consumer worker per queue
/// until `shutdown` resolves or a worker fails.
pub async fn run_subscriber<S>(
    config: &ConsumerConfig,
    client: Arc<dyn QueueClient>,
    sink: Arc<dyn MessageSink>,
    shutdown: S,
) -> Result<Vec<WorkerReport>>
where
    S: Future<Output = std::io::Result<()>>,
{
    config.validate()?;

    let queue_urls = resolve_queue_urls(client.as_ref(), &config.queue_names).await?;

    let mut coordinator = ShutdownCoordinator::with_sink(sink.clone());
    for queue_url in queue_urls {
        let worker = ConsumerWorker::new(
            client.clone(),
            queue_url.clone(),
            config.visibility_timeout_secs,
            config.delete_failure_policy,
            sink.clone(),
        );
        coordinator.spawn(
            &queue_url,
            worker.run(coordinator.token(), config.poll_interval()),
        );
    }

    info!(
        "Started {} consumers (visibility timeout: {}s, poll interval: {}s)",
        coordinator.worker_count(),
        config.visibility_timeout_secs,
        config.poll_interval_secs
    );

    coordinator.run_until(shutdown).await
}
