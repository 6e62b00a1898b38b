use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::output::{MessageSink, StdoutSink};
use super::types::WorkerReport;
use crate::error::{Result, WorkerError};

/// Owns the cancellation token shared by every worker and the join barrier
/// that waits for them.
///
/// While running it waits on the shutdown future and the workers at once.
/// When the shutdown future resolves it cancels the token and waits for
/// every worker to finish its current iteration. A worker error while running is
/// returned right away; the other workers are aborted when the coordinator
/// is dropped.
pub struct ShutdownCoordinator {
    token: CancellationToken,
    workers: JoinSet<Result<WorkerReport>>,
    sink: Arc<dyn MessageSink>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(StdoutSink))
    }

    pub fn with_sink(sink: Arc<dyn MessageSink>) -> Self {
        Self {
            token: CancellationToken::new(),
            workers: JoinSet::new(),
            sink,
        }
    }

    /// A clone of the shared token, for handing to a worker.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn spawn<F>(&mut self, name: &str, worker: F)
    where
        F: Future<Output = Result<WorkerReport>> + Send + 'static,
    {
        info!("Spawning worker '{}'", name);
        self.workers.spawn(worker);
    }

    /// Runs until `shutdown` resolves, then drains every worker.
    ///
    /// Returns the reports of all workers once each of them has exited.
    pub async fn run_until<S>(mut self, shutdown: S) -> Result<Vec<WorkerReport>>
    where
        S: Future<Output = std::io::Result<()>>,
    {
        let mut reports = Vec::with_capacity(self.workers.len());
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    signal?;
                    break;
                }
                joined = self.workers.join_next() => match joined {
                    Some(result) => reports.push(Self::collect(result)?),
                    None => {
                        info!("All workers exited before shutdown was requested");
                        return Ok(reports);
                    }
                },
            }
        }

        self.token.cancel();
        if let Err(e) = self.sink.emit("Received signal. Exiting.") {
            warn!("Failed to write shutdown notice: {e}");
        }
        warn!(
            "Shutdown requested, waiting for {} workers to finish",
            self.workers.len()
        );

        while let Some(result) = self.workers.join_next().await {
            reports.push(Self::collect(result)?);
        }

        info!("Shutdown complete");
        Ok(reports)
    }

    fn collect(
        result: std::result::Result<Result<WorkerReport>, JoinError>,
    ) -> Result<WorkerReport> {
        match result {
            Ok(Ok(report)) => {
                info!(
                    "Worker '{}' exited after {} iterations",
                    report.name, report.iterations
                );
                Ok(report)
            }
            Ok(Err(e)) => {
                error!("Worker failed: {e}");
                Err(e)
            }
            Err(e) => {
                error!("Worker task panicked: {e}");
                Err(WorkerError::WorkerPanicked(e.to_string()))
            }
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on the first interrupt (ctrl-c) delivered to the process.
pub async fn wait_for_interrupt() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    warn!("Received interrupt, initiating graceful shutdown...");
    Ok(())
}
