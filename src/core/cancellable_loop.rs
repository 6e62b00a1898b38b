use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::Result;

/// One unit of work driven by a [`CancellableLoop`].
#[async_trait]
pub trait LoopAction: Send {
    async fn run_once(&mut self) -> Result<()>;
}

/// Runs an action repeatedly until the shared token is cancelled.
///
/// The token is checked before every iteration and raced against the pause
/// that follows it. An action already in flight is never interrupted; it
/// finishes and the loop notices the cancellation at the next boundary.
/// The first action error ends the loop and is handed back to the caller.
pub struct CancellableLoop {
    name: String,
    interval: Duration,
    token: CancellationToken,
}

impl CancellableLoop {
    pub fn new(name: impl Into<String>, interval: Duration, token: CancellationToken) -> Self {
        Self {
            name: name.into(),
            interval,
            token,
        }
    }

    /// Returns the number of completed iterations.
    pub async fn run<A: LoopAction + ?Sized>(&self, action: &mut A) -> Result<u64> {
        let mut iterations = 0u64;
        info!(
            "Loop '{}' started (interval: {}s)",
            self.name,
            self.interval.as_secs()
        );

        loop {
            if self.token.is_cancelled() {
                debug!("Loop '{}' observed cancellation before iteration", self.name);
                break;
            }

            action.run_once().await?;
            iterations += 1;

            tokio::select! {
                _ = self.token.cancelled() => {
                    debug!("Loop '{}' cancelled while sleeping", self.name);
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(
            "Loop '{}' stopped after {} iterations",
            self.name, iterations
        );
        Ok(iterations)
    }
}
