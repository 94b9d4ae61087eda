//! Model latency simulation.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse};
use tokio::time::{sleep, timeout};

/// Wraps a brain and answers only after `latency`.
///
/// With a deadline set, completions slower than the deadline fail with
/// [`BrainError::Timeout`] once the deadline passes, the way a hosted model
/// behind a client timeout does.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    latency: Duration,
    deadline: Option<Duration>,
}

impl<B: Brain> DelayedBrain<B> {
    pub fn new(inner: B, latency: Duration) -> Self {
        Self {
            inner,
            latency,
            deadline: None,
        }
    }

    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Give up after `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    async fn slow_process(&self, request: BrainRequest) -> Result<BrainResponse, BrainError> {
        sleep(self.latency).await;
        self.inner.process(request).await
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn process(&self, request: BrainRequest) -> Result<BrainResponse, BrainError> {
        match self.deadline {
            Some(deadline) => timeout(deadline, self.slow_process(request))
                .await
                .map_err(|_| BrainError::Timeout)?,
            None => self.slow_process(request).await,
        }
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
