//! Scripted brain implementation - replies with canned completion text.

use std::collections::VecDeque;

use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse};
use tokio::sync::Mutex;

/// A brain that returns pre-recorded completions.
///
/// Queued replies are consumed in order; once the queue is empty every
/// request gets the fallback text. Every request is recorded so tests can
/// inspect the prompt that was sent.
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    fallback: String,
    queue: Mutex<VecDeque<Result<String, BrainError>>>,
    seen: Mutex<Vec<BrainRequest>>,
}

impl ScriptedBrain {
    /// Create a brain that always answers with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            fallback: text.into(),
            ..Self::default()
        }
    }

    /// Create a brain that answers with each reply once, then with an empty task list.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fallback: r#"{"tasks": []}"#.to_string(),
            queue: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Queue one more reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.queue.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure for the next request.
    pub async fn push_error(&self, error: BrainError) {
        self.queue.lock().await.push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<BrainRequest> {
        self.seen.lock().await.clone()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn process(&self, request: BrainRequest) -> Result<BrainResponse, BrainError> {
        self.seen.lock().await.push(request);

        let next = self.queue.lock().await.pop_front();
        match next {
            Some(reply) => reply.map(BrainResponse::text),
            None => Ok(BrainResponse::text(self.fallback.clone())),
        }
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
